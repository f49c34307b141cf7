//! Captured values and their log rendering.
//!
//! - **types**: the [`LogValue`] variant set and its building blocks
//! - **loggable**: the [`Loggable`] conversion trait
//! - **formatter**: [`ValueFormatter`], the shape-dispatching renderer

mod formatter;
mod loggable;
mod types;

pub use formatter::{ValueFormatter, is_json_container};
pub(crate) use formatter::unformattable;
pub use loggable::Loggable;
pub use types::{Deferred, Field, LogValue, ObjectValue, Response, Scalar};
