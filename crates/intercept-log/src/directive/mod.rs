//! Logging directives and their resolution.
//!
//! Directives are declared out of band in a [`DirectiveRegistry`] and looked
//! up per call by a [`DirectiveResolver`]. A call with no applicable directive
//! is never logged.

mod registry;
mod resolver;

pub use registry::{DirectiveRegistry, LoggingDirective};
pub use resolver::{DirectiveResolver, DirectiveSource, ResolvedDirective};
