//! Formatters and providers: where built entries go.
//!
//! A [`Formatter`] renders an entry once; every registered [`Provider`] then
//! receives the entry with that rendering attached. Providers are built from
//! configuration through a [`ProviderFactory`].

mod dispatch;
mod factory;
mod formatter;
mod provider;

pub(crate) use dispatch::dispatch;
pub use factory::{ProviderFactory, ProviderOptions};
pub use formatter::{Formatter, JsonFormatter, MessageFormatter};
pub use provider::{ConsoleProvider, FileProvider, MemoryProvider, Provider, TracingProvider};
