#![warn(missing_docs)]
//! # intercept-log
//!
//! Directive-driven call interception producing structured, masked log
//! entries.
//!
//! ## Overview
//!
//! Operations opt into logging by carrying a *directive*, declared out of band
//! on a method, a type or an interface. Every intercepted call goes through the
//! same pipeline:
//!
//! ```text
//! call ──► DirectiveResolver ──► FilterEngine ──► operation (timed)
//!                                     │                 │
//!                               rejected: run           ▼
//!                               untouched        ValueFormatter
//!                                                       │
//!                                                       ▼
//!                                     LogEntryBuilder ──► Formatter ──► Providers
//! ```
//!
//! - **directive**: registry and precedence rules (method, type, interface
//!   method, interface)
//! - **filter**: master switch, ignore lists, minimum level and framework base
//!   operations
//! - **masking**: character-range masking of sensitive strings
//! - **value**: the captured value model and its rendering
//! - **entry**: immutable log entries and their builder
//! - **interceptor**: the orchestrator
//! - **sink**: formatters, providers and the provider factory
//! - **config**: the configuration document
//! - **bootstrap**: an explicit logging handle for framework-internal messages
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use intercept_log::prelude::*;
//!
//! let charge = MethodSignature::new("charge")
//!     .param(Parameter::new("amount", "i64"))
//!     .param(Parameter::new("card_number", "String").masked(MaskRule::new(0, 12)?))
//!     .returns("bool");
//!
//! let interceptor = Interceptor::builder()
//!     .directives(DirectiveRegistry::new().on_type("shop::Payments", Level::Information))
//!     .provider(ConsoleProvider::default())
//!     .build();
//!
//! let call = CallDescriptor::new("shop::Payments", charge)
//!     .arg(100)
//!     .arg("4111111111111111");
//!
//! // [Args] amount=100, card_number=************1111 ... [ReturnValue] true
//! let approved = interceptor.intercept(&call, || gateway.charge(100, card))?;
//! ```
//!
//! ## Failure Semantics
//!
//! The wrapped operation's result, error or panic always reaches the caller
//! unchanged. Problems inside the pipeline (a value that cannot be rendered, a
//! failing provider) degrade to placeholders and `tracing` warnings.

pub mod bootstrap;
pub mod call;
pub mod config;
pub mod constants;
pub mod directive;
pub mod entry;
pub mod error;
pub mod fault;
pub mod filter;
pub mod interceptor;
pub mod level;
pub mod lifecycle;
pub mod masking;
pub mod sink;
pub mod value;

#[cfg(test)]
mod tests;

pub use bootstrap::BootstrapLogger;
pub use call::{CallDescriptor, MethodId, MethodSignature, Parameter, format_arguments};
pub use config::LogConfig;
pub use directive::{
    DirectiveRegistry, DirectiveResolver, DirectiveSource, LoggingDirective, ResolvedDirective,
};
pub use entry::{FieldLabel, LogEntry, LogEntryBuilder};
pub use error::{ConfigError, ConfigResult, LogError, LogResult};
pub use fault::{describe_fault, describe_fault_with_backtrace, describe_panic};
pub use filter::{
    BaseMethodLookup, BaseMethodSet, FilterDecision, FilterEngine, FilterOptions, LogFilterConfig,
    NoBaseMethods, RejectReason,
};
pub use interceptor::{Interceptor, InterceptorBuilder};
pub use level::{Level, ParseLevelError};
pub use masking::{MaskRule, mask};
pub use sink::{
    ConsoleProvider, FileProvider, Formatter, JsonFormatter, MemoryProvider, MessageFormatter,
    Provider, ProviderFactory, ProviderOptions, TracingProvider,
};
pub use value::{
    Deferred, Field, LogValue, Loggable, ObjectValue, Response, Scalar, ValueFormatter,
    is_json_container,
};

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        BootstrapLogger, CallDescriptor, ConsoleProvider, DirectiveRegistry, Interceptor, Level,
        LogConfig, LogFilterConfig, Loggable, LogValue, MaskRule, MethodId, MethodSignature,
        ObjectValue, Parameter, Provider, ProviderFactory,
    };
}
