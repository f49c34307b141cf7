//! The call interceptor: gate, time, record and emit.
//!
//! One accepted call yields exactly one entry. The wrapped operation's result,
//! error or panic always reaches the caller after emission.

use chrono::Utc;
use futures::FutureExt;
use std::backtrace::Backtrace;
use std::convert::Infallible;
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::builder::InterceptorBuilder;
use crate::call::{CallDescriptor, format_arguments};
use crate::directive::{DirectiveResolver, LoggingDirective};
use crate::entry::LogEntryBuilder;
use crate::fault::{describe_fault, describe_fault_with_backtrace, describe_panic};
use crate::filter::{FilterDecision, FilterEngine};
use crate::sink::{Formatter, Provider, dispatch};
use crate::value::{Loggable, ValueFormatter, unformattable};

/// Wraps calls, producing one log entry per accepted call.
///
/// For each call the interceptor resolves a directive, asks the filter whether
/// to log, times the wrapped operation, records its return value or fault and
/// hands the built entry to every provider in registration order.
///
/// Rejected calls run untouched: no timing, no entry. Faults and panics of the
/// wrapped operation always reach the caller unchanged, after the entry has
/// been emitted. Failures inside the pipeline degrade to placeholders or
/// warnings and never replace the operation's outcome.
///
/// # Example
///
/// ```rust,ignore
/// let interceptor = Interceptor::builder()
///     .directives(DirectiveRegistry::new().on_type("shop::Payments", Level::Information))
///     .provider(ConsoleProvider::default())
///     .build();
///
/// let call = CallDescriptor::new("shop::Payments", charge_signature())
///     .arg(100)
///     .arg(card_number);
/// let approved = interceptor.intercept(&call, || payments.charge(100, card_number))?;
/// ```
pub struct Interceptor {
    pub(super) resolver: DirectiveResolver,
    pub(super) filter: FilterEngine,
    pub(super) values: ValueFormatter,
    pub(super) formatter: Arc<dyn Formatter>,
    pub(super) providers: Vec<Arc<dyn Provider>>,
    pub(super) host: String,
    pub(super) backtraces: bool,
}

impl fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("filter", &self.filter)
            .field("providers", &self.provider_names())
            .field("host", &self.host)
            .field("backtraces", &self.backtraces)
            .finish_non_exhaustive()
    }
}

impl Interceptor {
    /// Starts building an interceptor.
    pub fn builder() -> InterceptorBuilder {
        InterceptorBuilder::new()
    }

    /// Directive applying to `call`, ignoring the filter.
    pub fn resolve(&self, call: &CallDescriptor) -> Option<LoggingDirective> {
        self.resolver.resolve(call)
    }

    /// Returns true if `call` would be logged. Has no side effects.
    pub fn should_log(&self, call: &CallDescriptor) -> bool {
        self.resolve(call)
            .is_some_and(|directive| self.filter.should_log(call, &directive))
    }

    /// Host name written into entries.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Provider names in fan-out order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Runs a fallible operation under interception.
    ///
    /// Returns exactly what `operation` returns. A panic inside `operation`
    /// is recorded and then resumed.
    pub fn intercept<T, E, F>(&self, call: &CallDescriptor, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        T: Loggable,
        E: Error + 'static,
    {
        let Some(directive) = self.gate(call) else {
            return operation();
        };

        let builder = self.begin(call, directive);
        let started = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(operation));
        self.finish(builder, started.elapsed(), outcome)
    }

    /// Runs an operation that cannot fail under interception.
    pub fn intercept_infallible<T, F>(&self, call: &CallDescriptor, operation: F) -> T
    where
        F: FnOnce() -> T,
        T: Loggable,
    {
        match self.intercept(call, || Ok::<T, Infallible>(operation())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Awaits an asynchronous operation under interception.
    ///
    /// Elapsed time covers the whole await, including time spent suspended.
    pub async fn intercept_async<T, E, Fut>(&self, call: &CallDescriptor, operation: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        T: Loggable,
        E: Error + 'static,
    {
        let Some(directive) = self.gate(call) else {
            return operation.await;
        };

        let builder = self.begin(call, directive);
        let started = Instant::now();
        let outcome = AssertUnwindSafe(operation).catch_unwind().await;
        self.finish(builder, started.elapsed(), outcome)
    }

    fn gate(&self, call: &CallDescriptor) -> Option<LoggingDirective> {
        let Some(directive) = self.resolver.resolve(call) else {
            tracing::trace!(
                target_type = %call.target_type(),
                method = %call.signature().name(),
                "No directive, call not logged"
            );
            return None;
        };

        match self.filter.evaluate(call, &directive) {
            FilterDecision::Accept => Some(directive),
            FilterDecision::Reject(reason) => {
                tracing::trace!(
                    target_type = %call.target_type(),
                    method = %call.signature().name(),
                    reason = %reason,
                    "Call filtered out"
                );
                None
            }
        }
    }

    fn begin(&self, call: &CallDescriptor, directive: LoggingDirective) -> LogEntryBuilder {
        let namespace = call.namespace();
        tracing::debug!(namespace = %namespace, level = %directive.level(), "Intercepting call");

        LogEntryBuilder::new()
            .append_time_stamp(Utc::now())
            .append_level(directive.level())
            .append_namespace(namespace)
            .append_arguments(guarded("arguments", || format_arguments(&self.values, call)))
            .append_host(self.host.as_str())
            .append_application_name(call.module())
    }

    fn finish<T, E>(
        &self,
        builder: LogEntryBuilder,
        elapsed: Duration,
        outcome: std::thread::Result<Result<T, E>>,
    ) -> Result<T, E>
    where
        T: Loggable,
        E: Error + 'static,
    {
        let builder = builder.append_elapsed_time(elapsed);

        match outcome {
            Ok(Ok(value)) => {
                let rendered = guarded("return value", || {
                    self.values.format_for_log(&value.to_log_value(), None)
                });
                self.emit(builder.append_return_value(rendered));
                Ok(value)
            }
            Ok(Err(err)) => {
                let description = guarded("error", || {
                    // Stack of the interception point; `E` exposes none of its own.
                    if self.backtraces {
                        describe_fault_with_backtrace(&err, &Backtrace::capture())
                    } else {
                        describe_fault(&err)
                    }
                });
                self.emit(builder.append_error(description));
                Err(err)
            }
            Err(payload) => {
                self.emit(builder.append_error(describe_panic(payload.as_ref())));
                panic::resume_unwind(payload)
            }
        }
    }

    /// Builds, formats and fans out an entry. Never fails.
    fn emit(&self, builder: LogEntryBuilder) {
        match builder.build() {
            Ok(entry) => dispatch(self.formatter.as_ref(), &self.providers, entry),
            Err(err) => tracing::warn!(error = %err, "Dropping malformed log entry"),
        }
    }
}

/// Runs a rendering step, turning a panic into a placeholder.
fn guarded(what: &str, render: impl FnOnce() -> String) -> String {
    panic::catch_unwind(AssertUnwindSafe(render)).unwrap_or_else(|payload| {
        let reason = describe_panic(payload.as_ref());
        tracing::warn!(field = %what, panic = %reason, "Failed to format value");
        unformattable(&reason)
    })
}
