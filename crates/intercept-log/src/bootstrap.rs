//! Logging handle for framework-internal messages.
//!
//! Startup code that runs before (or outside) the interception pipeline still
//! wants entries in the same shape. [`BootstrapLogger`] is an explicitly
//! constructed handle for that: it builds a plain entry per message and hands
//! it to its own providers. Nothing here is global; pass the handle to
//! whatever needs it.

use chrono::Utc;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::entry::LogEntryBuilder;
use crate::fault::describe_fault;
use crate::interceptor::detect_host;
use crate::level::Level;
use crate::sink::{ConsoleProvider, Formatter, MessageFormatter, Provider, dispatch};

/// Handle for bootstrap and framework-internal log messages.
#[derive(Clone)]
pub struct BootstrapLogger {
    application: String,
    host: String,
    formatter: Arc<dyn Formatter>,
    providers: Vec<Arc<dyn Provider>>,
}

impl fmt::Debug for BootstrapLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers: Vec<_> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("BootstrapLogger")
            .field("application", &self.application)
            .field("host", &self.host)
            .field("providers", &providers)
            .finish_non_exhaustive()
    }
}

impl BootstrapLogger {
    /// Creates a logger writing to the console.
    pub fn console(application: impl Into<String>) -> Self {
        Self::new(application).with_provider(ConsoleProvider::default())
    }

    /// Creates a logger with no providers.
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            host: detect_host(),
            formatter: Arc::new(MessageFormatter),
            providers: Vec::new(),
        }
    }

    /// Adds a provider.
    pub fn with_provider(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Sets the formatter.
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Overrides the host name.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Logs at Trace.
    pub fn trace(&self, message: &str) {
        self.log(Level::Trace, message);
    }

    /// Logs at Debug.
    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    /// Logs at Information.
    pub fn info(&self, message: &str) {
        self.log(Level::Information, message);
    }

    /// Logs at Warning.
    pub fn warning(&self, message: &str) {
        self.log(Level::Warning, message);
    }

    /// Logs at Error, appending the expanded description of `error`.
    pub fn error(&self, message: &str, error: &(dyn Error + 'static)) {
        self.log(Level::Error, &format!("{message} - {}", describe_fault(error)));
    }

    /// Logs at Critical.
    pub fn critical(&self, message: &str) {
        self.log(Level::Critical, message);
    }

    /// Logs at Fatal.
    pub fn fatal(&self, message: &str) {
        self.log(Level::Fatal, message);
    }

    /// Logs `message` at `level`.
    pub fn log(&self, level: Level, message: &str) {
        let entry = LogEntryBuilder::new()
            .append_time_stamp(Utc::now())
            .append_level(level)
            .append_application_name(self.application.as_str())
            .append_host(self.host.as_str())
            .append_message(message)
            .build();

        match entry {
            Ok(entry) => dispatch(self.formatter.as_ref(), &self.providers, entry),
            Err(err) => tracing::warn!(error = %err, "Dropping malformed bootstrap entry"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::FieldLabel;
    use crate::sink::MemoryProvider;

    #[derive(Debug, thiserror::Error)]
    #[error("port in use")]
    struct PortInUse;

    #[derive(Debug, thiserror::Error)]
    #[error("bind failed")]
    struct BindFailed(#[source] PortInUse);

    fn logger() -> (BootstrapLogger, MemoryProvider) {
        let memory = MemoryProvider::new("mem");
        let logger = BootstrapLogger::new("shop")
            .with_host("node-1")
            .with_provider(memory.clone());
        (logger, memory)
    }

    #[test]
    fn test_message_shape() {
        let (logger, memory) = logger();
        logger.info("starting");

        let entries = memory.entries();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.level(), Some(Level::Information));
        assert_eq!(entry.get(FieldLabel::AppName), Some("shop"));
        assert_eq!(entry.get(FieldLabel::Host), Some("node-1"));
        assert!(entry.text().ends_with("[Level] Information [AppName] shop [Host] node-1 starting"));
    }

    #[test]
    fn test_every_level() {
        let (logger, memory) = logger();
        logger.trace("t");
        logger.debug("d");
        logger.info("i");
        logger.warning("w");
        logger.critical("c");
        logger.fatal("f");

        let levels: Vec<_> = memory.entries().iter().filter_map(|e| e.level()).collect();
        assert_eq!(
            levels,
            [
                Level::Trace,
                Level::Debug,
                Level::Information,
                Level::Warning,
                Level::Critical,
                Level::Fatal
            ]
        );
    }

    #[test]
    fn test_error_expands_causes() {
        let (logger, memory) = logger();
        logger.error("server failed", &BindFailed(PortInUse));

        let entries = memory.entries();
        assert_eq!(
            entries[0].get(FieldLabel::Message),
            Some("server failed - bind failed | [Cause 1] port in use")
        );
        assert_eq!(entries[0].level(), Some(Level::Error));
    }

    struct BrokenSink;

    impl Provider for BrokenSink {
        fn name(&self) -> &str {
            "broken"
        }

        fn log(&self, _entry: &crate::entry::LogEntry) -> crate::error::LogResult<()> {
            panic!("sink unavailable")
        }
    }

    #[test]
    fn test_panicking_provider_is_contained() {
        let memory = MemoryProvider::new("mem");
        let logger = BootstrapLogger::new("shop")
            .with_provider(BrokenSink)
            .with_provider(memory.clone());

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| logger.info("hi")));

        assert!(outcome.is_ok());
        assert_eq!(memory.len(), 1);
        assert!(memory.lines()[0].ends_with("hi"));
    }
}
