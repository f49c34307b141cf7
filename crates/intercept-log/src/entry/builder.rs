//! Building entries one field at a time.

use chrono::{DateTime, SecondsFormat, Utc};
use std::time::Duration;

use super::types::{FieldLabel, LogEntry};
use crate::error::{LogError, LogResult};
use crate::level::Level;

/// Fluent accumulator for a [`LogEntry`].
///
/// Every method consumes and returns the builder; [`build`](Self::build)
/// consumes it for good, so an accumulator cannot be reused once built.
/// Appending a label that is already present replaces its value in place,
/// except for message text, which accumulates.
///
/// ```rust,ignore
/// let entry = LogEntryBuilder::new()
///     .append_time_stamp(Utc::now())
///     .append_level(Level::Information)
///     .append_namespace("shop::Orders::place(id: u64)")
///     .append_elapsed_time(elapsed)
///     .append_return_value("true")
///     .build()?;
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until `build` is called"]
pub struct LogEntryBuilder {
    level: Option<Level>,
    elapsed: Option<Duration>,
    fields: Vec<(FieldLabel, String)>,
}

impl LogEntryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn set(mut self, label: FieldLabel, value: String) -> Self {
        match self.fields.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((label, value)),
        }
        self
    }

    /// Appends the fully qualified method signature.
    pub fn append_namespace(self, namespace: impl Into<String>) -> Self {
        self.set(FieldLabel::Namespace, namespace.into())
    }

    /// Appends the rendered arguments.
    pub fn append_arguments(self, arguments: impl Into<String>) -> Self {
        self.set(FieldLabel::Args, arguments.into())
    }

    /// Appends the host name.
    pub fn append_host(self, host: impl Into<String>) -> Self {
        self.set(FieldLabel::Host, host.into())
    }

    /// Appends the module or application name.
    pub fn append_application_name(self, name: impl Into<String>) -> Self {
        self.set(FieldLabel::AppName, name.into())
    }

    /// Appends the elapsed time, rendered in whole milliseconds.
    pub fn append_elapsed_time(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self.set(FieldLabel::ElapsedTime, format!("{} ms", elapsed.as_millis()))
    }

    /// Appends the rendered return value.
    pub fn append_return_value(self, value: impl Into<String>) -> Self {
        self.set(FieldLabel::ReturnValue, value.into())
    }

    /// Appends an expanded fault description.
    pub fn append_error(self, error: impl Into<String>) -> Self {
        self.set(FieldLabel::Error, error.into())
    }

    /// Appends the entry level.
    pub fn append_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self.set(FieldLabel::Level, level.to_string())
    }

    /// Appends the timestamp in RFC 3339 form.
    pub fn append_time_stamp(self, timestamp: DateTime<Utc>) -> Self {
        self.set(
            FieldLabel::TimeStamp,
            timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    /// Appends free-form text.
    pub fn append_message(mut self, message: impl AsRef<str>) -> Self {
        match self
            .fields
            .iter_mut()
            .find(|(l, _)| *l == FieldLabel::Message)
        {
            Some((_, existing)) => existing.push_str(message.as_ref()),
            None => self
                .fields
                .push((FieldLabel::Message, message.as_ref().to_string())),
        }
        self
    }

    /// Produces the entry.
    ///
    /// Fails with [`LogError::ConflictingOutcome`] if both a return value and
    /// an error were appended.
    pub fn build(self) -> LogResult<LogEntry> {
        let has = |label| self.fields.iter().any(|(l, _)| *l == label);
        if has(FieldLabel::ReturnValue) && has(FieldLabel::Error) {
            return Err(LogError::ConflictingOutcome);
        }

        Ok(LogEntry {
            level: self.level,
            elapsed: self.elapsed,
            fields: self.fields,
            rendered: None,
        })
    }
}
