//! Entry formatters.

use crate::entry::LogEntry;

/// Turns a built entry into the text handed to providers.
pub trait Formatter: Send + Sync {
    /// Formats `entry`.
    fn format(&self, entry: &LogEntry) -> String;
}

/// Default formatter: the composed labeled message, verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFormatter;

impl Formatter for MessageFormatter {
    fn format(&self, entry: &LogEntry) -> String {
        entry.message()
    }
}

/// Formats the entry as a compact JSON object keyed by field label.
///
/// Useful for log aggregation systems that expect one JSON document per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, entry: &LogEntry) -> String {
        serde_json::to_string(entry).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Failed to serialize log entry, falling back to message");
            entry.message()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::LogEntryBuilder;
    use crate::level::Level;

    fn entry() -> LogEntry {
        LogEntryBuilder::new()
            .append_level(Level::Information)
            .append_return_value("true")
            .build()
            .unwrap()
    }

    #[test]
    fn test_message_formatter() {
        assert_eq!(
            MessageFormatter.format(&entry()),
            "[Level] Information [ReturnValue] true "
        );
    }

    #[test]
    fn test_json_formatter() {
        assert_eq!(
            JsonFormatter.format(&entry()),
            r#"{"Level":"Information","ReturnValue":"true"}"#
        );
    }
}
