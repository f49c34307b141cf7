//! Structured log entries and their builder.

mod builder;
mod types;

pub use builder::LogEntryBuilder;
pub use types::{FieldLabel, LogEntry};
