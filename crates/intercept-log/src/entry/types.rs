//! Field labels and the immutable log entry.
//!
//! An entry is an ordered list of labeled fields. Its composed message is
//! `[Label] value ` per field, in append order.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use crate::level::Level;

/// Label of a log entry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldLabel {
    /// UTC time the call started.
    TimeStamp,
    /// Directive level.
    Level,
    /// Fully qualified method signature.
    Namespace,
    /// Rendered arguments.
    Args,
    /// Host name.
    Host,
    /// Module or application name.
    AppName,
    /// Time spent in the wrapped operation.
    ElapsedTime,
    /// Rendered return value.
    ReturnValue,
    /// Expanded fault description.
    Error,
    /// Free-form text.
    Message,
}

impl FieldLabel {
    /// Label text as it appears in composed messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldLabel::TimeStamp => "TimeStamp",
            FieldLabel::Level => "Level",
            FieldLabel::Namespace => "Namespace",
            FieldLabel::Args => "Args",
            FieldLabel::Host => "Host",
            FieldLabel::AppName => "AppName",
            FieldLabel::ElapsedTime => "ElapsedTime",
            FieldLabel::ReturnValue => "ReturnValue",
            FieldLabel::Error => "Error",
            FieldLabel::Message => "Message",
        }
    }
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of one logged call.
///
/// Fields keep their append order. The composed message renders each field
/// as `[Label] value ` except free-form message text, which is emitted
/// verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub(super) level: Option<Level>,
    pub(super) elapsed: Option<Duration>,
    pub(super) fields: Vec<(FieldLabel, String)>,
    pub(super) rendered: Option<String>,
}

impl LogEntry {
    /// Level of the entry, if one was appended.
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    /// Elapsed time of the wrapped operation, if one was appended.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Fields in append order.
    pub fn fields(&self) -> &[(FieldLabel, String)] {
        &self.fields
    }

    /// Value of a field.
    pub fn get(&self, label: FieldLabel) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Checks if a field is present.
    pub fn has(&self, label: FieldLabel) -> bool {
        self.get(label).is_some()
    }

    /// Returns true if the entry records a fault.
    pub fn is_fault(&self) -> bool {
        self.has(FieldLabel::Error)
    }

    /// Composes the labeled message.
    pub fn message(&self) -> String {
        let mut out = String::new();
        for (label, value) in &self.fields {
            if *label == FieldLabel::Message {
                out.push_str(value);
            } else {
                out.push('[');
                out.push_str(label.as_str());
                out.push_str("] ");
                out.push_str(value);
                out.push(' ');
            }
        }
        out
    }

    /// Output of the formatter, once the entry has been formatted.
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    /// Attaches formatter output.
    pub fn with_rendered(mut self, rendered: impl Into<String>) -> Self {
        self.rendered = Some(rendered.into());
        self
    }

    /// Text a sink should write: the formatter output if present, the composed
    /// message otherwise.
    pub fn text(&self) -> Cow<'_, str> {
        match &self.rendered {
            Some(rendered) => Cow::Borrowed(rendered),
            None => Cow::Owned(self.message()),
        }
    }
}

impl Serialize for LogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label.as_str(), value)?;
        }
        map.end()
    }
}
