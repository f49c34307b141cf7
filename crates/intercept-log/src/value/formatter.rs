//! Rendering of captured values into log-safe strings.
//!
//! [`ValueFormatter::format_for_log`] dispatches on the value shape in a fixed
//! priority order:
//!
//! 1. null renders as `null`
//! 2. strings render as-is, or masked when a rule is attached
//! 3. scalars render through their canonical string form
//! 4. lists render as `[e1, e2, ...]`, recursively
//! 5. deferred values render their result if completed, a placeholder otherwise
//! 6. responses render a scalar payload directly (also when it is the result
//!    of a completed deferred value), anything else as
//!    `{ value: <payload>, statusCode: <code> }`
//! 7. objects render as `{field1=v1, field2=v2}` with per-field masking, JSON
//!    strings emitted verbatim and everything else as compact JSON
//!
//! Masking only ever touches string leaves, so container structure is never
//! altered by a rule.

use serde_json::{Map, Value};

use super::types::{Field, LogValue, ObjectValue, Response};
use crate::constants::{NULL_LITERAL, PENDING_PLACEHOLDER, UNFORMATTABLE_PREFIX};
use crate::masking::MaskRule;

/// Returns true if `text` is a syntactically valid JSON object or array.
///
/// Leading and trailing whitespace is ignored. JSON scalars (`"x"`, `1`, `true`)
/// are not containers.
pub fn is_json_container(text: &str) -> bool {
    let trimmed = text.trim();
    let bracketed = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));

    bracketed && serde_json::from_str::<serde::de::IgnoredAny>(trimmed).is_ok()
}

/// Renders a formatting failure reason as a placeholder.
pub(crate) fn unformattable(reason: &str) -> String {
    format!("{UNFORMATTABLE_PREFIX}: {reason}>")
}

/// Stateless formatter for [`LogValue`]s.
///
/// Safe to share between threads; it holds no per-call state.
#[derive(Debug, Clone)]
pub struct ValueFormatter {
    pending_placeholder: String,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueFormatter {
    /// Creates a formatter with the default pending placeholder.
    pub fn new() -> Self {
        Self {
            pending_placeholder: PENDING_PLACEHOLDER.to_string(),
        }
    }

    /// Sets the text rendered for deferred values that have not completed.
    pub fn with_pending_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.pending_placeholder = placeholder.into();
        self
    }

    /// Placeholder rendered for incomplete deferred values.
    pub fn pending_placeholder(&self) -> &str {
        &self.pending_placeholder
    }

    /// Formats `value` for a log entry.
    ///
    /// `mask` is the rule declared on the parameter or member the value came
    /// from. It applies to every string leaf reachable without crossing into
    /// an object, whose fields carry their own rules.
    pub fn format_for_log(&self, value: &LogValue, mask: Option<&MaskRule>) -> String {
        match value {
            LogValue::Null => NULL_LITERAL.to_string(),
            LogValue::Str(text) => apply_mask(text, mask),
            LogValue::Scalar(scalar) => scalar.to_string(),
            LogValue::List(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| self.format_for_log(item, mask))
                    .collect();
                format!("[{}]", parts.join(", "))
            }
            LogValue::Deferred(deferred) => match deferred.peek() {
                Some(resolved) => self.format_for_log(resolved, mask),
                None => self.pending_placeholder.clone(),
            },
            LogValue::Response(response) => self.format_response(response, mask),
            LogValue::Object(object) => self.format_object(object),
            LogValue::Unformattable(reason) => unformattable(reason),
        }
    }

    /// Converts `value` into JSON, masking string leaves.
    ///
    /// Used for object members that are neither masked strings nor JSON
    /// strings. Object fields switch to their own rules.
    pub fn to_json(&self, value: &LogValue, mask: Option<&MaskRule>) -> Value {
        match value {
            LogValue::Null => Value::Null,
            LogValue::Str(text) => Value::String(apply_mask(text, mask)),
            LogValue::Scalar(scalar) => scalar.to_json(),
            LogValue::List(items) => {
                Value::Array(items.iter().map(|item| self.to_json(item, mask)).collect())
            }
            LogValue::Deferred(deferred) => match deferred.peek() {
                Some(resolved) => self.to_json(resolved, mask),
                None => Value::String(self.pending_placeholder.clone()),
            },
            LogValue::Response(response) => {
                let mut map = Map::new();
                map.insert("value".into(), self.to_json(response.payload(), mask));
                map.insert("statusCode".into(), Value::from(response.status_code()));
                Value::Object(map)
            }
            LogValue::Object(object) => {
                let map: Map<String, Value> = object
                    .fields()
                    .iter()
                    .map(|field| {
                        (
                            field.name().to_string(),
                            self.to_json(field.value(), field.mask()),
                        )
                    })
                    .collect();
                Value::Object(map)
            }
            LogValue::Unformattable(reason) => Value::String(unformattable(reason)),
        }
    }

    fn format_response(&self, response: &Response, mask: Option<&MaskRule>) -> String {
        match settled(response.payload()) {
            LogValue::Scalar(scalar) => scalar.to_string(),
            payload => format!(
                "{{ value: {}, statusCode: {} }}",
                self.format_for_log(payload, mask),
                response.status_code()
            ),
        }
    }

    fn format_object(&self, object: &ObjectValue) -> String {
        let parts: Vec<String> = object
            .fields()
            .iter()
            .map(|field| format!("{}={}", field.name(), self.format_field(field)))
            .collect();
        format!("{{{}}}", parts.join(", "))
    }

    fn format_field(&self, field: &Field) -> String {
        match (field.value(), field.mask()) {
            (LogValue::Str(text), Some(rule)) => rule.apply(text),
            (LogValue::Str(text), None) if is_json_container(text) => text.clone(),
            (value, mask) => {
                let json = self.to_json(value, mask);
                serde_json::to_string(&json).unwrap_or_else(|err| {
                    tracing::warn!(field = %field.name(), error = %err, "Failed to serialize field");
                    unformattable(&err.to_string())
                })
            }
        }
    }
}

/// Looks through completed deferred values to what they produced.
fn settled(value: &LogValue) -> &LogValue {
    match value {
        LogValue::Deferred(deferred) => deferred.peek().map_or(value, settled),
        other => other,
    }
}

fn apply_mask(text: &str, mask: Option<&MaskRule>) -> String {
    match mask {
        Some(rule) => rule.apply(text),
        None => text.to_string(),
    }
}
