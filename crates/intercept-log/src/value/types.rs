//! The closed set of value shapes the formatter understands.
//!
//! Every argument, return value and object field is converted into a
//! [`LogValue`] before formatting. The variant chosen decides the rendering, and
//! the formatter matches variants in a fixed priority order.

use chrono::{DateTime, SecondsFormat, Utc};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde_json::Value;
use std::fmt;
use std::future::Future;

use super::loggable::Loggable;
use crate::masking::MaskRule;

/// A runtime value captured for logging.
#[derive(Debug, Clone)]
pub enum LogValue {
    /// Absent value.
    Null,
    /// String data, subject to masking.
    Str(String),
    /// Numbers, booleans, characters, timestamps and enum variants.
    Scalar(Scalar),
    /// Ordered collection; elements are formatted recursively.
    List(Vec<LogValue>),
    /// A computation whose result may not exist yet.
    Deferred(Deferred),
    /// A framework response exposing a status code and payload.
    Response(Response),
    /// Any other value, described by its readable fields in declaration order.
    Object(ObjectValue),
    /// A value that could not be captured; carries the reason.
    Unformattable(String),
}

impl LogValue {
    /// Creates a string value.
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Converts any serializable value through its JSON representation.
    ///
    /// Objects keep their field declaration order. Serialization failures
    /// degrade to [`LogValue::Unformattable`].
    pub fn from_serialize<T>(value: &T) -> Self
    where
        T: serde::Serialize + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(json) => Self::from_json(json),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to capture value for logging");
                Self::Unformattable(err.to_string())
            }
        }
    }

    /// Converts a JSON document into the matching value shape.
    pub fn from_json(json: Value) -> Self {
        match json {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Scalar(Scalar::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Self::Scalar(Scalar::UInt(u))
                } else {
                    Self::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            Value::Object(map) => {
                let fields = map
                    .into_iter()
                    .map(|(name, value)| Field::new(name, Self::from_json(value)))
                    .collect();
                Self::Object(ObjectValue {
                    type_name: None,
                    fields,
                })
            }
        }
    }

    /// Returns true for the absent value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Primitive values rendered through their canonical string form.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer too large for `Int`, or declared unsigned.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Single character.
    Char(char),
    /// Point in time.
    Timestamp(DateTime<Utc>),
    /// Enum variant; only the variant name is rendered.
    Enum {
        /// Qualified enum type name.
        type_name: String,
        /// Variant name.
        variant: String,
    },
}

impl Scalar {
    /// Creates an enum variant scalar.
    pub fn variant(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::Enum {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }

    /// JSON form used when the scalar is nested inside an object field.
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::from(*i),
            Scalar::UInt(u) => Value::from(*u),
            Scalar::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Scalar::Char(c) => Value::String(c.to_string()),
            Scalar::Timestamp(_) | Scalar::Enum { .. } => Value::String(self.to_string()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::UInt(u) => write!(f, "{u}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Char(c) => write!(f, "{c}"),
            Scalar::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Scalar::Enum { variant, .. } => f.write_str(variant),
        }
    }
}

type SharedValue = Shared<BoxFuture<'static, LogValue>>;

/// A deferred computation captured for logging.
///
/// Only inspected, never driven: the formatter asks whether a result has
/// already been produced and reports a placeholder otherwise.
#[derive(Clone)]
pub struct Deferred {
    inner: SharedValue,
}

impl Deferred {
    /// Wraps a future producing a value.
    ///
    /// The future is shared, so the caller can keep awaiting its own clone
    /// (see [`Deferred::shared`]) while the log entry holds this one.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = LogValue> + Send + 'static,
    {
        Self {
            inner: future.boxed().shared(),
        }
    }

    /// Wraps a future whose output implements [`Loggable`].
    pub fn from_future<F, T>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        T: Loggable,
    {
        Self::new(future.map(|output| output.to_log_value()))
    }

    /// Creates a deferred value that has already completed.
    pub fn completed(value: LogValue) -> Self {
        let deferred = Self::new(futures::future::ready(value));
        // A ready future completes on its first poll.
        let _ = deferred.inner.clone().now_or_never();
        deferred
    }

    /// Returns the produced value if the computation has completed.
    pub fn peek(&self) -> Option<&LogValue> {
        self.inner.peek()
    }

    /// Returns true once a result has been produced.
    pub fn is_completed(&self) -> bool {
        self.peek().is_some()
    }

    /// Returns a handle that drives the same computation when awaited.
    pub fn shared(&self) -> Shared<BoxFuture<'static, LogValue>> {
        self.inner.clone()
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("completed", &self.is_completed())
            .finish()
    }
}

/// A framework response wrapper: status code plus payload.
#[derive(Debug, Clone)]
pub struct Response {
    status_code: u16,
    payload: Box<LogValue>,
}

impl Response {
    /// Creates a response wrapper.
    pub fn new(status_code: u16, payload: impl Loggable) -> Self {
        Self {
            status_code,
            payload: Box::new(payload.to_log_value()),
        }
    }

    /// HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Wrapped payload.
    pub fn payload(&self) -> &LogValue {
        &self.payload
    }
}

/// A named field of an [`ObjectValue`].
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    value: LogValue,
    mask: Option<MaskRule>,
}

impl Field {
    /// Creates an unmasked field.
    pub fn new(name: impl Into<String>, value: LogValue) -> Self {
        Self {
            name: name.into(),
            value,
            mask: None,
        }
    }

    /// Creates a field whose string data is masked by `rule`.
    pub fn masked(name: impl Into<String>, value: LogValue, rule: MaskRule) -> Self {
        Self {
            name: name.into(),
            value,
            mask: Some(rule),
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field value.
    pub fn value(&self) -> &LogValue {
        &self.value
    }

    /// Mask rule declared on this field, if any.
    pub fn mask(&self) -> Option<&MaskRule> {
        self.mask.as_ref()
    }
}

/// A structured value described by its fields in declaration order.
///
/// ```rust,ignore
/// let card = ObjectValue::new("billing::Card")
///     .field("holder", "Ada Lovelace")
///     .masked_field("number", "4111111111111111", MaskRule::new(0, 12)?);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectValue {
    type_name: Option<String>,
    fields: Vec<Field>,
}

impl ObjectValue {
    /// Creates an empty object of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            fields: Vec::new(),
        }
    }

    /// Appends an unmasked field.
    pub fn field(mut self, name: impl Into<String>, value: impl Loggable) -> Self {
        self.fields.push(Field::new(name, value.to_log_value()));
        self
    }

    /// Appends a field masked by `rule`.
    pub fn masked_field(
        mut self,
        name: impl Into<String>,
        value: impl Loggable,
        rule: MaskRule,
    ) -> Self {
        self.fields
            .push(Field::masked(name, value.to_log_value(), rule));
        self
    }

    /// Qualified type name, when known.
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_field_order() {
        let value = LogValue::from_json(json!({"zeta": 1, "alpha": "a", "mid": null}));
        let LogValue::Object(object) = value else {
            panic!("expected object");
        };
        let names: Vec<_> = object.fields().iter().map(Field::name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert!(object.fields()[2].value().is_null());
    }

    #[test]
    fn test_from_serialize_numbers() {
        assert!(matches!(
            LogValue::from_serialize(&-5i32),
            LogValue::Scalar(Scalar::Int(-5))
        ));
        assert!(matches!(
            LogValue::from_serialize(&u64::MAX),
            LogValue::Scalar(Scalar::UInt(u64::MAX))
        ));
        assert!(matches!(
            LogValue::from_serialize(&1.5f64),
            LogValue::Scalar(Scalar::Float(_))
        ));
    }

    #[test]
    fn test_from_serialize_failure_degrades() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert((1, 2), "tuple keys are not valid JSON keys");
        assert!(matches!(
            LogValue::from_serialize(&map),
            LogValue::Unformattable(_)
        ));
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Int(-42).to_string(), "-42");
        assert_eq!(Scalar::Float(2.5).to_string(), "2.5");
        assert_eq!(Scalar::variant("billing::Currency", "Eur").to_string(), "Eur");

        let ts = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(Scalar::Timestamp(ts).to_string(), "2024-03-01T12:00:00.000Z");
    }

    #[test]
    fn test_scalar_nan_serializes_as_null() {
        assert_eq!(Scalar::Float(f64::NAN).to_json(), Value::Null);
    }

    #[test]
    fn test_deferred_completed_is_visible() {
        let deferred = Deferred::completed(LogValue::str("done"));
        assert!(deferred.is_completed());
        assert!(matches!(deferred.peek(), Some(LogValue::Str(s)) if s == "done"));
    }

    #[test]
    fn test_deferred_pending_is_not_driven() {
        let deferred = Deferred::new(futures::future::pending());
        assert!(!deferred.is_completed());
        assert!(deferred.peek().is_none());
    }

    #[tokio::test]
    async fn test_deferred_completes_through_shared_handle() {
        let deferred = Deferred::from_future(async { 7u32 });
        assert!(!deferred.is_completed());

        let value = deferred.shared().await;
        assert!(matches!(value, LogValue::Scalar(Scalar::UInt(7))));
        assert!(deferred.is_completed());
    }
}
