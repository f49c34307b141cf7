//! Conversion of Rust values into [`LogValue`]s.

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use super::types::{Deferred, LogValue, ObjectValue, Response, Scalar};

// =============================================================================
// Loggable Trait
// =============================================================================

/// A value that can be captured into a log entry.
///
/// Implemented for primitives, strings, options, sequences and timestamps.
/// Structured types either implement it by hand, usually through
/// [`ObjectValue`] so individual fields can carry mask rules, or go through
/// [`LogValue::from_serialize`].
pub trait Loggable {
    /// Captures this value.
    fn to_log_value(&self) -> LogValue;
}

impl LogValue {
    /// Captures any [`Loggable`] value.
    pub fn of<T: Loggable + ?Sized>(value: &T) -> Self {
        value.to_log_value()
    }
}

// =============================================================================
// Primitive Implementations
// =============================================================================

macro_rules! impl_loggable_scalar {
    ($variant:ident as $target:ty => $($t:ty),+ $(,)?) => {
        $(
            impl Loggable for $t {
                fn to_log_value(&self) -> LogValue {
                    LogValue::Scalar(Scalar::$variant(<$target>::from(*self)))
                }
            }
        )+
    };
}

impl_loggable_scalar!(Int as i64 => i8, i16, i32, i64);
impl_loggable_scalar!(UInt as u64 => u8, u16, u32, u64);
impl_loggable_scalar!(Float as f64 => f32, f64);

impl Loggable for isize {
    fn to_log_value(&self) -> LogValue {
        LogValue::Scalar(Scalar::Int(*self as i64))
    }
}

impl Loggable for usize {
    fn to_log_value(&self) -> LogValue {
        LogValue::Scalar(Scalar::UInt(*self as u64))
    }
}

impl Loggable for bool {
    fn to_log_value(&self) -> LogValue {
        LogValue::Scalar(Scalar::Bool(*self))
    }
}

impl Loggable for char {
    fn to_log_value(&self) -> LogValue {
        LogValue::Scalar(Scalar::Char(*self))
    }
}

impl Loggable for DateTime<Utc> {
    fn to_log_value(&self) -> LogValue {
        LogValue::Scalar(Scalar::Timestamp(*self))
    }
}

impl Loggable for () {
    fn to_log_value(&self) -> LogValue {
        LogValue::Null
    }
}

// =============================================================================
// Strings
// =============================================================================

impl Loggable for str {
    fn to_log_value(&self) -> LogValue {
        LogValue::Str(self.to_string())
    }
}

impl Loggable for String {
    fn to_log_value(&self) -> LogValue {
        LogValue::Str(self.clone())
    }
}

impl Loggable for Cow<'_, str> {
    fn to_log_value(&self) -> LogValue {
        LogValue::Str(self.to_string())
    }
}

// =============================================================================
// Containers
// =============================================================================

impl<T: Loggable> Loggable for Option<T> {
    fn to_log_value(&self) -> LogValue {
        match self {
            Some(value) => value.to_log_value(),
            None => LogValue::Null,
        }
    }
}

impl<T: Loggable> Loggable for [T] {
    fn to_log_value(&self) -> LogValue {
        LogValue::List(self.iter().map(Loggable::to_log_value).collect())
    }
}

impl<T: Loggable, const N: usize> Loggable for [T; N] {
    fn to_log_value(&self) -> LogValue {
        self.as_slice().to_log_value()
    }
}

impl<T: Loggable> Loggable for Vec<T> {
    fn to_log_value(&self) -> LogValue {
        self.as_slice().to_log_value()
    }
}

impl<T: Loggable> Loggable for VecDeque<T> {
    fn to_log_value(&self) -> LogValue {
        LogValue::List(self.iter().map(Loggable::to_log_value).collect())
    }
}

impl<T: Loggable + ?Sized> Loggable for &T {
    fn to_log_value(&self) -> LogValue {
        (**self).to_log_value()
    }
}

impl<T: Loggable + ?Sized> Loggable for Box<T> {
    fn to_log_value(&self) -> LogValue {
        (**self).to_log_value()
    }
}

impl<T: Loggable + ?Sized> Loggable for Arc<T> {
    fn to_log_value(&self) -> LogValue {
        (**self).to_log_value()
    }
}

impl<T: Loggable + ?Sized> Loggable for Rc<T> {
    fn to_log_value(&self) -> LogValue {
        (**self).to_log_value()
    }
}

// =============================================================================
// Pipeline Types
// =============================================================================

impl Loggable for LogValue {
    fn to_log_value(&self) -> LogValue {
        self.clone()
    }
}

impl Loggable for Deferred {
    fn to_log_value(&self) -> LogValue {
        LogValue::Deferred(self.clone())
    }
}

impl Loggable for Response {
    fn to_log_value(&self) -> LogValue {
        LogValue::Response(self.clone())
    }
}

impl Loggable for ObjectValue {
    fn to_log_value(&self) -> LogValue {
        LogValue::Object(self.clone())
    }
}

impl Loggable for serde_json::Value {
    fn to_log_value(&self) -> LogValue {
        LogValue::from_json(self.clone())
    }
}
