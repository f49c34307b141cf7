//! Expansion of faults into a single descriptive string.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::Write;

/// Describes `error` and every nested cause.
///
/// The outer message comes first, followed by ` | [Cause N] <message>` for each
/// error in the `source()` chain, numbered from 1 in discovery order.
///
/// ```rust,ignore
/// // "charge failed | [Cause 1] gateway timeout"
/// let text = describe_fault(&err);
/// ```
pub fn describe_fault(error: &(dyn Error + 'static)) -> String {
    describe(error.to_string(), error.source(), None)
}

/// Like [`describe_fault`], appending `backtrace` after the outer message when
/// it was actually captured.
pub fn describe_fault_with_backtrace(
    error: &(dyn Error + 'static),
    backtrace: &Backtrace,
) -> String {
    describe(error.to_string(), error.source(), Some(backtrace))
}

/// Describes a panic payload.
pub fn describe_panic(payload: &(dyn Any + Send)) -> String {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string payload".to_string()
    };
    format!("panicked: {message}")
}

fn describe(
    message: String,
    mut source: Option<&(dyn Error + 'static)>,
    backtrace: Option<&Backtrace>,
) -> String {
    let mut out = message;

    if let Some(bt) = backtrace.filter(|bt| bt.status() == BacktraceStatus::Captured) {
        let _ = write!(out, ", [Backtrace] {bt}");
    }

    let mut n = 1;
    while let Some(cause) = source {
        let _ = write!(out, " | [Cause {n}] {cause}");
        source = cause.source();
        n += 1;
    }
    out
}
