//! Fault-contained rendering and fan-out of built entries.
//!
//! Shared by the interceptor and the bootstrap logger so both contain a
//! misbehaving formatter or provider the same way.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::formatter::Formatter;
use super::provider::Provider;
use crate::entry::LogEntry;
use crate::fault::describe_panic;

/// Renders `entry` and hands it to every provider in order.
///
/// A panicking formatter falls back to the composed message. A provider that
/// fails or panics is reported and skipped; later providers still run.
pub(crate) fn dispatch(formatter: &dyn Formatter, providers: &[Arc<dyn Provider>], entry: LogEntry) {
    let rendered = match panic::catch_unwind(AssertUnwindSafe(|| formatter.format(&entry))) {
        Ok(rendered) => rendered,
        Err(payload) => {
            tracing::warn!(
                panic = %describe_panic(payload.as_ref()),
                "Formatter panicked, falling back to message"
            );
            entry.message()
        }
    };
    let entry = entry.with_rendered(rendered);

    for provider in providers {
        match panic::catch_unwind(AssertUnwindSafe(|| provider.log(&entry))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(provider = %provider.name(), error = %err, "Provider failed to write entry");
            }
            Err(payload) => {
                tracing::warn!(
                    provider = %provider.name(),
                    panic = %describe_panic(payload.as_ref()),
                    "Provider panicked while writing entry"
                );
            }
        }
    }
}
