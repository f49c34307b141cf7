//! Provider contract and the built-in sinks.
//!
//! - **ConsoleProvider**: one line per entry on stdout
//! - **FileProvider**: appends one line per entry to a file
//! - **TracingProvider**: re-emits entries as `tracing` events
//! - **MemoryProvider**: keeps entries in memory for inspection

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::constants::{
    CONSOLE_PROVIDER, FILE_PATH_PARAMETER, FILE_PROVIDER, TRACING_PROVIDER, TRACING_TARGET,
};
use crate::entry::LogEntry;
use crate::error::{ConfigError, ConfigResult, LogResult};
use crate::level::Level;

// =============================================================================
// Provider Trait
// =============================================================================

/// A sink receiving formatted log entries.
///
/// Providers are invoked sequentially on the calling thread. A failure is
/// reported back to the interceptor, which records it and moves on to the
/// next provider.
pub trait Provider: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Writes one entry. [`LogEntry::text`] yields the formatted text.
    fn log(&self, entry: &LogEntry) -> LogResult<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// ConsoleProvider
// =============================================================================

/// Writes one line per entry to standard output.
#[derive(Debug, Clone)]
pub struct ConsoleProvider {
    name: String,
}

impl Default for ConsoleProvider {
    fn default() -> Self {
        Self::new(CONSOLE_PROVIDER)
    }
}

impl ConsoleProvider {
    /// Creates a console provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Provider for ConsoleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&self, entry: &LogEntry) -> LogResult<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", entry.text())?;
        Ok(())
    }
}

// =============================================================================
// FileProvider
// =============================================================================

/// Appends one line per entry to a file.
///
/// Writes from concurrent calls are serialized so lines never interleave.
#[derive(Debug)]
pub struct FileProvider {
    name: String,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileProvider {
    /// Creates a provider appending to `path`.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a provider from configuration parameters.
    ///
    /// Requires the `FilePath` parameter.
    pub fn from_parameters(
        name: impl Into<String>,
        parameters: &HashMap<String, String>,
    ) -> ConfigResult<Self> {
        let path = parameters
            .get(FILE_PATH_PARAMETER)
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingParameter {
                provider: FILE_PROVIDER.to_string(),
                parameter: FILE_PATH_PARAMETER.to_string(),
            })?;
        Ok(Self::new(name, path))
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Provider for FileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&self, entry: &LogEntry) -> LogResult<()> {
        let _guard = lock(&self.write_lock);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry.text())?;
        Ok(())
    }
}

// =============================================================================
// TracingProvider
// =============================================================================

/// Forwards entries to `tracing` at the entry's level.
///
/// Lets applications route intercepted calls through their existing
/// subscriber. Critical and Fatal entries are emitted at ERROR.
#[derive(Debug, Clone)]
pub struct TracingProvider {
    name: String,
}

impl Default for TracingProvider {
    fn default() -> Self {
        Self::new(TRACING_PROVIDER)
    }
}

impl TracingProvider {
    /// Creates a tracing provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Provider for TracingProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&self, entry: &LogEntry) -> LogResult<()> {
        let text = entry.text();
        let fault = entry.is_fault();
        let elapsed_ms = entry.elapsed().map(|d| d.as_millis() as u64);

        match entry.level().unwrap_or_default() {
            Level::Trace => {
                tracing::trace!(target: TRACING_TARGET, fault, elapsed_ms, "{}", text)
            }
            Level::Debug => {
                tracing::debug!(target: TRACING_TARGET, fault, elapsed_ms, "{}", text)
            }
            Level::Information => {
                tracing::info!(target: TRACING_TARGET, fault, elapsed_ms, "{}", text)
            }
            Level::Warning => {
                tracing::warn!(target: TRACING_TARGET, fault, elapsed_ms, "{}", text)
            }
            Level::Error | Level::Critical | Level::Fatal => {
                tracing::error!(target: TRACING_TARGET, fault, elapsed_ms, "{}", text)
            }
        }
        Ok(())
    }
}

// =============================================================================
// MemoryProvider
// =============================================================================

/// Keeps entries in memory.
///
/// Clones share the same buffer, so a handle kept by the caller observes what
/// the interceptor wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    name: String,
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryProvider {
    /// Creates an empty in-memory provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Arc::default(),
        }
    }

    /// Snapshot of the received entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        lock(&self.entries).clone()
    }

    /// Formatted text of the received entries.
    pub fn lines(&self) -> Vec<String> {
        lock(&self.entries)
            .iter()
            .map(|e| e.text().into_owned())
            .collect()
    }

    /// Number of received entries.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Returns true if nothing was received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all received entries.
    pub fn clear(&self) {
        lock(&self.entries).clear();
    }
}

impl Provider for MemoryProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&self, entry: &LogEntry) -> LogResult<()> {
        lock(&self.entries).push(entry.clone());
        Ok(())
    }
}
