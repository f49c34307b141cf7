//! Error types for the interception pipeline.
//!
//! Two families exist:
//!
//! - [`ConfigError`] covers everything that can go wrong while the pipeline is
//!   being assembled (mask bounds, provider settings, configuration documents).
//!   These are fatal at setup time and surface before the first call.
//! - [`LogError`] covers failures inside the pipeline itself (builder misuse,
//!   sink I/O). These never replace the outcome of the wrapped operation.
//!
//! Faults raised by the wrapped operation are not represented here at all: the
//! caller's own error type travels back unchanged.

use thiserror::Error;

/// Setup-time configuration failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A mask rule was declared with a negative start offset.
    #[error("mask start must not be negative (got {0})")]
    NegativeMaskStart(i64),

    /// A mask rule was declared with a zero or negative length.
    #[error("mask length must be greater than zero (got {0})")]
    NonPositiveMaskLength(i64),

    /// A provider was configured without a parameter its constructor requires.
    #[error("provider `{provider}` requires the `{parameter}` parameter")]
    MissingParameter {
        /// Provider type identifier.
        provider: String,
        /// Name of the missing parameter.
        parameter: String,
    },

    /// A provider entry names a type no factory is registered for.
    #[error("provider `{name}` has unknown type `{kind}`")]
    UnknownProviderType {
        /// Configured provider name.
        name: String,
        /// Unresolvable type identifier.
        kind: String,
    },

    /// A provider entry is enabled but carries no type identifier.
    #[error("provider `{0}` is enabled but has no type")]
    MissingProviderType(String),

    /// The configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failures raised inside the logging pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LogError {
    /// An entry was assembled with both a return value and an error.
    #[error("log entry cannot carry both a return value and an error")]
    ConflictingOutcome,

    /// A provider failed to write an entry.
    #[error("provider `{provider}` failed: {message}")]
    Provider {
        /// Name of the failing provider.
        provider: String,
        /// Human-readable failure description.
        message: String,
    },

    /// I/O failure while writing an entry.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    /// Create a provider failure.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Result alias for setup-time operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result alias for pipeline operations.
pub type LogResult<T> = Result<T, LogError>;
