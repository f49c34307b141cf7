//! Constants and default values shared across the pipeline.

/// Character substituted for every masked position.
pub const MASK_CHAR: char = '*';

/// Literal rendered for absent values.
pub const NULL_LITERAL: &str = "null";

/// Placeholder rendered for a deferred value that has not completed yet.
///
/// The formatter never waits on a deferred value; it reports this instead.
pub const PENDING_PLACEHOLDER: &str = "pending";

/// Prefix of the placeholder rendered when a value cannot be formatted.
pub const UNFORMATTABLE_PREFIX: &str = "<unformattable";

/// Host name reported when none can be determined from the environment.
pub const UNKNOWN_HOST: &str = "unknown-host";

/// Environment variables consulted, in order, for the host name.
pub const HOST_ENV_VARS: &[&str] = &["HOSTNAME", "COMPUTERNAME"];

/// Parameter required by the file provider.
pub const FILE_PATH_PARAMETER: &str = "FilePath";

/// Type identifier of the built-in console provider.
pub const CONSOLE_PROVIDER: &str = "console";

/// Type identifier of the built-in file provider.
pub const FILE_PROVIDER: &str = "file";

/// Type identifier of the built-in tracing provider.
pub const TRACING_PROVIDER: &str = "tracing";

/// `tracing` target used by the tracing provider.
pub const TRACING_TARGET: &str = "intercept_log";
