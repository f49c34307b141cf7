//! Lifecycle logging for the pipeline itself.
//!
//! These events describe how the interception pipeline was assembled. They go
//! through `tracing`, never through the pipeline's own providers.

// =============================================================================
// Interceptor Lifecycle Logging
// =============================================================================

/// Log interceptor initialization.
///
/// Logged at Info level with a summary of the active configuration.
///
/// # Example
///
/// ```rust,ignore
/// log_interceptor_init(true, Level::Information, 4, 2);
/// ```
pub fn log_interceptor_init(
    enabled: bool,
    minimum_level: crate::Level,
    directive_count: usize,
    provider_count: usize,
) {
    tracing::info!(
        enabled = %enabled,
        minimum_level = %minimum_level,
        directive_count = %directive_count,
        provider_count = %provider_count,
        "Call interceptor initialized"
    );
}

/// Log provider registration.
///
/// Logged at Debug level, once per provider, in fan-out order.
pub fn log_provider_registered(name: &str, position: usize) {
    tracing::debug!(
        provider = %name,
        position = %position,
        "Log provider registered"
    );
}

/// Log an interceptor with no providers.
///
/// Accepted calls are still timed and formatted, but every entry is dropped.
pub fn log_no_providers() {
    tracing::warn!("Call interceptor has no providers; entries will be discarded");
}

/// Log configuration loading.
///
/// Logged at Debug level.
pub fn log_config_loaded(provider_entries: usize, ignored_types: usize, ignored_methods: usize) {
    tracing::debug!(
        provider_entries = %provider_entries,
        ignored_types = %ignored_types,
        ignored_methods = %ignored_methods,
        "Logging configuration loaded"
    );
}
