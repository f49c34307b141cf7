//! The accept/reject decision for a resolved call.
//!
//! Checks run in a fixed order and stop at the first rejection: master switch,
//! framework base operation, ignored type, ignored method, minimum level.

use std::fmt;
use std::sync::Arc;

use super::base_methods::{BaseMethodLookup, NoBaseMethods};
use super::config::LogFilterConfig;
use crate::call::CallDescriptor;
use crate::directive::LoggingDirective;
use crate::level::Level;

/// Why a call was not logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Logging is globally disabled.
    Disabled,
    /// The method is a framework base operation.
    BaseMethod,
    /// The target type is on the ignore list.
    IgnoredType,
    /// The method name is on the ignore list.
    IgnoredMethod,
    /// The directive level is below the configured minimum.
    BelowMinimumLevel {
        /// Level declared by the directive.
        level: Level,
        /// Configured minimum.
        minimum: Level,
    },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Disabled => f.write_str("logging disabled"),
            RejectReason::BaseMethod => f.write_str("framework base method"),
            RejectReason::IgnoredType => f.write_str("ignored type"),
            RejectReason::IgnoredMethod => f.write_str("ignored method"),
            RejectReason::BelowMinimumLevel { level, minimum } => {
                write!(f, "level {level} below minimum {minimum}")
            }
        }
    }
}

/// Outcome of evaluating a call against the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    /// The call is logged.
    Accept,
    /// The call proceeds unlogged.
    Reject(RejectReason),
}

impl FilterDecision {
    /// Returns true for [`FilterDecision::Accept`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, FilterDecision::Accept)
    }
}

/// Decides whether a call carrying a directive is logged.
///
/// Checks short-circuit in a fixed order: master switch, base operations,
/// ignored types, ignored methods, minimum level. Evaluation is pure and may be
/// called speculatively.
#[derive(Clone)]
pub struct FilterEngine {
    config: Arc<LogFilterConfig>,
    base_methods: Arc<dyn BaseMethodLookup>,
}

impl fmt::Debug for FilterEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(LogFilterConfig::default())
    }
}

impl FilterEngine {
    /// Creates an engine with no known base operations.
    pub fn new(config: LogFilterConfig) -> Self {
        Self {
            config: Arc::new(config),
            base_methods: Arc::new(NoBaseMethods),
        }
    }

    /// Replaces the configuration, keeping the base operation lookup.
    pub fn with_config(mut self, config: LogFilterConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Sets the base operation lookup.
    pub fn with_base_methods(mut self, lookup: impl BaseMethodLookup + 'static) -> Self {
        self.base_methods = Arc::new(lookup);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &LogFilterConfig {
        &self.config
    }

    /// Evaluates `call` under `directive`.
    pub fn evaluate(&self, call: &CallDescriptor, directive: &LoggingDirective) -> FilterDecision {
        let config = &self.config;

        if !config.enabled {
            return FilterDecision::Reject(RejectReason::Disabled);
        }
        if self.base_methods.contains(&call.method_id()) {
            return FilterDecision::Reject(RejectReason::BaseMethod);
        }
        if config.is_type_ignored(call.target_type()) {
            return FilterDecision::Reject(RejectReason::IgnoredType);
        }
        if config.is_method_ignored(call.signature().name()) {
            return FilterDecision::Reject(RejectReason::IgnoredMethod);
        }
        if directive.level() < config.minimum_level {
            return FilterDecision::Reject(RejectReason::BelowMinimumLevel {
                level: directive.level(),
                minimum: config.minimum_level,
            });
        }

        FilterDecision::Accept
    }

    /// Boolean form of [`evaluate`](Self::evaluate).
    pub fn should_log(&self, call: &CallDescriptor, directive: &LoggingDirective) -> bool {
        self.evaluate(call, directive).is_accepted()
    }
}
