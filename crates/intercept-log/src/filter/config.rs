//! Filter configuration.
//!
//! [`LogFilterConfig`] is loaded once at startup and read-only afterwards. It is
//! shared between threads behind an `Arc` without any synchronization.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::level::Level;

/// Ignore lists applied before the level threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FilterOptions {
    /// Fully qualified target type names that are never logged.
    pub ignore_types: HashSet<String>,
    /// Method names that are never logged, whatever their declaring type.
    pub ignore_methods: HashSet<String>,
}

/// Process-wide gate deciding which calls are logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LogFilterConfig {
    /// Master switch; when false nothing is logged.
    pub enabled: bool,
    /// Directives below this level are not logged.
    pub minimum_level: Level,
    /// Ignore lists.
    pub filter: FilterOptions,
}

impl Default for LogFilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            minimum_level: Level::Information,
            filter: FilterOptions::default(),
        }
    }
}

impl LogFilterConfig {
    /// Creates a configuration that logs everything at Information or above.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the master switch.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the minimum directive level.
    pub fn with_minimum_level(mut self, level: Level) -> Self {
        self.minimum_level = level;
        self
    }

    /// Adds a target type to the ignore list.
    pub fn ignore_type(mut self, type_name: impl Into<String>) -> Self {
        self.filter.ignore_types.insert(type_name.into());
        self
    }

    /// Adds a method name to the ignore list.
    pub fn ignore_method(mut self, method_name: impl Into<String>) -> Self {
        self.filter.ignore_methods.insert(method_name.into());
        self
    }

    /// Checks if a target type is ignored.
    pub fn is_type_ignored(&self, type_name: &str) -> bool {
        self.filter.ignore_types.contains(type_name)
    }

    /// Checks if a method name is ignored.
    pub fn is_method_ignored(&self, method_name: &str) -> bool {
        self.filter.ignore_methods.contains(method_name)
    }
}
