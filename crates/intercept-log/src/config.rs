//! Top-level configuration document.
//!
//! Mirrors the shape operators write:
//!
//! ```json
//! {
//!   "Enabled": true,
//!   "MinimumLevel": "Information",
//!   "Filter": { "IgnoreTypes": ["shop::Health"], "IgnoreMethods": ["ping"] },
//!   "Providers": {
//!     "Audit": { "Enabled": true, "Type": "file", "Parameters": { "FilePath": "calls.log" } }
//!   }
//! }
//! ```
//!
//! Every key is optional. Locating and reading the document is left to the
//! application.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ConfigResult;
use crate::filter::LogFilterConfig;
use crate::lifecycle::log_config_loaded;
use crate::sink::{Provider, ProviderFactory, ProviderOptions};

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LogConfig {
    /// Master switch, minimum level and ignore lists.
    #[serde(flatten)]
    pub filter: LogFilterConfig,
    /// Named providers; fan-out follows name order.
    pub providers: BTreeMap<String, ProviderOptions>,
}

impl LogConfig {
    /// Creates the default configuration: enabled, Information, no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration document.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        log_config_loaded(
            config.providers.len(),
            config.filter.filter.ignore_types.len(),
            config.filter.filter.ignore_methods.len(),
        );
        Ok(config)
    }

    /// Replaces the filter configuration.
    pub fn with_filter(mut self, filter: LogFilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Adds a named provider.
    pub fn with_provider(mut self, name: impl Into<String>, options: ProviderOptions) -> Self {
        self.providers.insert(name.into(), options);
        self
    }

    /// Builds the enabled providers, failing on the first misconfigured one.
    pub fn build_providers(&self, factory: &ProviderFactory) -> ConfigResult<Vec<Arc<dyn Provider>>> {
        factory.create_all(&self.providers)
    }
}
