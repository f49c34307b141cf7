//! Construction of providers from configuration.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use super::provider::{ConsoleProvider, FileProvider, Provider, TracingProvider};
use crate::constants::{CONSOLE_PROVIDER, FILE_PROVIDER, TRACING_PROVIDER};
use crate::error::{ConfigError, ConfigResult};

/// Configuration of one named provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProviderOptions {
    /// Disabled providers are skipped. Defaults to false.
    pub enabled: bool,
    /// Type identifier resolved by the [`ProviderFactory`].
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    /// Constructor parameters.
    pub parameters: HashMap<String, String>,
}

impl ProviderOptions {
    /// Creates enabled options for the given type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            enabled: true,
            kind: Some(kind.into()),
            parameters: HashMap::new(),
        }
    }

    /// Sets the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Adds a constructor parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

type Constructor =
    Arc<dyn Fn(&str, &HashMap<String, String>) -> ConfigResult<Arc<dyn Provider>> + Send + Sync>;

/// Resolves provider type identifiers to constructors.
///
/// Type identifiers are matched case-insensitively. The built-in types are
/// `console`, `file` (requires `FilePath`) and `tracing`.
#[derive(Clone)]
pub struct ProviderFactory {
    constructors: HashMap<String, Constructor>,
}

impl fmt::Debug for ProviderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.constructors.keys().collect();
        kinds.sort();
        f.debug_struct("ProviderFactory").field("kinds", &kinds).finish()
    }
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderFactory {
    /// Creates a factory knowing the built-in provider types.
    pub fn new() -> Self {
        Self::empty()
            .register(CONSOLE_PROVIDER, |name, _| {
                Ok(Arc::new(ConsoleProvider::new(name)) as Arc<dyn Provider>)
            })
            .register(FILE_PROVIDER, |name, params| {
                Ok(Arc::new(FileProvider::from_parameters(name, params)?) as Arc<dyn Provider>)
            })
            .register(TRACING_PROVIDER, |name, _| {
                Ok(Arc::new(TracingProvider::new(name)) as Arc<dyn Provider>)
            })
    }

    /// Creates a factory knowing no provider types.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registers a constructor for `kind`, replacing any existing one.
    ///
    /// The constructor receives the configured provider name and parameters.
    pub fn register<F>(mut self, kind: impl AsRef<str>, constructor: F) -> Self
    where
        F: Fn(&str, &HashMap<String, String>) -> ConfigResult<Arc<dyn Provider>>
            + Send
            + Sync
            + 'static,
    {
        self.constructors
            .insert(kind.as_ref().to_ascii_lowercase(), Arc::new(constructor));
        self
    }

    /// Returns true if `kind` can be constructed.
    pub fn knows(&self, kind: &str) -> bool {
        self.constructors.contains_key(&kind.to_ascii_lowercase())
    }

    /// Builds the provider described by `options`.
    ///
    /// Returns `Ok(None)` for disabled providers.
    pub fn create(&self, name: &str, options: &ProviderOptions) -> ConfigResult<Option<Arc<dyn Provider>>> {
        if !options.enabled {
            tracing::debug!(provider = %name, "Skipping disabled provider");
            return Ok(None);
        }

        let kind = options
            .kind
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingProviderType(name.to_string()))?;

        let constructor = self
            .constructors
            .get(&kind.to_ascii_lowercase())
            .ok_or_else(|| ConfigError::UnknownProviderType {
                name: name.to_string(),
                kind: kind.to_string(),
            })?;

        constructor(name, &options.parameters).map(Some)
    }

    /// Builds every enabled provider, ordered by name.
    ///
    /// Fails on the first misconfigured entry.
    pub fn create_all(
        &self,
        providers: &BTreeMap<String, ProviderOptions>,
    ) -> ConfigResult<Vec<Arc<dyn Provider>>> {
        let mut built = Vec::with_capacity(providers.len());
        for (name, options) in providers {
            if let Some(provider) = self.create(name, options)? {
                built.push(provider);
            }
        }
        Ok(built)
    }
}
