//! Assembly of an [`Interceptor`] from parts or from a configuration document.

use std::fmt;
use std::sync::Arc;

use super::core::Interceptor;
use crate::config::LogConfig;
use crate::constants::{HOST_ENV_VARS, UNKNOWN_HOST};
use crate::directive::{DirectiveRegistry, DirectiveResolver};
use crate::error::ConfigResult;
use crate::filter::{BaseMethodLookup, FilterEngine, LogFilterConfig};
use crate::lifecycle::{log_interceptor_init, log_no_providers, log_provider_registered};
use crate::sink::{Formatter, MessageFormatter, Provider, ProviderFactory};
use crate::value::ValueFormatter;

/// Host name from the environment, or a fixed fallback.
pub(crate) fn detect_host() -> String {
    HOST_ENV_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|host| !host.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}

/// Builder for [`Interceptor`].
///
/// Defaults: no directives, the default filter (enabled, Information),
/// [`MessageFormatter`], no providers, host name from the environment and
/// backtraces attached to fault descriptions.
#[must_use = "builders do nothing until `build` is called"]
pub struct InterceptorBuilder {
    registry: DirectiveRegistry,
    filter: FilterEngine,
    values: ValueFormatter,
    formatter: Arc<dyn Formatter>,
    providers: Vec<Arc<dyn Provider>>,
    host: Option<String>,
    backtraces: bool,
}

impl fmt::Debug for InterceptorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers: Vec<_> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("InterceptorBuilder")
            .field("directives", &self.registry.len())
            .field("filter", &self.filter)
            .field("providers", &providers)
            .field("host", &self.host)
            .field("backtraces", &self.backtraces)
            .finish_non_exhaustive()
    }
}

impl Default for InterceptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InterceptorBuilder {
    /// Creates a builder with defaults.
    pub fn new() -> Self {
        Self {
            registry: DirectiveRegistry::new(),
            filter: FilterEngine::default(),
            values: ValueFormatter::new(),
            formatter: Arc::new(MessageFormatter),
            providers: Vec::new(),
            host: None,
            backtraces: true,
        }
    }

    /// Applies a configuration document: filter settings plus every enabled
    /// provider, built through `factory`.
    pub fn from_config(config: &LogConfig, factory: &ProviderFactory) -> ConfigResult<Self> {
        let providers = config.build_providers(factory)?;
        Ok(Self::new()
            .filter(config.filter.clone())
            .providers(providers))
    }

    /// Sets the declared directives.
    pub fn directives(mut self, registry: DirectiveRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the filter configuration.
    pub fn filter(mut self, config: LogFilterConfig) -> Self {
        self.filter = self.filter.with_config(config);
        self
    }

    /// Sets the framework base operation lookup.
    pub fn base_methods(mut self, lookup: impl BaseMethodLookup + 'static) -> Self {
        self.filter = self.filter.with_base_methods(lookup);
        self
    }

    /// Sets the value formatter.
    pub fn value_formatter(mut self, values: ValueFormatter) -> Self {
        self.values = values;
        self
    }

    /// Sets the entry formatter.
    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Appends a provider to the fan-out.
    pub fn provider(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Appends shared providers to the fan-out.
    pub fn providers(mut self, providers: impl IntoIterator<Item = Arc<dyn Provider>>) -> Self {
        self.providers.extend(providers);
        self
    }

    /// Overrides the host name written into entries.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Controls whether fault descriptions carry a backtrace.
    ///
    /// The backtrace is taken where the interceptor observes the fault, and
    /// only when `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE` enables capture.
    pub fn backtraces(mut self, enabled: bool) -> Self {
        self.backtraces = enabled;
        self
    }

    /// Builds the interceptor.
    pub fn build(self) -> Interceptor {
        let config = self.filter.config();
        log_interceptor_init(
            config.enabled,
            config.minimum_level,
            self.registry.len(),
            self.providers.len(),
        );
        if self.providers.is_empty() {
            log_no_providers();
        }
        for (position, provider) in self.providers.iter().enumerate() {
            log_provider_registered(provider.name(), position);
        }

        Interceptor {
            resolver: DirectiveResolver::new(self.registry),
            filter: self.filter,
            values: self.values,
            formatter: self.formatter,
            providers: self.providers,
            host: self.host.unwrap_or_else(detect_host),
            backtraces: self.backtraces,
        }
    }
}
