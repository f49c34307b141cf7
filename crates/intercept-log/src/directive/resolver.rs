//! Directive lookup with precedence and caching.

use dashmap::DashMap;

use super::registry::{DirectiveRegistry, LoggingDirective};
use crate::call::{CallDescriptor, MethodId};

/// Where a resolved directive was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveSource {
    /// On the invoked method itself.
    Method,
    /// On the concrete type receiving the call.
    Type,
    /// On the interface method the invoked method implements.
    InterfaceMethod(String),
    /// On an implemented interface type.
    Interface(String),
}

/// A directive together with the declaration it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDirective {
    /// The applicable directive.
    pub directive: LoggingDirective,
    /// Where it was declared.
    pub source: DirectiveSource,
}

type CacheKey = (MethodId, String, Vec<String>);

/// Finds the directive that applies to a call.
///
/// Precedence, first hit wins:
///
/// 1. the invoked method
/// 2. the target type
/// 3. the matching method on each implemented interface, in declaration order
/// 4. each implemented interface type, in declaration order
///
/// Directives never merge. Results are cached per method identity, target
/// type and interface list; the registry is frozen, so entries never go stale.
#[derive(Debug, Default)]
pub struct DirectiveResolver {
    registry: DirectiveRegistry,
    cache: DashMap<CacheKey, Option<ResolvedDirective>>,
}

impl DirectiveResolver {
    /// Freezes `registry` into a resolver.
    pub fn new(registry: DirectiveRegistry) -> Self {
        Self {
            registry,
            cache: DashMap::new(),
        }
    }

    /// Underlying declarations.
    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Returns the applicable directive, or `None` when the call must not be
    /// logged.
    pub fn resolve(&self, call: &CallDescriptor) -> Option<LoggingDirective> {
        self.resolve_with_source(call).map(|r| r.directive)
    }

    /// Like [`resolve`](Self::resolve), also reporting where the directive
    /// was declared.
    pub fn resolve_with_source(&self, call: &CallDescriptor) -> Option<ResolvedDirective> {
        let key = (
            call.method_id(),
            call.target_type().to_string(),
            call.interfaces().to_vec(),
        );
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let resolved = self.lookup(&key.0, &key.1, &key.2);
        self.cache.insert(key, resolved.clone());
        resolved
    }

    /// Number of cached resolutions.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn lookup(
        &self,
        method: &MethodId,
        target_type: &str,
        interfaces: &[String],
    ) -> Option<ResolvedDirective> {
        let found = |directive: LoggingDirective, source: DirectiveSource| ResolvedDirective {
            directive,
            source,
        };

        if let Some(d) = self.registry.directive_on_method(method) {
            return Some(found(d, DirectiveSource::Method));
        }

        if let Some(d) = self.registry.directive_on_type(target_type) {
            return Some(found(d, DirectiveSource::Type));
        }

        for iface in interfaces {
            if let Some(d) = self.registry.directive_on_method(&method.on_type(iface.as_str())) {
                return Some(found(d, DirectiveSource::InterfaceMethod(iface.clone())));
            }
        }

        interfaces.iter().find_map(|iface| {
            self.registry
                .directive_on_type(iface)
                .map(|d| found(d, DirectiveSource::Interface(iface.clone())))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::{MethodSignature, Parameter};
    use crate::level::Level;

    fn call() -> CallDescriptor {
        CallDescriptor::new(
            "shop::OrderService",
            MethodSignature::new("place").param(Parameter::new("id", "u64")),
        )
        .implements("shop::Orders")
    }

    #[test]
    fn test_resolution_is_cached() {
        let registry = DirectiveRegistry::new().on_type("shop::OrderService", Level::Debug);
        let resolver = DirectiveResolver::new(registry);

        assert_eq!(resolver.cached(), 0);
        assert_eq!(resolver.resolve(&call()), Some(Level::Debug.into()));
        assert_eq!(resolver.resolve(&call()), Some(Level::Debug.into()));
        assert_eq!(resolver.cached(), 1);
    }

    #[test]
    fn test_absent_is_cached_too() {
        let resolver = DirectiveResolver::new(DirectiveRegistry::new());
        assert_eq!(resolver.resolve(&call()), None);
        assert_eq!(resolver.cached(), 1);
    }

    #[test]
    fn test_interface_order_decides() {
        let registry = DirectiveRegistry::new()
            .on_type("b::Second", Level::Error)
            .on_type("a::First", Level::Trace);
        let resolver = DirectiveResolver::new(registry);

        let call = CallDescriptor::new("Svc", MethodSignature::new("go"))
            .implements("a::First")
            .implements("b::Second");
        let resolved = resolver.resolve_with_source(&call).unwrap();
        assert_eq!(resolved.directive.level(), Level::Trace);
        assert_eq!(resolved.source, DirectiveSource::Interface("a::First".into()));
    }
}
