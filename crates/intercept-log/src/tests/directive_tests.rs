use crate::{
    CallDescriptor, DirectiveRegistry, DirectiveResolver, DirectiveSource, Level, MethodSignature,
    Parameter,
};

use proptest::prelude::*;

const TARGET: &str = "shop::PaymentService";
const IFACE: &str = "shop::Payments";

fn signature() -> MethodSignature {
    MethodSignature::new("charge")
        .param(Parameter::new("amount", "i64"))
        .param(Parameter::new("card_number", "String"))
        .returns("bool")
}

fn call() -> CallDescriptor {
    CallDescriptor::new(TARGET, signature()).implements(IFACE)
}

/// Declares directives at the requested places, each with a distinct level so
/// the winner is identifiable.
fn registry(method: bool, class: bool, iface_method: bool, iface: bool) -> DirectiveRegistry {
    let mut registry = DirectiveRegistry::new();
    if method {
        registry.declare_method(signature().method_id(TARGET), Level::Trace);
    }
    if class {
        registry.declare_type(TARGET, Level::Debug);
    }
    if iface_method {
        registry.declare_method(signature().method_id(IFACE), Level::Warning);
    }
    if iface {
        registry.declare_type(IFACE, Level::Error);
    }
    registry
}

fn expected(
    method: bool,
    class: bool,
    iface_method: bool,
    iface: bool,
) -> Option<(Level, DirectiveSource)> {
    if method {
        Some((Level::Trace, DirectiveSource::Method))
    } else if class {
        Some((Level::Debug, DirectiveSource::Type))
    } else if iface_method {
        Some((Level::Warning, DirectiveSource::InterfaceMethod(IFACE.into())))
    } else if iface {
        Some((Level::Error, DirectiveSource::Interface(IFACE.into())))
    } else {
        None
    }
}

#[test]
fn test_precedence_all_combinations() {
    for mask in 0u8..16 {
        let (method, class, iface_method, iface) =
            (mask & 1 != 0, mask & 2 != 0, mask & 4 != 0, mask & 8 != 0);
        let resolver = DirectiveResolver::new(registry(method, class, iface_method, iface));

        let actual = resolver
            .resolve_with_source(&call())
            .map(|r| (r.directive.level(), r.source));
        assert_eq!(
            actual,
            expected(method, class, iface_method, iface),
            "method={method} class={class} iface_method={iface_method} iface={iface}"
        );
    }
}

#[test]
fn test_none_present_means_absent() {
    let resolver = DirectiveResolver::new(registry(false, false, false, false));
    assert!(resolver.resolve(&call()).is_none());
}

#[test]
fn test_interface_method_must_match_overload() {
    let other = MethodSignature::new("charge").param(Parameter::new("amount", "i64"));
    let registry = DirectiveRegistry::new().on_method(other.method_id(IFACE), Level::Fatal);
    let resolver = DirectiveResolver::new(registry);
    assert!(resolver.resolve(&call()).is_none());
}

#[test]
fn test_interface_directive_ignored_without_implementation() {
    let registry = DirectiveRegistry::new().on_type(IFACE, Level::Error);
    let resolver = DirectiveResolver::new(registry);

    let bare = CallDescriptor::new(TARGET, signature());
    assert!(resolver.resolve(&bare).is_none());
    assert!(resolver.resolve(&call()).is_some());
}

#[test]
fn test_base_type_directive_does_not_apply_to_subtype() {
    let registry = DirectiveRegistry::new().on_type("shop::BaseService", Level::Error);
    let resolver = DirectiveResolver::new(registry);
    assert!(resolver.resolve(&call()).is_none());
}

#[test]
fn test_inherited_method_directive() {
    let sig = MethodSignature::new("health");
    let registry =
        DirectiveRegistry::new().on_method(sig.method_id("shop::BaseService"), Level::Debug);
    let resolver = DirectiveResolver::new(registry);

    let inherited = CallDescriptor::new(TARGET, sig).declared_by("shop::BaseService");
    assert_eq!(resolver.resolve(&inherited), Some(Level::Debug.into()));
}

proptest! {
    /// Property: A method-level directive always wins, whatever else is declared.
    #[test]
    fn prop_method_directive_wins(class: bool, iface_method: bool, iface: bool) {
        let resolver = DirectiveResolver::new(registry(true, class, iface_method, iface));
        let resolved = resolver.resolve_with_source(&call()).unwrap();
        prop_assert_eq!(resolved.source, DirectiveSource::Method);
        prop_assert_eq!(resolved.directive.level(), Level::Trace);
    }

    /// Property: Resolution is deterministic and unaffected by caching.
    #[test]
    fn prop_resolution_is_stable(method: bool, class: bool, iface_method: bool, iface: bool) {
        let resolver = DirectiveResolver::new(registry(method, class, iface_method, iface));
        let first = resolver.resolve_with_source(&call());
        let second = resolver.resolve_with_source(&call());
        prop_assert_eq!(first, second);
        prop_assert_eq!(resolver.cached(), 1);
    }
}
