//! Out-of-band directive declarations.
//!
//! Directives are registered once at startup against a method identity or a
//! qualified type name, then frozen into a resolver.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::call::MethodId;
use crate::level::Level;

/// Declared intent to log an operation at a given level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoggingDirective {
    level: Level,
}

impl LoggingDirective {
    /// Creates a directive with the given level.
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Declared level.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl From<Level> for LoggingDirective {
    fn from(level: Level) -> Self {
        Self::new(level)
    }
}

/// Out-of-band table of declared directives.
///
/// Directives are attached to method identities or to qualified type names;
/// a type name may denote a concrete type or an interface. The registry is
/// populated at startup and then frozen into a
/// [`DirectiveResolver`](super::DirectiveResolver).
///
/// # Example
///
/// ```rust,ignore
/// let registry = DirectiveRegistry::new()
///     .on_type("shop::PaymentService", Level::Information)
///     .on_method(charge_id, Level::Warning);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectiveRegistry {
    methods: HashMap<MethodId, LoggingDirective>,
    types: HashMap<String, LoggingDirective>,
}

impl DirectiveRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a directive on a method.
    pub fn on_method(mut self, method: MethodId, directive: impl Into<LoggingDirective>) -> Self {
        self.declare_method(method, directive);
        self
    }

    /// Declares a directive on a type or interface.
    pub fn on_type(mut self, type_name: impl Into<String>, directive: impl Into<LoggingDirective>) -> Self {
        self.declare_type(type_name, directive);
        self
    }

    /// Declares a directive on a method, replacing any earlier declaration.
    pub fn declare_method(&mut self, method: MethodId, directive: impl Into<LoggingDirective>) {
        self.methods.insert(method, directive.into());
    }

    /// Declares a directive on a type, replacing any earlier declaration.
    pub fn declare_type(&mut self, type_name: impl Into<String>, directive: impl Into<LoggingDirective>) {
        self.types.insert(type_name.into(), directive.into());
    }

    /// Directive declared on exactly this method.
    pub fn directive_on_method(&self, method: &MethodId) -> Option<LoggingDirective> {
        self.methods.get(method).copied()
    }

    /// Directive declared on exactly this type.
    pub fn directive_on_type(&self, type_name: &str) -> Option<LoggingDirective> {
        self.types.get(type_name).copied()
    }

    /// Total number of declarations.
    pub fn len(&self) -> usize {
        self.methods.len() + self.types.len()
    }

    /// Returns true if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
