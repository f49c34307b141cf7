//! Membership lookup for framework base operations.

use std::collections::HashSet;

use crate::call::MethodId;

/// Membership lookup for framework base operations.
///
/// Answers whether a method identity belongs to a well-known base type whose
/// operations are framework plumbing rather than application logic. Keyed by
/// identity, so an application overload sharing a base method's name is not
/// excluded.
pub trait BaseMethodLookup: Send + Sync {
    /// Returns true if `method` is a known base operation.
    fn contains(&self, method: &MethodId) -> bool;
}

/// Lookup that knows no base operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBaseMethods;

impl BaseMethodLookup for NoBaseMethods {
    fn contains(&self, _method: &MethodId) -> bool {
        false
    }
}

/// Set of base operations, populated once at startup.
#[derive(Debug, Clone, Default)]
pub struct BaseMethodSet {
    methods: HashSet<MethodId>,
}

impl BaseMethodSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a base operation.
    pub fn with_method(mut self, method: MethodId) -> Self {
        self.methods.insert(method);
        self
    }

    /// Number of known base operations.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns true if no base operations are known.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl FromIterator<MethodId> for BaseMethodSet {
    fn from_iter<I: IntoIterator<Item = MethodId>>(iter: I) -> Self {
        Self {
            methods: iter.into_iter().collect(),
        }
    }
}

impl BaseMethodLookup for BaseMethodSet {
    fn contains(&self, method: &MethodId) -> bool {
        self.methods.contains(method)
    }
}
