//! Per-kind naming patterns.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::NamingError;
use crate::identity::Identity;
use crate::kind::ResourceKind;
use crate::pattern::Pattern;
use crate::resolver::{resolve, CallValues, ResolveContext};

/// A configured pattern and the delimiter it embeds the namespace with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPattern {
    pattern: Pattern,
    delimiter: String,
}

impl NamingPattern {
    pub fn new(pattern: impl Into<String>, delimiter: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::parse(pattern),
            delimiter: delimiter.into(),
        }
    }

    /// The built-in pattern for `kind`.
    pub fn default_for(kind: ResourceKind) -> Self {
        Self::new(kind.default_pattern(), kind.default_delimiter())
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

/// Naming patterns keyed by resource kind.
///
/// Populated during startup and read-only afterwards. Resolution delegates to
/// [`resolve`], with the registry's identity as the identity-scoped context and
/// the kind's declared call scope.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    identity: Arc<Identity>,
    patterns: BTreeMap<ResourceKind, NamingPattern>,
}

impl PatternRegistry {
    /// Creates an empty registry.
    pub fn new(identity: Arc<Identity>) -> Self {
        Self {
            identity,
            patterns: BTreeMap::new(),
        }
    }

    /// Creates a registry with every kind's default pattern.
    pub fn with_defaults(identity: Arc<Identity>) -> Self {
        let mut registry = Self::new(identity);
        for kind in ResourceKind::ALL {
            registry.insert(kind, NamingPattern::default_for(kind));
        }
        registry
    }

    /// Registers a pattern, returning the one it replaces.
    pub fn register(
        &mut self,
        kind: ResourceKind,
        pattern: impl Into<String>,
        delimiter: impl Into<String>,
    ) -> Option<NamingPattern> {
        self.insert(kind, NamingPattern::new(pattern, delimiter))
    }

    pub fn insert(&mut self, kind: ResourceKind, pattern: NamingPattern) -> Option<NamingPattern> {
        self.patterns.insert(kind, pattern)
    }

    pub fn identity(&self) -> &Arc<Identity> {
        &self.identity
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&NamingPattern> {
        self.patterns.get(&kind)
    }

    pub fn contains(&self, kind: ResourceKind) -> bool {
        self.patterns.contains_key(&kind)
    }

    /// Registered patterns in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &NamingPattern)> {
        self.patterns.iter().map(|(kind, pattern)| (*kind, pattern))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Resolves the name of a `kind` resource.
    pub fn resolve_name(&self, kind: ResourceKind, values: &CallValues) -> Result<String, NamingError> {
        let naming = self.get(kind).ok_or(NamingError::NotConfigured { kind })?;
        let ctx = ResolveContext::new(&self.identity, kind.call_scope(), values);
        resolve(naming.pattern(), &ctx, naming.delimiter())
    }
}
