//! The per-process application identity.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::NamingError;
use crate::pattern::Pattern;
use crate::resolver;

/// Namespace pattern used when none is configured.
pub const DEFAULT_NAMESPACE_PATTERN: &str = "{app.env}.{app.name}";

/// Resolved application identity.
///
/// Built once at startup and never mutated afterwards; every accessor takes
/// `&self`, so an `Identity` can be shared across threads without locking.
/// The namespace pattern is resolved on first use and cached.
#[derive(Debug, Clone)]
pub struct Identity {
    env: String,
    name: String,
    tags: BTreeMap<String, String>,
    namespace: Pattern,
    resolved_namespace: OnceLock<Result<String, NamingError>>,
}

impl Identity {
    /// Creates an identity with no tags and the default namespace pattern.
    pub fn new(env: impl Into<String>, name: impl Into<String>) -> Self {
        Self::builder(env, name).build()
    }

    /// Starts building an identity.
    pub fn builder(env: impl Into<String>, name: impl Into<String>) -> IdentityBuilder {
        IdentityBuilder {
            env: env.into(),
            name: name.into(),
            tags: BTreeMap::new(),
            namespace: None,
        }
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// Looks up a single tag.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// The unresolved namespace pattern.
    pub fn namespace_pattern(&self) -> &Pattern {
        &self.namespace
    }

    /// The namespace resolved against this identity, dot-joined.
    ///
    /// The first call resolves and caches the result; later calls return the
    /// cached value (or the cached error).
    pub fn namespace(&self) -> Result<&str, NamingError> {
        self.resolved_namespace
            .get_or_init(|| resolver::resolve_namespace(&self.namespace, self))
            .as_deref()
            .map_err(Clone::clone)
    }
}

/// Builder for [`Identity`].
#[derive(Debug, Clone)]
pub struct IdentityBuilder {
    env: String,
    name: String,
    tags: BTreeMap<String, String>,
    namespace: Option<String>,
}

impl IdentityBuilder {
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tags<I, K, V>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags
            .extend(tags.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the namespace pattern (defaults to [`DEFAULT_NAMESPACE_PATTERN`]).
    pub fn namespace(mut self, pattern: impl Into<String>) -> Self {
        self.namespace = Some(pattern.into());
        self
    }

    pub fn build(self) -> Identity {
        let namespace = self
            .namespace
            .unwrap_or_else(|| DEFAULT_NAMESPACE_PATTERN.to_string());

        Identity {
            env: self.env,
            name: self.name,
            tags: self.tags,
            namespace: Pattern::parse(namespace),
            resolved_namespace: OnceLock::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_namespace() {
        let identity = Identity::new("production", "orders");
        assert_eq!(identity.namespace_pattern().as_str(), DEFAULT_NAMESPACE_PATTERN);
        assert_eq!(identity.namespace().unwrap(), "production.orders");
    }

    #[test]
    fn test_namespace_with_tags() {
        let identity = Identity::builder("production", "orders")
            .tag("project", "logistics")
            .namespace("{app.tags.project}.{app.env}")
            .build();
        assert_eq!(identity.namespace().unwrap(), "logistics.production");
        assert_eq!(identity.tag("project"), Some("logistics"));
        assert_eq!(identity.tag("family"), None);
    }

    #[test]
    fn test_namespace_error_is_cached() {
        let identity = Identity::builder("production", "orders")
            .namespace("{app.tags.project}.{app.env}")
            .build();
        let first = identity.namespace().unwrap_err();
        let second = identity.namespace().unwrap_err();
        assert_eq!(first, second);
        assert!(first.is_unknown_placeholder());
    }

    #[test]
    fn test_identity_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Identity>();
    }

    #[test]
    fn test_tags_bulk() {
        let identity = Identity::builder("dev", "svc")
            .tags([("family", "core"), ("group", "billing")])
            .build();
        assert_eq!(identity.tags().len(), 2);
        assert_eq!(identity.tag("group"), Some("billing"));
    }
}
