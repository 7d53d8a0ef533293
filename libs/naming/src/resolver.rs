//! Placeholder resolution.
//!
//! Resolution runs in two phases whenever a pattern embeds `{app.namespace}`:
//!
//! 1. **Namespace phase**: the namespace pattern is resolved against the
//!    identity alone. Its own separator is always `.`, independent of where it
//!    will be embedded. The result is cached on the [`Identity`].
//! 2. **Embedding phase**: when the namespace is substituted into another
//!    pattern, every `.` inside the namespace value is rewritten to that
//!    pattern's delimiter. Literal characters of the embedding pattern are
//!    left untouched.
//!
//! One namespace definition therefore yields `-`-joined queue names and
//! `/`-joined metric namespaces.
//!
//! # Invariants
//!
//! - Resolution is deterministic: identical inputs yield identical output.
//! - Unknown placeholders are always errors, never passed through.
//! - Namespace recursion depth is one; self reference is an error.

use std::collections::BTreeMap;

use crate::error::NamingError;
use crate::identity::Identity;
use crate::pattern::{Pattern, Segment, Token};
use crate::placeholder::{CallPlaceholder, IdentityPath, Placeholder};

/// Caller-supplied values for call-scoped placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallValues(BTreeMap<CallPlaceholder, String>);

impl CallValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single value.
    pub fn of(placeholder: CallPlaceholder, value: impl Into<String>) -> Self {
        Self::new().with(placeholder, value)
    }

    pub fn with(mut self, placeholder: CallPlaceholder, value: impl Into<String>) -> Self {
        self.insert(placeholder, value);
        self
    }

    pub fn insert(&mut self, placeholder: CallPlaceholder, value: impl Into<String>) {
        self.0.insert(placeholder, value.into());
    }

    pub fn get(&self, placeholder: CallPlaceholder) -> Option<&str> {
        self.0.get(&placeholder).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything a pattern may be resolved against.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    identity: &'a Identity,
    scope: &'a [CallPlaceholder],
    values: &'a CallValues,
}

impl<'a> ResolveContext<'a> {
    /// A context that accepts the call-scoped placeholders in `scope`.
    pub fn new(identity: &'a Identity, scope: &'a [CallPlaceholder], values: &'a CallValues) -> Self {
        Self {
            identity,
            scope,
            values,
        }
    }

    /// A context that accepts identity-scoped placeholders only.
    pub fn identity_only(identity: &'a Identity) -> Self {
        static NO_VALUES: CallValues = CallValues(BTreeMap::new());
        Self::new(identity, &[], &NO_VALUES)
    }

    pub fn identity(&self) -> &'a Identity {
        self.identity
    }
}

/// A resolved token value, tagged with the phase it still needs.
enum Resolved<'a> {
    Plain(&'a str),
    Namespace(&'a str),
}

/// Resolves `pattern` against `ctx`.
///
/// `delimiter` replaces the dots of the namespace wherever `{app.namespace}`
/// is embedded.
///
/// # Examples
///
/// ```
/// use nameplate_naming::{resolve, CallPlaceholder, CallValues, Identity, Pattern, ResolveContext};
///
/// let identity = Identity::builder("production", "orders")
///     .tag("project", "logistics")
///     .namespace("{app.tags.project}.{app.env}")
///     .build();
/// let values = CallValues::of(CallPlaceholder::QueueId, "orders");
/// let ctx = ResolveContext::new(&identity, &[CallPlaceholder::QueueId], &values);
///
/// let pattern = Pattern::parse("{app.namespace}-{queueId}");
/// assert_eq!(resolve(&pattern, &ctx, "_").unwrap(), "logistics_production-orders");
/// ```
pub fn resolve(pattern: &Pattern, ctx: &ResolveContext<'_>, delimiter: &str) -> Result<String, NamingError> {
    let mut out = String::with_capacity(pattern.as_str().len() + 32);

    for segment in pattern.segments() {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Token(token) => match lookup(pattern, token, ctx)? {
                Resolved::Plain(value) => out.push_str(value),
                Resolved::Namespace(namespace) => embed_namespace(&mut out, namespace, delimiter),
            },
        }
    }

    Ok(out)
}

/// Namespace phase: resolves a namespace pattern against the identity only,
/// keeping `.` as its separator.
pub(crate) fn resolve_namespace(pattern: &Pattern, identity: &Identity) -> Result<String, NamingError> {
    let mut out = String::with_capacity(pattern.as_str().len() + 16);

    for segment in pattern.segments() {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Token(token) => {
                check_terminated(pattern, token)?;
                match token.placeholder() {
                    Some(Placeholder::Identity(IdentityPath::Namespace)) => {
                        return Err(NamingError::NamespaceCycle {
                            pattern: pattern.as_str().to_string(),
                        });
                    }
                    Some(Placeholder::Identity(path)) => {
                        out.push_str(identity_value(pattern, token, identity, &path)?)
                    }
                    Some(Placeholder::Call(_)) | None => return Err(unknown(pattern, token)),
                }
            }
        }
    }

    Ok(out)
}

/// Embedding phase: appends the namespace with its dots rewritten.
fn embed_namespace(out: &mut String, namespace: &str, delimiter: &str) {
    let mut parts = namespace.split('.');
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        out.push_str(delimiter);
        out.push_str(part);
    }
}

fn lookup<'a>(pattern: &Pattern, token: &Token, ctx: &ResolveContext<'a>) -> Result<Resolved<'a>, NamingError> {
    check_terminated(pattern, token)?;

    match token.placeholder() {
        Some(Placeholder::Identity(IdentityPath::Namespace)) => {
            ctx.identity.namespace().map(Resolved::Namespace)
        }
        Some(Placeholder::Identity(path)) => {
            identity_value(pattern, token, ctx.identity, &path).map(Resolved::Plain)
        }
        Some(Placeholder::Call(call)) if ctx.scope.contains(&call) => ctx
            .values
            .get(call)
            .map(Resolved::Plain)
            .ok_or_else(|| NamingError::MissingValue {
                pattern: pattern.as_str().to_string(),
                path: token.path.clone(),
            }),
        Some(Placeholder::Call(_)) | None => Err(unknown(pattern, token)),
    }
}

fn identity_value<'a>(
    pattern: &Pattern,
    token: &Token,
    identity: &'a Identity,
    path: &IdentityPath,
) -> Result<&'a str, NamingError> {
    match path {
        IdentityPath::Env => Ok(identity.env()),
        IdentityPath::Name => Ok(identity.name()),
        IdentityPath::Tag(key) => identity.tag(key).ok_or_else(|| unknown(pattern, token)),
        IdentityPath::Namespace => identity.namespace(),
    }
}

fn check_terminated(pattern: &Pattern, token: &Token) -> Result<(), NamingError> {
    if token.terminated {
        Ok(())
    } else {
        Err(NamingError::UnterminatedPlaceholder {
            pattern: pattern.as_str().to_string(),
            offset: token.span.start,
        })
    }
}

fn unknown(pattern: &Pattern, token: &Token) -> NamingError {
    NamingError::UnknownPlaceholder {
        pattern: pattern.as_str().to_string(),
        path: token.path.clone(),
    }
}
