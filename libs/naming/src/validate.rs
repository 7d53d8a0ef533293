//! Startup validation of every configured pattern.
//!
//! Validation is purely syntactic: tokens are extracted and checked against
//! the placeholder schema of the pattern's subject without resolving any
//! value. Every problem across every pattern is collected so that one run
//! surfaces the whole misconfiguration.

use std::fmt;

use thiserror::Error;

use crate::identity::Identity;
use crate::kind::ResourceKind;
use crate::pattern::{Pattern, Token};
use crate::placeholder::{legacy_replacement, tag_prefix_typo, IdentityPath, Placeholder};
use crate::registry::NamingPattern;

/// What a validated pattern belongs to. Each subject has its own schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternSubject {
    /// `app.namespace`: identity-scoped paths except the namespace itself.
    Namespace,
    /// A resource kind: identity-scoped paths plus the kind's call scope.
    Resource(ResourceKind),
    /// `app.model_id.domain_pattern`: env, name and tags only.
    DomainPattern,
}

impl fmt::Display for PatternSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSubject::Namespace => f.write_str("app.namespace"),
            PatternSubject::Resource(kind) => write!(f, "{kind}"),
            PatternSubject::DomainPattern => f.write_str("app.model_id.domain_pattern"),
        }
    }
}

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// Not a placeholder path at all.
    Unknown { suggestion: Option<String> },
    /// A bare placeholder from the pre-namespace naming scheme.
    Legacy { replacement: &'static str },
    /// `app.tags.<key>` for a key the identity does not define.
    UndefinedTag,
    /// A valid path outside this subject's schema.
    NotAllowed,
    /// `app.namespace` inside the namespace pattern.
    SelfReference,
    /// `{` without a closing `}`.
    Unterminated,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::Unknown { suggestion: None } => f.write_str("unknown placeholder"),
            InvalidReason::Unknown {
                suggestion: Some(suggestion),
            } => write!(f, "unknown placeholder, did you mean {{{suggestion}}}?"),
            InvalidReason::Legacy { replacement } => {
                write!(f, "legacy placeholder, use {{{replacement}}} instead")
            }
            InvalidReason::UndefinedTag => f.write_str("tag is not defined in app.tags"),
            InvalidReason::NotAllowed => f.write_str("placeholder not allowed here"),
            InvalidReason::SelfReference => f.write_str("namespace cannot reference itself"),
            InvalidReason::Unterminated => f.write_str("missing closing '}'"),
        }
    }
}

/// One invalid token in one configured pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{subject}: invalid placeholder '{placeholder}' in pattern '{pattern}': {reason}")]
pub struct ValidationError {
    pub subject: PatternSubject,
    pub pattern: String,
    pub placeholder: String,
    pub reason: InvalidReason,
}

/// Every validation error found at startup, reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Ok if `errors` is empty, the aggregated report otherwise.
    pub fn check(errors: Vec<ValidationError>) -> Result<(), ValidationReport> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid naming placeholder(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Checks one pattern against the schema of `subject`.
pub fn check_pattern(subject: PatternSubject, pattern: &Pattern, identity: &Identity) -> Vec<ValidationError> {
    pattern
        .tokens()
        .filter_map(|token| {
            classify(subject, token, identity).map(|reason| ValidationError {
                subject,
                pattern: pattern.as_str().to_string(),
                placeholder: token.path.clone(),
                reason,
            })
        })
        .collect()
}

/// Validates the identity's namespace and every registered pattern.
///
/// An empty result means the configuration may be used. Errors are ordered
/// by subject (namespace first), then by position within the pattern.
pub fn validate_all<'a, I>(identity: &Identity, patterns: I) -> Vec<ValidationError>
where
    I: IntoIterator<Item = (ResourceKind, &'a NamingPattern)>,
{
    let mut errors = check_pattern(PatternSubject::Namespace, identity.namespace_pattern(), identity);
    for (kind, naming) in patterns {
        errors.extend(check_pattern(
            PatternSubject::Resource(kind),
            naming.pattern(),
            identity,
        ));
    }
    errors
}

fn classify(subject: PatternSubject, token: &Token, identity: &Identity) -> Option<InvalidReason> {
    if !token.terminated {
        return Some(InvalidReason::Unterminated);
    }

    let Some(placeholder) = Placeholder::parse(&token.path) else {
        return Some(match legacy_replacement(&token.path) {
            Some(replacement) => InvalidReason::Legacy { replacement },
            None => InvalidReason::Unknown {
                suggestion: tag_prefix_typo(&token.path),
            },
        });
    };

    match (subject, placeholder) {
        (_, Placeholder::Identity(IdentityPath::Tag(key))) => {
            (!identity.tags().contains_key(&key)).then_some(InvalidReason::UndefinedTag)
        }
        (_, Placeholder::Identity(IdentityPath::Env | IdentityPath::Name)) => None,
        (PatternSubject::Namespace, Placeholder::Identity(IdentityPath::Namespace)) => {
            Some(InvalidReason::SelfReference)
        }
        (PatternSubject::Resource(_), Placeholder::Identity(IdentityPath::Namespace)) => None,
        (PatternSubject::Resource(kind), Placeholder::Call(call)) => {
            (!kind.call_scope().contains(&call)).then_some(InvalidReason::NotAllowed)
        }
        (PatternSubject::DomainPattern, Placeholder::Identity(IdentityPath::Namespace))
        | (PatternSubject::Namespace | PatternSubject::DomainPattern, Placeholder::Call(_)) => {
            Some(InvalidReason::NotAllowed)
        }
    }
}
