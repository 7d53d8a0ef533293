//! Error types for pattern resolution.

use thiserror::Error;

use crate::kind::ResourceKind;

/// Errors that can occur when resolving a naming pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NamingError {
    /// The pattern references a path outside the known schema.
    #[error("unknown placeholder '{{{path}}}' in pattern '{pattern}'")]
    UnknownPlaceholder { pattern: String, path: String },

    /// A declared call-scoped placeholder was not supplied by the caller.
    #[error("no value supplied for placeholder '{{{path}}}' in pattern '{pattern}'")]
    MissingValue { pattern: String, path: String },

    /// Resolution was requested for a resource kind without a registered pattern.
    #[error("no naming pattern configured for resource kind '{kind}'")]
    NotConfigured { kind: ResourceKind },

    /// The namespace pattern references itself.
    #[error("namespace pattern '{pattern}' references app.namespace")]
    NamespaceCycle { pattern: String },

    /// A `{` was never closed.
    #[error("unterminated placeholder at byte {offset} in pattern '{pattern}'")]
    UnterminatedPlaceholder { pattern: String, offset: usize },
}

impl NamingError {
    /// Returns true if this error points at a path outside the schema.
    pub fn is_unknown_placeholder(&self) -> bool {
        matches!(self, NamingError::UnknownPlaceholder { .. })
    }

    /// Returns true if this error is a configuration problem that the startup
    /// validator would also have reported.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, NamingError::MissingValue { .. })
    }
}
