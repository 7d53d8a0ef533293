//! Error types for model identifier encoding and decoding.

use nameplate_naming::ValidationReport;
use thiserror::Error;

/// Errors that can occur when encoding or decoding a model identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelIdError {
    /// No `app.model_id.domain_pattern` is configured.
    #[error("no model id domain pattern configured (app.model_id.domain_pattern)")]
    DomainPatternNotConfigured,

    /// The canonical string cannot be decoded with the configured pattern.
    #[error("malformed canonical model id '{canonical}': {reason}")]
    MalformedCanonicalId {
        canonical: String,
        reason: &'static str,
    },

    /// A value cannot be encoded without breaking decoding.
    #[error("invalid value '{value}' for {field}: must be non-empty and contain no '.'")]
    InvalidSegment { field: String, value: String },

    /// The encoded prefix would not decode back into the values encoded.
    #[error("ambiguous model id prefix '{prefix}': {field} would not decode to the encoded value")]
    Ambiguous { prefix: String, field: String },

    /// Neither the model id nor the identity provides a referenced field.
    #[error("no value for {0} in model id or application identity")]
    MissingField(String),

    /// The domain pattern failed startup validation.
    #[error("invalid domain pattern: {0}")]
    InvalidDomainPattern(ValidationReport),

    /// The domain pattern could not be compiled into a matcher.
    #[error("failed to compile domain pattern '{pattern}': {message}")]
    Compile { pattern: String, message: String },
}

impl ModelIdError {
    /// Returns true if decoding rejected the input string.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ModelIdError::MalformedCanonicalId { .. })
    }

    pub(crate) fn malformed(canonical: &str, reason: &'static str) -> Self {
        ModelIdError::MalformedCanonicalId {
            canonical: canonical.to_string(),
            reason,
        }
    }
}
