//! Error types for loading settings.

use nameplate_model_id::ModelIdError;
use nameplate_naming::ValidationReport;
use thiserror::Error;

/// Errors that can occur when loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read, or a key has the wrong shape.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// One or more patterns failed startup validation.
    #[error("{0}")]
    Validation(#[from] ValidationReport),

    /// The model id codec could not be built.
    #[error("model id: {0}")]
    ModelId(#[from] ModelIdError),
}

impl SettingsError {
    /// The validation report, if this is a validation failure.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            SettingsError::Validation(report) => Some(report),
            SettingsError::ModelId(ModelIdError::InvalidDomainPattern(report)) => Some(report),
            _ => None,
        }
    }
}
