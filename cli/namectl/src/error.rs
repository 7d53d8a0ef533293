//! Error display for the CLI.

use colored::Colorize;
use nameplate_config::SettingsError;
use nameplate_model_id::ModelIdError;
use nameplate_naming::{InvalidReason, NamingError, ValidationError};

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    for hint in hints(err) {
        eprintln!("\n{}", format!("Hint: {hint}").yellow());
    }
}

fn hints(err: &anyhow::Error) -> Vec<String> {
    if let Some(settings_err) = err.downcast_ref::<SettingsError>() {
        return match settings_err.report() {
            Some(report) => report.errors().iter().filter_map(validation_hint).collect(),
            None => vec!["Check the --config files and NAMEPLATE__* environment variables.".to_string()],
        };
    }

    if let Some(model_err) = err.downcast_ref::<ModelIdError>() {
        return match model_err {
            ModelIdError::DomainPatternNotConfigured => {
                vec!["Set app.model_id.domain_pattern in the configuration.".to_string()]
            }
            ModelIdError::InvalidSegment { .. } => {
                vec!["Values embedded in a model id must be non-empty and contain no '.'.".to_string()]
            }
            ModelIdError::Ambiguous { field, .. } => vec![format!(
                "The value of {field} contains text the domain pattern uses as a separator."
            )],
            _ => Vec::new(),
        };
    }

    if let Some(naming_err) = err.downcast_ref::<NamingError>() {
        return match naming_err {
            NamingError::NotConfigured { kind } => vec![format!(
                "Set {}.naming.{} or enable naming.defaults.",
                kind.config_section(),
                kind.pattern_key()
            )],
            NamingError::MissingValue { path, .. } => {
                vec![format!("Pass the value with --set {path}=<value>.")]
            }
            _ => Vec::new(),
        };
    }

    Vec::new()
}

fn validation_hint(err: &ValidationError) -> Option<String> {
    match &err.reason {
        InvalidReason::Unknown {
            suggestion: Some(suggestion),
        } => Some(format!(
            "{}: replace {{{}}} with {{{suggestion}}}.",
            err.subject, err.placeholder
        )),
        InvalidReason::Legacy { replacement } => Some(format!(
            "{}: replace {{{}}} with {{{replacement}}}.",
            err.subject, err.placeholder
        )),
        InvalidReason::UndefinedTag => Some(format!(
            "{}: define the tag under app.tags or remove {{{}}}.",
            err.subject, err.placeholder
        )),
        _ => None,
    }
}
