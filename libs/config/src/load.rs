//! Configuration sources.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use tracing::debug;

pub const DEFAULT_ENV_PREFIX: &str = "NAMEPLATE";

pub const DEFAULT_ENV_SEPARATOR: &str = "__";

/// Where configuration is read from.
///
/// Files are merged in the order given, each one overriding keys of the
/// previous ones. Environment variables override every file.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Configuration files; the format is taken from the extension.
    pub files: Vec<PathBuf>,

    /// Environment variable prefix. `None` disables the environment source.
    pub env_prefix: Option<String>,

    /// Separator between the prefix and nested key segments.
    pub env_separator: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            env_prefix: Some(DEFAULT_ENV_PREFIX.to_string()),
            env_separator: DEFAULT_ENV_SEPARATOR.to_string(),
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Reads files only.
    #[must_use]
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// Merges every source into one configuration tree.
    pub fn build(&self) -> Result<Config, ConfigError> {
        let mut builder = Config::builder();

        for path in &self.files {
            debug!(path = %path.display(), "adding configuration file");
            builder = builder.add_source(File::from(path.as_path()));
        }

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator(&self.env_separator)
                    .separator(&self.env_separator),
            );
        }

        builder.build()
    }
}
