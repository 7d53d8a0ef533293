//! CLI commands.

mod check;
mod decode;
mod encode;
mod resolve;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nameplate_config::{LoadOptions, Settings, DEFAULT_ENV_PREFIX};
use tracing::debug;

use crate::config::default_config_file;
use crate::output::OutputFormat;

/// namectl - Check and exercise application naming configuration.
#[derive(Debug, Parser)]
#[command(name = "namectl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file. Repeat to layer files; later files win.
    #[arg(long = "config", short = 'c', global = true, value_name = "FILE")]
    config: Vec<PathBuf>,

    /// Prefix of configuration environment variables.
    #[arg(long, global = true, default_value = DEFAULT_ENV_PREFIX)]
    env_prefix: String,

    /// Ignore configuration environment variables.
    #[arg(long, global = true)]
    no_env: bool,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log level, used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate the configuration and list every registered pattern.
    Check(check::CheckCommand),

    /// Resolve the name of a resource.
    Resolve(resolve::ResolveCommand),

    /// Encode a model id as its canonical string.
    Encode(encode::EncodeCommand),

    /// Decode a canonical model id string.
    Decode(decode::DecodeCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn log_json(&self) -> bool {
        self.log_json
    }

    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        if let Commands::Version = self.command {
            println!("namectl {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }

        let options = self.load_options();
        debug!(files = ?options.files, env_prefix = ?options.env_prefix, "loading configuration");
        let settings = Settings::load(&options)?;

        let ctx = CommandContext {
            settings,
            format: self.format,
        };

        match self.command {
            Commands::Check(cmd) => cmd.run(ctx),
            Commands::Resolve(cmd) => cmd.run(ctx),
            Commands::Encode(cmd) => cmd.run(ctx),
            Commands::Decode(cmd) => cmd.run(ctx),
            Commands::Version => Ok(()),
        }
    }

    fn load_options(&self) -> LoadOptions {
        let files = if self.config.is_empty() {
            default_config_file().into_iter().collect()
        } else {
            self.config.clone()
        };

        LoadOptions {
            files,
            env_prefix: (!self.no_env).then(|| self.env_prefix.clone()),
            ..LoadOptions::default()
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub settings: Settings,
    pub format: OutputFormat,
}

/// Parses a `key=value` argument.
fn parse_key_value(input: &str) -> Result<(String, String), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{input}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{input}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("queueId=orders", "queueId", "orders")]
    #[case("project=a=b", "project", "a=b")]
    #[case("env=", "env", "")]
    fn parse_key_value_accepts(#[case] input: &str, #[case] key: &str, #[case] value: &str) {
        assert_eq!(
            parse_key_value(input).unwrap(),
            (key.to_string(), value.to_string())
        );
    }

    #[rstest]
    #[case("queueId")]
    #[case("=orders")]
    fn parse_key_value_rejects(#[case] input: &str) {
        assert!(parse_key_value(input).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "namectl", "check", "--config", "a.yaml", "-c", "b.toml", "--format", "json", "--no-env",
        ])
        .unwrap();

        assert_eq!(cli.config, vec![PathBuf::from("a.yaml"), PathBuf::from("b.toml")]);
        assert_eq!(cli.format, OutputFormat::Json);

        let options = cli.load_options();
        assert_eq!(options.files.len(), 2);
        assert_eq!(options.env_prefix, None);
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["namectl", "decode", "a.b"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.log_level(), "warn");
        assert!(!cli.log_json());
        assert_eq!(cli.load_options().env_prefix.as_deref(), Some("NAMEPLATE"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["namectl", "resolve", "bucket"]).is_err());
    }
}
