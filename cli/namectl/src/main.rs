//! namectl - check and exercise application naming configuration
//!
//! Loads the same configuration a service would, runs startup validation,
//! and resolves resource names or model ids from the command line.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod error;
mod logging;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_level(), cli.log_json());

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
