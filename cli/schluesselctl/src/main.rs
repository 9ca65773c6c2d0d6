//! schluesselctl (sk) - CLI for AGS and ARS keys
//!
//! Parses, reduces and batch-validates German municipality and regional keys.

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

    let config = config::Config::from_env()?;
    logging::init(&config);

    // Run the command
    if let Err(e) = cli.run(config) {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
