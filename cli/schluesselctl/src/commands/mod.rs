//! CLI commands.

mod check;
mod inspect;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// schluessel CLI - Inspect and validate German AGS and ARS keys.
#[derive(Debug, Parser)]
#[command(name = "sk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json). Defaults to SK_OUTPUT, then table.
    #[arg(long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse AGS keys (Amtlicher Gemeindeschlüssel) and show their segments.
    Ags(inspect::KeysArgs),

    /// Parse ARS keys (Amtlicher Regionalschlüssel) and show their segments.
    Ars(inspect::KeysArgs),

    /// Reduce ARS keys to their AGS.
    ToAgs(inspect::KeysArgs),

    /// Validate a file of keys, one per line.
    Check(check::CheckArgs),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self, config: Config) -> Result<()> {
        let format = match self.format.as_deref() {
            Some(format) => format.parse()?,
            None => config.output,
        };

        let ctx = CommandContext { format };

        match self.command {
            Commands::Ags(args) => inspect::ags(&ctx, args),
            Commands::Ars(args) => inspect::ars(&ctx, args),
            Commands::ToAgs(args) => inspect::to_ags(&ctx, args),
            Commands::Check(args) => check::run(&ctx, args),
            Commands::Version => {
                println!("sk {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["sk", "--format", "json", "ars", "147300070070"]).unwrap();
        assert_eq!(cli.format.as_deref(), Some("json"));
        assert!(matches!(cli.command, Commands::Ars(_)));

        let cli = Cli::try_parse_from(["sk", "to-ags", "147300070070", "010539105105"]).unwrap();
        assert!(matches!(cli.command, Commands::ToAgs(_)));

        let cli = Cli::try_parse_from(["sk", "check", "--kind", "ags", "keys.txt"]).unwrap();
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn requires_at_least_one_key() {
        assert!(Cli::try_parse_from(["sk", "ags"]).is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        let cli = Cli::try_parse_from(["sk", "--format", "xml", "version"]).unwrap();
        assert!(cli.run(Config::default()).is_err());
    }
}
