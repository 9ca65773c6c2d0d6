//! Error handling and display for the CLI.

use colored::Colorize;
use schluessel::{FormatError, KeyKind, SegmentKind};
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{input:?}: {source}")]
    InvalidKey {
        input: String,
        #[source]
        source: FormatError,
    },

    #[error("{invalid} of {total} keys are invalid")]
    InvalidKeys { invalid: usize, total: usize },
}

impl CliError {
    pub fn invalid_key(input: impl Into<String>, source: FormatError) -> Self {
        Self::InvalidKey {
            input: input.into(),
            source,
        }
    }
}

/// Describes what a valid segment looks like.
fn segment_rule(segment: SegmentKind) -> &'static str {
    match segment {
        SegmentKind::State => "Bundesland must be 01 to 14",
        SegmentKind::District => "Regierungsbezirk must be a single digit",
        SegmentKind::County => "Kreis must be two digits",
        SegmentKind::Association => "Verband must be four digits starting with 0, 5 or 9",
        SegmentKind::Municipality => "Gemeinde must be three digits",
    }
}

fn shape_rule(kind: KeyKind) -> &'static str {
    match kind {
        KeyKind::Ags => "An AGS is 2 to 8 digits with no spaces or separators.",
        KeyKind::Ars => "An ARS is 2 to 12 digits with no spaces or separators.",
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::InvalidKey { source, .. } if source.is_shape_error() => {
                eprintln!("\n{}", format!("Hint: {}", shape_rule(source.kind())).yellow());
            }
            CliError::InvalidKey { source, .. } => {
                if let Some(segment) = source.segment() {
                    eprintln!("\n{}", format!("Hint: {}.", segment_rule(segment)).yellow());
                }
            }
            CliError::InvalidKeys { .. } => {}
        }
    }
}
