//! Batch validation of key files.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use schluessel::{Ags, Ars, FormatError};
use serde::Serialize;
use tabled::Tabled;
use tracing::{debug, info};

use crate::error::CliError;
use crate::output::{print_output, print_single, print_success, OutputFormat};

use super::CommandContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Ags,
    Ars,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Key kind to validate against.
    #[arg(long, value_enum, default_value = "ars")]
    kind: KindArg,

    /// File with one key per line. Reads stdin if omitted or "-".
    file: Option<PathBuf>,

    /// Only list invalid lines.
    #[arg(long)]
    invalid_only: bool,
}

/// Validation result for one input line.
#[derive(Debug, Clone, Serialize, Tabled)]
struct CheckRow {
    #[tabled(rename = "Line")]
    line: usize,

    #[tabled(rename = "Key")]
    key: String,

    #[tabled(rename = "Valid")]
    valid: bool,

    #[tabled(rename = "Detail")]
    detail: String,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    total: usize,
    invalid: usize,
    rows: Vec<CheckRow>,
}

/// A 1-based line number and its trimmed key, or the lossily decoded text
/// when the line is not valid UTF-8.
type KeyLine = (usize, Result<String, String>);

/// Reads keys from `reader`, skipping blank lines and `#` comments.
fn read_keys<R: BufRead>(reader: R) -> Result<Vec<KeyLine>> {
    let mut keys = Vec::new();
    for (idx, line) in reader.split(b'\n').enumerate() {
        let bytes = line.with_context(|| format!("Failed to read line {}", idx + 1))?;
        let key = match String::from_utf8(bytes) {
            Ok(line) => Ok(line.trim().to_string()),
            Err(e) => Err(String::from_utf8_lossy(e.as_bytes()).trim().to_string()),
        };
        if let Ok(key) = &key {
            if key.is_empty() || key.starts_with('#') {
                continue;
            }
        }
        keys.push((idx + 1, key));
    }
    Ok(keys)
}

fn validate(kind: KindArg, key: &str) -> Result<String, FormatError> {
    match kind {
        KindArg::Ags => Ags::parse(key).map(|ags| ags.to_string()),
        KindArg::Ars => Ars::parse(key).map(|ars| match ars.association_type() {
            Some(ty) => format!("{ars} ({ty})"),
            None => ars.to_string(),
        }),
    }
}

fn check_keys(kind: KindArg, keys: Vec<KeyLine>) -> CheckReport {
    let total = keys.len();
    let rows: Vec<CheckRow> = keys
        .into_iter()
        .map(|(line, key)| {
            let key = match key {
                Ok(key) => key,
                Err(lossy) => {
                    debug!(line, "line is not valid UTF-8");
                    return CheckRow {
                        line,
                        key: lossy,
                        valid: false,
                        detail: "line is not valid UTF-8".to_string(),
                    };
                }
            };
            check_key(kind, line, key)
        })
        .collect();
    let invalid = rows.iter().filter(|row| !row.valid).count();

    CheckReport {
        total,
        invalid,
        rows,
    }
}

fn check_key(kind: KindArg, line: usize, key: String) -> CheckRow {
    match validate(kind, &key) {
        Ok(detail) => CheckRow {
            line,
            key,
            valid: true,
            detail,
        },
        Err(e) => {
            debug!(line, key = %key, error = %e, "invalid key");
            CheckRow {
                line,
                key,
                valid: false,
                detail: e.to_string(),
            }
        }
    }
}

/// A failing batch is summarized once, by the returned error.
fn success_summary(report: &CheckReport) -> Option<String> {
    (report.invalid == 0).then(|| format!("all {} keys are valid", report.total))
}

pub fn run(ctx: &CommandContext, args: CheckArgs) -> Result<()> {
    let keys = match args.file.as_deref() {
        None => read_keys(io::stdin().lock())?,
        Some(path) if path.as_os_str() == "-" => read_keys(io::stdin().lock())?,
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_keys(BufReader::new(file))?
        }
    };

    info!(count = keys.len(), kind = ?args.kind, "checking keys");
    let mut report = check_keys(args.kind, keys);
    if args.invalid_only {
        report.rows.retain(|row| !row.valid);
    }

    match ctx.format {
        OutputFormat::Table => {
            print_output(&report.rows, ctx.format);
            if let Some(summary) = success_summary(&report) {
                print_success(&summary);
            }
        }
        OutputFormat::Json => print_single(&report),
    }

    if report.invalid > 0 {
        return Err(CliError::InvalidKeys {
            invalid: report.invalid,
            total: report.total,
        }
        .into());
    }
    Ok(())
}
