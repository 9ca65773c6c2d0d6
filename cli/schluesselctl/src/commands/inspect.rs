//! Key inspection commands (ags, ars, to-ags).

use anyhow::Result;
use clap::Args;
use schluessel::{Ags, Ars, AssociationType, FormatError, KeyKind};
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use crate::error::CliError;
use crate::output::print_output;

use super::CommandContext;

#[derive(Debug, Args)]
pub struct KeysArgs {
    /// One or more keys.
    #[arg(required = true)]
    keys: Vec<String>,
}

/// Segment breakdown of a single key.
#[derive(Debug, Clone, Serialize, Tabled)]
struct KeyRow {
    #[tabled(rename = "Key")]
    key: String,

    #[tabled(rename = "Kind")]
    kind: &'static str,

    #[tabled(rename = "Bundesland")]
    state: String,

    #[tabled(rename = "Regierungsbezirk", display = "display_option")]
    district: Option<String>,

    #[tabled(rename = "Kreis", display = "display_option")]
    county: Option<String>,

    #[tabled(rename = "Verband", display = "display_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    association: Option<String>,

    #[tabled(rename = "Gemeinde", display = "display_option")]
    municipality: Option<String>,

    #[tabled(rename = "Verbandstyp", display = "display_association_type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    association_type: Option<AssociationType>,
}

impl From<&Ags> for KeyRow {
    fn from(ags: &Ags) -> Self {
        Self {
            key: ags.to_string(),
            kind: KeyKind::Ags.as_str(),
            state: ags.state().to_string(),
            district: ags.district().map(|s| s.to_string()),
            county: ags.county().map(|s| s.to_string()),
            association: None,
            municipality: ags.municipality().map(|s| s.to_string()),
            association_type: None,
        }
    }
}

impl From<&Ars> for KeyRow {
    fn from(ars: &Ars) -> Self {
        Self {
            key: ars.to_string(),
            kind: KeyKind::Ars.as_str(),
            state: ars.state().to_string(),
            district: ars.district().map(|s| s.to_string()),
            county: ars.county().map(|s| s.to_string()),
            association: ars.association().map(|s| s.to_string()),
            municipality: ars.municipality().map(|s| s.to_string()),
            association_type: ars.association_type(),
        }
    }
}

/// An ARS next to the AGS it reduces to.
#[derive(Debug, Clone, Serialize, Tabled)]
struct ReductionRow {
    #[tabled(rename = "ARS")]
    ars: String,

    #[tabled(rename = "AGS")]
    ags: String,

    #[tabled(rename = "Verband", display = "display_option")]
    dropped_association: Option<String>,
}

fn display_option(opt: &Option<String>) -> String {
    opt.as_deref().unwrap_or("-").to_string()
}

fn display_association_type(opt: &Option<AssociationType>) -> String {
    opt.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())
}

fn parse_all<T>(keys: &[String], parse: fn(&str) -> Result<T, FormatError>) -> Result<Vec<T>> {
    keys.iter()
        .map(|key| parse(key).map_err(|e| anyhow::Error::from(CliError::invalid_key(key, e))))
        .collect()
}

pub fn ags(ctx: &CommandContext, args: KeysArgs) -> Result<()> {
    let rows: Vec<KeyRow> = parse_all(&args.keys, Ags::parse)?
        .iter()
        .map(KeyRow::from)
        .collect();
    print_output(&rows, ctx.format);
    Ok(())
}

pub fn ars(ctx: &CommandContext, args: KeysArgs) -> Result<()> {
    let rows: Vec<KeyRow> = parse_all(&args.keys, Ars::parse)?
        .iter()
        .map(KeyRow::from)
        .collect();
    print_output(&rows, ctx.format);
    Ok(())
}

pub fn to_ags(ctx: &CommandContext, args: KeysArgs) -> Result<()> {
    let rows = reduce_all(&args.keys)?;
    print_output(&rows, ctx.format);
    Ok(())
}

fn reduce_all(keys: &[String]) -> Result<Vec<ReductionRow>> {
    let mut rows = Vec::with_capacity(keys.len());
    for (key, ars) in keys.iter().zip(parse_all(keys, Ars::parse)?) {
        let ags = ars
            .to_ags()
            .map_err(|e| CliError::invalid_key(key.as_str(), e))?;
        debug!(ars = %ars, ags = %ags, "reduced");
        rows.push(ReductionRow {
            ars: ars.to_string(),
            ags: ags.to_string(),
            dropped_association: ars.association().map(|s| s.to_string()),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ars_row_includes_association_type() {
        let ars = Ars::parse("010539105105").unwrap();
        let row = KeyRow::from(&ars);
        assert_eq!(row.key, "010539105105");
        assert_eq!(row.association.as_deref(), Some("9105"));
        assert_eq!(
            row.association_type,
            Some(AssociationType::MunicipalityFreeArea)
        );
    }

    #[test]
    fn ags_row_json_omits_association() {
        let ags = Ags::parse("14730").unwrap();
        let value = serde_json::to_value(KeyRow::from(&ags)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "key": "14730",
                "kind": "AGS",
                "state": "14",
                "district": "7",
                "county": "30",
                "municipality": null
            })
        );
    }

    #[test]
    fn parse_all_reports_offending_key() {
        let err = parse_all(&keys(&["14730070", "15730070"]), Ags::parse).unwrap_err();
        let cli_err = err.downcast_ref::<CliError>().unwrap();
        assert!(matches!(cli_err, CliError::InvalidKey { input, .. } if input == "15730070"));
    }

    #[test]
    fn reduce_all_drops_association() {
        let rows = reduce_all(&keys(&["147300070070", "147300070"])).unwrap();
        assert_eq!(rows[0].ags, "14730070");
        assert_eq!(rows[0].dropped_association.as_deref(), Some("0070"));
        assert_eq!(rows[1].ags, "14730");
    }

    #[test]
    fn table_renders_placeholders() {
        let ags = Ags::parse("14").unwrap();
        let table = tabled::Table::new([KeyRow::from(&ags)]).to_string();
        assert!(table.contains("Bundesland"));
        assert!(table.contains('-'));
    }
}
