//! CLI configuration (env-driven).

use anyhow::{bail, Context, Result};

use crate::output::OutputFormat;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Default output format, overridden by `--format`.
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::default(),
            output: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let log_level = lookup("SK_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_format = match lookup("SK_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => bail!("SK_LOG_FORMAT must be 'text' or 'json', got '{other}'"),
        };

        let output = lookup("SK_OUTPUT")
            .map(|v| v.parse())
            .transpose()
            .context("SK_OUTPUT must be 'table' or 'json'.")?
            .unwrap_or(defaults.output);

        Ok(Self {
            log_level,
            log_format,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.output, OutputFormat::Table);
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("SK_LOG_LEVEL", "debug"),
            ("SK_LOG_FORMAT", "json"),
            ("SK_OUTPUT", "json"),
        ])
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(load(&[("SK_LOG_FORMAT", "xml")]).is_err());
        assert!(load(&[("SK_OUTPUT", "yaml")]).is_err());
    }
}
