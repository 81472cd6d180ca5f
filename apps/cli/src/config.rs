//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Command-line flags override what is loaded here.
//!
//! | Variable                  | Default | Meaning                     |
//! |---------------------------|---------|-----------------------------|
//! | `COMANDA_OUTPUT_FORMAT`   | `plain` | `plain` or `json`           |
//! | `COMANDA_CURRENCY_SYMBOL` | `$`     | Symbol used by plain output |
//!
//! Log filtering is configured separately through `RUST_LOG`.

use std::env;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const OUTPUT_FORMAT_VAR: &str = "COMANDA_OUTPUT_FORMAT";
pub const CURRENCY_SYMBOL_VAR: &str = "COMANDA_CURRENCY_SYMBOL";

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable amounts
    #[default]
    Plain,
    /// One JSON document per result
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue(OUTPUT_FORMAT_VAR.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => f.write_str("plain"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    pub output_format: OutputFormat,

    pub currency_symbol: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            output_format: OutputFormat::Plain,
            currency_symbol: "$".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment in
    /// production, a map in tests).
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CliConfig::default();

        let output_format = match lookup(OUTPUT_FORMAT_VAR) {
            Some(value) => value.parse()?,
            None => defaults.output_format,
        };

        let currency_symbol = lookup(CURRENCY_SYMBOL_VAR).unwrap_or(defaults.currency_symbol);
        if currency_symbol.chars().count() > 4 {
            return Err(ConfigError::InvalidValue(CURRENCY_SYMBOL_VAR.to_string()));
        }

        Ok(CliConfig {
            output_format,
            currency_symbol,
        })
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, output_format: Option<OutputFormat>) -> Self {
        if let Some(format) = output_format {
            self.output_format = format;
        }
        self
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
