//! Error types for the CLI.

use std::path::PathBuf;

use comanda_core::PricingError;

use crate::config::ConfigError;

/// CLI errors.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read order from stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Pricing(#[from] PricingError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Convenience type alias for Results with CliError.
pub type CliResult<T> = Result<T, CliError>;
