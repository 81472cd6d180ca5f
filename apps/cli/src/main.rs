//! # Comanda CLI
//!
//! Prices restaurant order documents from the command line.
//!
//! ## Usage
//! ```bash
//! # Total of an order file
//! comanda total order.json
//!
//! # Read the order from stdin, print the breakdown as JSON
//! cat order.json | comanda --format json breakdown
//!
//! # More logging
//! RUST_LOG=comanda=debug comanda total order.json
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Parse arguments
//! 3. Load configuration (env + flags)
//! 4. Read, parse and price the order
//! 5. Print the result to stdout

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use comanda_core::{parse_order_str, price_order, PricingBreakdown, PricingError};

mod config;
mod error;
mod output;

use crate::config::{CliConfig, OutputFormat};
use crate::error::{CliError, CliResult};

/// Restaurant order pricing
#[derive(Parser)]
#[command(name = "comanda")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format (overrides COMANDA_OUTPUT_FORMAT)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the payable total of an order
    Total {
        /// Order JSON file; reads stdin when omitted or "-"
        file: Option<PathBuf>,
    },

    /// Print subtotal, applied discount and total
    Breakdown {
        /// Order JSON file; reads stdin when omitted or "-"
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load()?.with_overrides(cli.format);
    info!(
        format = %config.output_format,
        currency = %config.currency_symbol,
        "Configuration loaded"
    );

    let rendered = match cli.command {
        Commands::Total { file } => {
            let breakdown = price_document(file.as_deref())?;
            output::render_total(breakdown.total, &config)?
        }
        Commands::Breakdown { file } => {
            let breakdown = price_document(file.as_deref())?;
            output::render_breakdown(&breakdown, &config)?
        }
    };

    println!("{rendered}");
    Ok(())
}

/// Reads an order document and prices it.
fn price_document(file: Option<&Path>) -> CliResult<PricingBreakdown> {
    let text = read_document(file)?;
    let breakdown = price_text(&text)?;

    info!(
        discount = %breakdown.discount.label(),
        subtotal = breakdown.subtotal.cents(),
        total = breakdown.total.cents(),
        "Order priced"
    );

    Ok(breakdown)
}

fn price_text(text: &str) -> Result<PricingBreakdown, PricingError> {
    let order = parse_order_str(text)?;
    debug!(
        line_items = order.line_items.len(),
        client = order.client_name.as_deref().unwrap_or("-"),
        "Order parsed"
    );
    Ok(price_order(&order)?)
}

fn read_document(file: Option<&Path>) -> CliResult<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            debug!(path = %path.display(), "Reading order file");
            fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            debug!("Reading order from stdin");
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(CliError::Stdin)?;
            Ok(text)
        }
    }
}
