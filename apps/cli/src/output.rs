//! Rendering of pricing results.

use comanda_core::{AppliedDiscount, Money, PricingBreakdown};
use serde::Serialize;

use crate::config::{CliConfig, OutputFormat};
use crate::error::CliResult;

/// JSON view of a breakdown, amounts as decimals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BreakdownView<'a> {
    subtotal: f64,
    discount: &'a AppliedDiscount,
    discount_amount: f64,
    total: f64,
}

#[derive(Debug, Serialize)]
struct TotalView {
    total: f64,
}

/// Formats an amount with the configured symbol, e.g. `$35.00`.
pub fn format_money(amount: Money, symbol: &str) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!(
        "{}{}{}.{:02}",
        sign,
        symbol,
        amount.units().abs(),
        amount.cents_part()
    )
}

pub fn render_total(total: Money, config: &CliConfig) -> CliResult<String> {
    match config.output_format {
        OutputFormat::Plain => Ok(format_money(total, &config.currency_symbol)),
        OutputFormat::Json => Ok(serde_json::to_string(&TotalView {
            total: total.as_decimal(),
        })?),
    }
}

pub fn render_breakdown(breakdown: &PricingBreakdown, config: &CliConfig) -> CliResult<String> {
    match config.output_format {
        OutputFormat::Plain => {
            let symbol = config.currency_symbol.as_str();
            let mut lines = vec![format!(
                "subtotal: {}",
                format_money(breakdown.subtotal, symbol)
            )];
            if breakdown.discount != AppliedDiscount::None {
                lines.push(format!(
                    "discount: {} (-{})",
                    breakdown.discount.label(),
                    format_money(breakdown.discount_amount, symbol)
                ));
            }
            lines.push(format!("total:    {}", format_money(breakdown.total, symbol)));
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&BreakdownView {
            subtotal: breakdown.subtotal.as_decimal(),
            discount: &breakdown.discount,
            discount_amount: breakdown.discount_amount.as_decimal(),
            total: breakdown.total.as_decimal(),
        })?),
    }
}
