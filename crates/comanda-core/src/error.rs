//! # Error Types
//!
//! Domain-specific error types for comanda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comanda-core errors (this file)                                       │
//! │  ├── PricingError     - Anything that stops an order from being priced │
//! │  └── ValidationError  - Order document / business rule violations      │
//! │                                                                         │
//! │  CLI errors (apps/cli)                                                 │
//! │  └── CliError         - I/O, configuration, pricing                    │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → CliError → stderr              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every validation failure has a fixed, human-readable reason
//! 3. Errors are enum variants, never String
//! 4. No partial results: a caller gets a total or an error

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors returned by the pricing entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The order document could not be decoded as JSON at all.
    #[error("order document is not valid JSON: {0}")]
    Malformed(String),

    /// The order was decoded but violates a validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        PricingError::Malformed(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Order validation errors.
///
/// The `Display` text of each variant is the exact reason reported to the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The order is missing or is not a JSON object.
    #[error("order is null or invalid")]
    InvalidOrder,

    /// The line item field is missing or is not an array.
    #[error("line items must be a sequence")]
    LineItemsNotSequence,

    /// A line item is `null`, a scalar or an array.
    #[error("one or more line items are empty or not an object")]
    LineItemNotObject,

    /// A line item lacks `id`, `price` or `kind`, or carries a falsy value
    /// (`null`, `false`, `0`, `""`) in one of them.
    #[error("one or more line items are missing one or more values")]
    MissingValues,

    /// A line item carries a non-numeric price or an unknown kind.
    #[error("one or more line items contain one or more invalid values")]
    InvalidValues,

    /// Two line items share an id but not a price.
    #[error("one or more line items have inconsistent prices")]
    InconsistentPrices,

    /// A promo code was given for an order that already earned a bulk
    /// discount.
    #[error("promotional codes cannot be applied when a discount already exists in the order")]
    PromoWithDiscount,

    /// More than one promo code was given.
    #[error("only one promotional code can be applied per order")]
    MultiplePromoCodes,

    /// The promo code is not one of the known codes.
    #[error("the promotional code is invalid")]
    InvalidPromoCode,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
