//! # comanda-core: Pure Pricing Logic for Comanda
//!
//! This crate prices restaurant orders. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comanda Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Order service / `comanda` CLI                          │   │
//! │  │    create order ──► add/remove dish ──► show total              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON order document                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ comanda-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐ │   │
//! │  │   │ validation │  │  pricing  │  │   types   │  │   money   │ │   │
//! │  │   │ JSON ──►   │  │ bulk ─or─ │  │ LineItem  │  │   Money   │ │   │
//! │  │   │ Snapshot   │  │ promo     │  │ PromoCode │  │  (cents)  │ │   │
//! │  │   └────────────┘  └───────────┘  └───────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO SHARED STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, OrderSnapshot, PromoCode, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Validation and pricing errors
//! - [`validation`] - Order document parsing
//! - [`pricing`] - The pricing engine
//! - [`order`] - Mutable order record kept by the order service
//!
//! ## Example Usage
//!
//! ```rust
//! use comanda_core::total_from_json;
//! use serde_json::json;
//!
//! let order = json!({
//!     "clientName": "Client",
//!     "dishes": [
//!         { "_id": "dish1", "price": 30, "type": "Meal" },
//!         { "_id": "dish2", "price": 20, "type": "Drink" }
//!     ],
//!     "promoCode": "BIENVENIDA"
//! });
//!
//! assert_eq!(total_from_json(&order).unwrap().cents(), 3500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{PricingError, PricingResult, ValidationError};
pub use money::Money;
pub use order::Order;
pub use pricing::{compute_total, price_order, total_from_json};
pub use types::*;
pub use validation::{parse_order, parse_order_str};

// =============================================================================
// Pricing Rules
// =============================================================================

/// Units of the same meal needed to earn a bulk discount.
pub const MEAL_BULK_MIN_COUNT: usize = 3;

/// Units of the same drink needed to earn a bulk discount.
pub const DRINK_BULK_MIN_COUNT: usize = 2;

/// Largest bulk discount a meal group can earn.
pub const MEAL_BULK_DISCOUNT_CAP: Money = Money::from_units(20);

/// Largest bulk discount a drink group can earn.
pub const DRINK_BULK_DISCOUNT_CAP: Money = Money::from_units(10);

/// BIENVENIDA discount in basis points (3000 = 30%).
pub const WELCOME_DISCOUNT_BPS: u32 = 3000;
