//! # Domain Types
//!
//! Core domain types used by the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │    LineItem     │   │  OrderSnapshot   │   │ PricingBreakdown│      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id             │   │  client_name     │   │  subtotal       │      │
//! │  │  price (Money)  │   │  line_items      │   │  discount       │      │
//! │  │  kind           │   │  promo_code      │   │  total          │      │
//! │  └─────────────────┘   └──────────────────┘   └─────────────────┘      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │    ItemKind     │   │ PromoCodeRequest │   │ AppliedDiscount │      │
//! │  │  Meal           │   │  Single          │   │  None           │      │
//! │  │  Drink          │   │  Multiple        │   │  Bulk           │      │
//! │  └─────────────────┘   └──────────────────┘   │  Promo          │      │
//! │                                                └─────────────────┘      │
//! │  ┌─────────────────┐                                                   │
//! │  │   PromoCode     │  BIENVENIDA, REFRESCATE, COMBO, PAREJA            │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An `OrderSnapshot` is built fresh for every pricing request and is never
//! mutated while it is priced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Item Kind
// =============================================================================

/// What a line item is. Closed set: anything else is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ItemKind {
    Meal,
    Drink,
}

impl ItemKind {
    /// Returns the wire name (`"Meal"` or `"Drink"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Meal => "Meal",
            ItemKind::Drink => "Drink",
        }
    }
}

impl FromStr for ItemKind {
    type Err = ();

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Meal" => Ok(ItemKind::Meal),
            "Drink" => Ok(ItemKind::Drink),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One ordered unit of a dish or drink.
///
/// Ids repeat: three units of the same dish are three line items with the
/// same `id`, and they must agree on `price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Menu identifier of the dish or drink.
    pub id: String,

    /// Unit price in cents.
    pub price: Money,

    pub kind: ItemKind,
}

impl LineItem {
    pub fn new(id: impl Into<String>, price: Money, kind: ItemKind) -> Self {
        LineItem {
            id: id.into(),
            price,
            kind,
        }
    }

    /// Shorthand for a meal priced in whole currency units.
    pub fn meal(id: impl Into<String>, units: i64) -> Self {
        LineItem::new(id, Money::from_units(units), ItemKind::Meal)
    }

    /// Shorthand for a drink priced in whole currency units.
    pub fn drink(id: impl Into<String>, units: i64) -> Self {
        LineItem::new(id, Money::from_units(units), ItemKind::Drink)
    }

    #[inline]
    pub fn is_meal(&self) -> bool {
        self.kind == ItemKind::Meal
    }

    #[inline]
    pub fn is_drink(&self) -> bool {
        self.kind == ItemKind::Drink
    }
}

// =============================================================================
// Promo Codes
// =============================================================================

/// The promo code(s) a customer asked for, before any check runs.
///
/// A request may name several codes; the engine rejects that, but it has to
/// be representable to be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum PromoCodeRequest {
    Single(String),
    Multiple(Vec<String>),
}

impl PromoCodeRequest {
    /// Number of codes requested.
    pub fn len(&self) -> usize {
        match self {
            PromoCodeRequest::Single(_) => 1,
            PromoCodeRequest::Multiple(codes) => codes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves the request to a known code.
    ///
    /// Only a single code string resolves. A collection never does, even
    /// with one element.
    pub fn resolve(&self) -> Option<PromoCode> {
        match self {
            PromoCodeRequest::Single(code) => code.parse().ok(),
            PromoCodeRequest::Multiple(_) => None,
        }
    }
}

impl From<&str> for PromoCodeRequest {
    fn from(code: &str) -> Self {
        PromoCodeRequest::Single(code.to_string())
    }
}

impl From<PromoCode> for PromoCodeRequest {
    fn from(code: PromoCode) -> Self {
        PromoCodeRequest::Single(code.as_str().to_string())
    }
}

/// The known promotional codes.
///
/// ## Effects
/// ```text
/// BIENVENIDA   30% off the subtotal
/// REFRESCATE   most expensive drink is free
/// COMBO        cheapest drink + cheapest meal are free (needs one of each)
/// PAREJA       two most expensive drinks + two most expensive meals are free
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromoCode {
    Bienvenida,
    Refrescate,
    Combo,
    Pareja,
}

impl PromoCode {
    /// Every known code.
    pub const ALL: [PromoCode; 4] = [
        PromoCode::Bienvenida,
        PromoCode::Refrescate,
        PromoCode::Combo,
        PromoCode::Pareja,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PromoCode::Bienvenida => "BIENVENIDA",
            PromoCode::Refrescate => "REFRESCATE",
            PromoCode::Combo => "COMBO",
            PromoCode::Pareja => "PAREJA",
        }
    }
}

impl FromStr for PromoCode {
    type Err = ();

    /// Exact, case-sensitive match against [`PromoCode::ALL`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromoCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order Snapshot
// =============================================================================

/// Input to the pricing engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    /// Display only; pricing ignores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    #[serde(default)]
    pub line_items: Vec<LineItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<PromoCodeRequest>,
}

impl OrderSnapshot {
    /// Creates a snapshot with no client name and no promo code.
    pub fn new(line_items: Vec<LineItem>) -> Self {
        OrderSnapshot {
            client_name: None,
            line_items,
            promo_code: None,
        }
    }

    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    pub fn with_promo_code(mut self, code: impl Into<PromoCodeRequest>) -> Self {
        self.promo_code = Some(code.into());
        self
    }

    /// Requests several codes at once (always rejected when priced with
    /// more than one).
    pub fn with_promo_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.promo_code = Some(PromoCodeRequest::Multiple(
            codes.into_iter().map(Into::into).collect(),
        ));
        self
    }
}

// =============================================================================
// Pricing Result
// =============================================================================

/// The one discount mechanism that shaped a total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppliedDiscount {
    /// Nothing applied; total equals subtotal.
    #[default]
    None,

    /// Automatic bulk discount earned by the group with this id.
    Bulk {
        #[serde(rename = "itemId")]
        item_id: String,
    },

    /// A promotional code.
    Promo { code: PromoCode },
}

impl AppliedDiscount {
    /// Short label for logs and plain-text output.
    pub fn label(&self) -> String {
        match self {
            AppliedDiscount::None => "none".to_string(),
            AppliedDiscount::Bulk { item_id } => format!("bulk ({item_id})"),
            AppliedDiscount::Promo { code } => format!("promo {code}"),
        }
    }
}

/// Full result of pricing an order.
///
/// `discount_amount` is always `subtotal - total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub subtotal: Money,
    pub discount: AppliedDiscount,
    pub discount_amount: Money,
    pub total: Money,
}

impl PricingBreakdown {
    /// Breakdown of an order with no line items.
    pub fn empty() -> Self {
        PricingBreakdown {
            subtotal: Money::zero(),
            discount: AppliedDiscount::None,
            discount_amount: Money::zero(),
            total: Money::zero(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
