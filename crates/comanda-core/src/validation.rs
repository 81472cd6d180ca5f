//! # Validation Module
//!
//! Turns untyped order documents into a typed [`OrderSnapshot`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Order service / CLI                                          │
//! │  └── Reads JSON text                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Shape checks (object? array? fields present?)                     │
//! │  ├── Value checks (numeric price, Meal/Drink kind)                      │
//! │  └── Cross-item checks (same id ⇒ same price)                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Promo code rules (need the bulk discount to be known)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line items are checked in document order and the first failing item
//! decides the error.
//!
//! ## Accepted Shape
//! ```json
//! {
//!   "clientName": "Client",
//!   "lineItems": [ { "id": "dish1", "price": 30, "kind": "Meal" } ],
//!   "promoCode": "BIENVENIDA"
//! }
//! ```
//! The order service's stored documents use `dishes`, `_id` and `type`;
//! those names are accepted as aliases.
//!
//! ## Falsy Values
//! A field holding `null`, `false`, `0` or `""` counts as missing. In
//! particular a line item priced at `0` is rejected as missing a value.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{PricingResult, ValidationError};
use crate::money::Money;
use crate::types::{ItemKind, LineItem, OrderSnapshot, PromoCodeRequest};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const LINE_ITEMS_KEYS: &[&str] = &["lineItems", "dishes"];
const ID_KEYS: &[&str] = &["id", "_id"];
const PRICE_KEYS: &[&str] = &["price"];
const KIND_KEYS: &[&str] = &["kind", "type"];
const CLIENT_NAME_KEY: &str = "clientName";
const PROMO_CODE_KEY: &str = "promoCode";

// =============================================================================
// Order Parsing
// =============================================================================

/// Parses JSON text into an order snapshot.
///
/// ## Example
/// ```rust
/// use comanda_core::validation::parse_order_str;
///
/// let order = parse_order_str(
///     r#"{ "dishes": [ { "_id": "dish1", "price": 30, "type": "Meal" } ] }"#,
/// ).unwrap();
/// assert_eq!(order.line_items.len(), 1);
/// assert_eq!(order.line_items[0].price.cents(), 3000);
/// ```
pub fn parse_order_str(text: &str) -> PricingResult<OrderSnapshot> {
    let value: Value = serde_json::from_str(text)?;
    Ok(parse_order(&value)?)
}

/// Parses a decoded JSON document into an order snapshot.
///
/// ## Errors
/// ```text
/// not an object                      → InvalidOrder
/// line items absent / not an array   → LineItemsNotSequence
/// item not an object                 → LineItemNotObject
/// id / price / kind absent or falsy  → MissingValues
/// bad price, kind or id type         → InvalidValues
/// same id, different price           → InconsistentPrices
/// ```
pub fn parse_order(value: &Value) -> ValidationResult<OrderSnapshot> {
    let order = value.as_object().ok_or(ValidationError::InvalidOrder)?;

    let items = lookup(order, LINE_ITEMS_KEYS)
        .and_then(Value::as_array)
        .ok_or(ValidationError::LineItemsNotSequence)?;

    // Compared on the document's numbers, before rounding to cents merges
    // sub-cent differences.
    let mut seen_prices: HashMap<String, f64> = HashMap::new();
    let mut line_items = Vec::with_capacity(items.len());

    for item in items {
        let line_item = parse_line_item(item)?;
        let raw_price = document_price(item).ok_or(ValidationError::InvalidValues)?;

        match seen_prices.get(&line_item.id) {
            Some(price) if *price != raw_price => {
                return Err(ValidationError::InconsistentPrices);
            }
            Some(_) => {}
            None => {
                seen_prices.insert(line_item.id.clone(), raw_price);
            }
        }

        line_items.push(line_item);
    }

    Ok(OrderSnapshot {
        client_name: order
            .get(CLIENT_NAME_KEY)
            .and_then(Value::as_str)
            .map(str::to_string),
        line_items,
        promo_code: order.get(PROMO_CODE_KEY).and_then(parse_promo_code),
    })
}

/// Parses a single line item, without cross-item checks.
pub fn parse_line_item(value: &Value) -> ValidationResult<LineItem> {
    let item = value.as_object().ok_or(ValidationError::LineItemNotObject)?;

    let (id, price, kind) = match (
        present(item, ID_KEYS),
        present(item, PRICE_KEYS),
        present(item, KIND_KEYS),
    ) {
        (Some(id), Some(price), Some(kind)) => (id, price, kind),
        _ => return Err(ValidationError::MissingValues),
    };

    let price = price
        .as_f64()
        .and_then(Money::from_decimal)
        .ok_or(ValidationError::InvalidValues)?;

    let kind = kind
        .as_str()
        .and_then(|k| k.parse::<ItemKind>().ok())
        .ok_or(ValidationError::InvalidValues)?;

    let id = match id {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(ValidationError::InvalidValues),
    };

    Ok(LineItem { id, price, kind })
}

/// Interprets the `promoCode` field.
///
/// ```text
/// absent / null / false / 0 / ""   → no promo code
/// "CODE"                           → Single("CODE")
/// [...] (any length)               → Multiple(...), never a valid code
/// anything else                    → Single(<value as text>)
/// ```
pub fn parse_promo_code(value: &Value) -> Option<PromoCodeRequest> {
    if is_falsy(value) {
        return None;
    }

    let request = match value {
        Value::String(code) => PromoCodeRequest::Single(code.clone()),
        Value::Array(codes) => PromoCodeRequest::Multiple(codes.iter().map(as_text).collect()),
        other => PromoCodeRequest::Single(other.to_string()),
    };

    Some(request)
}

// =============================================================================
// Helpers
// =============================================================================

/// First value found under any of `keys`.
fn lookup<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| object.get(*key))
}

/// Like [`lookup`], but treats falsy values as absent.
fn present<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    lookup(object, keys).filter(|value| !is_falsy(value))
}

/// The price of an already parsed line item, as written in the document.
fn document_price(item: &Value) -> Option<f64> {
    item.as_object()
        .and_then(|object| present(object, PRICE_KEYS))
        .and_then(Value::as_f64)
}

/// `null`, `false`, numeric zero and the empty string.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
