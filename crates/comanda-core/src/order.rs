//! # Order Record
//!
//! The order as the order service keeps it: a client name, the line items
//! added so far and an optional promo code.
//!
//! ## Order Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  create order ──────────► Order::new("Client")    line_items = []      │
//! │                                                                         │
//! │  add dish ──────────────► add_line_item(item)     push one unit        │
//! │                                                                         │
//! │  remove dish ───────────► remove_line_item(id)    drop EVERY unit      │
//! │                                                                         │
//! │  show total ────────────► snapshot() ──► pricing::price_order()        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing never sees the `Order` itself, only an [`OrderSnapshot`] copied
//! out of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::pricing::{compute_total, price_order};
use crate::types::{LineItem, OrderSnapshot, PricingBreakdown, PromoCodeRequest};
use crate::validation::ValidationResult;

/// A restaurant order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub client_name: String,

    /// One entry per ordered unit, in the order they were added.
    pub line_items: Vec<LineItem>,

    pub promo_code: Option<PromoCodeRequest>,

    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates an empty order for a client.
    pub fn new(client_name: impl Into<String>) -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.into(),
            line_items: Vec::new(),
            promo_code: None,
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of a dish or drink.
    ///
    /// No price check happens here: an inconsistent price is reported when
    /// the order is priced.
    pub fn add_line_item(&mut self, item: LineItem) {
        self.line_items.push(item);
    }

    /// Removes every unit with the given id.
    ///
    /// ## Returns
    /// How many line items were removed (0 if the id was not in the order).
    pub fn remove_line_item(&mut self, id: &str) -> usize {
        let before = self.line_items.len();
        self.line_items.retain(|item| item.id != id);
        before - self.line_items.len()
    }

    pub fn set_promo_code(&mut self, code: Option<PromoCodeRequest>) {
        self.promo_code = code;
    }

    /// Number of line items with the given id.
    pub fn quantity_of(&self, id: &str) -> usize {
        self.line_items.iter().filter(|item| item.id == id).count()
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Copies the priceable part of the order.
    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            client_name: Some(self.client_name.clone()),
            line_items: self.line_items.clone(),
            promo_code: self.promo_code.clone(),
        }
    }

    pub fn total(&self) -> ValidationResult<Money> {
        compute_total(&self.snapshot())
    }

    pub fn breakdown(&self) -> ValidationResult<PricingBreakdown> {
        price_order(&self.snapshot())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::PromoCode;

    #[test]
    fn test_new_order_is_empty() {
        let order = Order::new("Client");
        assert_eq!(order.client_name, "Client");
        assert!(order.is_empty());
        assert!(order.promo_code.is_none());
        assert!(uuid::Uuid::parse_str(&order.id).is_ok());
        assert_eq!(order.total(), Ok(Money::zero()));
    }

    #[test]
    fn test_orders_get_distinct_ids() {
        assert_ne!(Order::new("A").id, Order::new("A").id);
    }

    #[test]
    fn test_add_and_remove_line_items() {
        let mut order = Order::new("Client");
        order.add_line_item(LineItem::meal("dish1", 15));
        order.add_line_item(LineItem::meal("dish1", 15));
        order.add_line_item(LineItem::drink("dish2", 10));
        assert_eq!(order.quantity_of("dish1"), 2);

        assert_eq!(order.remove_line_item("dish1"), 2);
        assert_eq!(order.quantity_of("dish1"), 0);
        assert_eq!(order.line_items, vec![LineItem::drink("dish2", 10)]);

        assert_eq!(order.remove_line_item("missing"), 0);
    }

    #[test]
    fn test_total_follows_mutations() {
        let mut order = Order::new("Client");
        for _ in 0..3 {
            order.add_line_item(LineItem::meal("dish1", 15));
        }
        assert_eq!(order.total(), Ok(Money::from_units(30)));

        order.set_promo_code(Some(PromoCode::Bienvenida.into()));
        assert_eq!(order.total(), Err(ValidationError::PromoWithDiscount));

        order.remove_line_item("dish1");
        order.add_line_item(LineItem::meal("dish3", 30));
        order.add_line_item(LineItem::drink("dish4", 20));
        let breakdown = order.breakdown().unwrap();
        assert_eq!(breakdown.total, Money::from_units(35));
    }

    #[test]
    fn test_inconsistent_price_is_reported_on_pricing() {
        let mut order = Order::new("Client");
        order.add_line_item(LineItem::meal("dish1", 30));
        order.add_line_item(LineItem::meal("dish1", 25));
        assert_eq!(order.total(), Err(ValidationError::InconsistentPrices));
    }

    #[test]
    fn test_snapshot_carries_client_and_code() {
        let mut order = Order::new("Ana");
        order.add_line_item(LineItem::drink("dish1", 5));
        order.set_promo_code(Some("COMBO".into()));

        let snapshot = order.snapshot();
        assert_eq!(snapshot.client_name.as_deref(), Some("Ana"));
        assert_eq!(snapshot.line_items.len(), 1);
        assert_eq!(snapshot.promo_code, Some(PromoCodeRequest::from("COMBO")));
    }
}
