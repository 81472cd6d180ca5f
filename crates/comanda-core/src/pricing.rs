//! # Pricing Engine
//!
//! Computes the payable total of an order snapshot.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  OrderSnapshot                                                          │
//! │       │                                                                 │
//! │       ├── no line items? ─────────────────────────────► total = 0      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  aggregate()            group by id, subtotal, best bulk discount      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  check_promo_code()     bulk + promo? too many codes? unknown code?    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_promo_code()     only when no bulk discount was earned          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  max(0, total)                                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An order gets at most ONE discount: the single largest bulk discount
//! across all groups, or one promo code, never both.
//!
//! ## Example
//! ```rust
//! use comanda_core::pricing::compute_total;
//! use comanda_core::types::{LineItem, OrderSnapshot};
//!
//! let order = OrderSnapshot::new(vec![
//!     LineItem::meal("dish1", 15),
//!     LineItem::meal("dish1", 15),
//!     LineItem::meal("dish1", 15),
//! ]);
//!
//! // 45 - min(15, 20)
//! assert_eq!(compute_total(&order).unwrap().cents(), 3000);
//! ```

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{PricingResult, ValidationError};
use crate::money::Money;
use crate::types::{
    AppliedDiscount, ItemKind, LineItem, OrderSnapshot, PricingBreakdown, PromoCode,
    PromoCodeRequest,
};
use crate::validation::{parse_order, ValidationResult};
use crate::{
    DRINK_BULK_DISCOUNT_CAP, DRINK_BULK_MIN_COUNT, MEAL_BULK_DISCOUNT_CAP, MEAL_BULK_MIN_COUNT,
    WELCOME_DISCOUNT_BPS,
};

// =============================================================================
// Item Groups
// =============================================================================

/// Line items sharing an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemGroup {
    pub id: String,
    pub count: usize,
    pub price: Money,
    /// Kind of the first line item seen with this id.
    pub kind: ItemKind,
}

impl ItemGroup {
    /// `count × price`, always added to the subtotal in full.
    pub fn contribution(&self) -> Money {
        self.price * self.count
    }

    /// Discount this group would earn on its own.
    ///
    /// ```text
    /// Meal,  count ≥ 3   → min(price, 20)
    /// Drink, count ≥ 2   → min(price, 10)
    /// otherwise          → 0
    /// ```
    pub fn bulk_discount(&self) -> Money {
        match self.kind {
            ItemKind::Meal if self.count >= MEAL_BULK_MIN_COUNT => {
                self.price.min(MEAL_BULK_DISCOUNT_CAP)
            }
            ItemKind::Drink if self.count >= DRINK_BULK_MIN_COUNT => {
                self.price.min(DRINK_BULK_DISCOUNT_CAP)
            }
            _ => Money::zero(),
        }
    }
}

/// Groups line items by id, ordered by id.
///
/// Fails with [`ValidationError::InconsistentPrices`] when two items with
/// the same id disagree on price.
pub fn group_line_items(items: &[LineItem]) -> ValidationResult<Vec<ItemGroup>> {
    let mut groups: BTreeMap<&str, ItemGroup> = BTreeMap::new();

    for item in items {
        match groups.get_mut(item.id.as_str()) {
            Some(group) if group.price != item.price => {
                return Err(ValidationError::InconsistentPrices);
            }
            Some(group) => group.count += 1,
            None => {
                groups.insert(
                    item.id.as_str(),
                    ItemGroup {
                        id: item.id.clone(),
                        count: 1,
                        price: item.price,
                        kind: item.kind,
                    },
                );
            }
        }
    }

    Ok(groups.into_values().collect())
}

// =============================================================================
// Aggregation
// =============================================================================

/// The bulk discount an order earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkDiscount {
    /// Group that earned it.
    pub item_id: String,
    /// Always positive.
    pub amount: Money,
}

/// Output of the aggregation phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub subtotal: Money,
    pub bulk: Option<BulkDiscount>,
}

impl Aggregation {
    pub fn bulk_amount(&self) -> Money {
        self.bulk
            .as_ref()
            .map(|bulk| bulk.amount)
            .unwrap_or_default()
    }
}

/// Computes the subtotal and the single largest bulk discount.
///
/// The bulk discount is the MAXIMUM over all groups, not the sum. On a tie
/// the group with the smallest id is reported.
pub fn aggregate(items: &[LineItem]) -> ValidationResult<Aggregation> {
    let groups = group_line_items(items)?;

    let subtotal = groups.iter().map(ItemGroup::contribution).sum();

    let mut bulk: Option<BulkDiscount> = None;
    for group in &groups {
        let amount = group.bulk_discount();
        let best = bulk.as_ref().map(|b| b.amount).unwrap_or_default();
        if amount > best {
            bulk = Some(BulkDiscount {
                item_id: group.id.clone(),
                amount,
            });
        }
    }

    Ok(Aggregation { subtotal, bulk })
}

// =============================================================================
// Promo Codes
// =============================================================================

/// Checks the promo code request against the aggregation result.
///
/// ## Rules (in order)
/// 1. A promo code on an order with a bulk discount → `PromoWithDiscount`
/// 2. More than one code → `MultiplePromoCodes`
/// 3. An unknown code → `InvalidPromoCode`
///
/// Returns the code to apply, if any.
pub fn check_promo_code(
    bulk: Option<&BulkDiscount>,
    request: Option<&PromoCodeRequest>,
) -> ValidationResult<Option<PromoCode>> {
    let Some(request) = request else {
        return Ok(None);
    };

    if bulk.is_some() {
        return Err(ValidationError::PromoWithDiscount);
    }

    if request.len() > 1 {
        return Err(ValidationError::MultiplePromoCodes);
    }

    request
        .resolve()
        .map(Some)
        .ok_or(ValidationError::InvalidPromoCode)
}

/// Applies a promo code to the subtotal.
///
/// The result is not floored; [`price_order`] does that.
pub fn apply_promo_code(code: PromoCode, subtotal: Money, items: &[LineItem]) -> Money {
    let drinks = sorted_prices(items, ItemKind::Drink);
    let meals = sorted_prices(items, ItemKind::Meal);

    match code {
        PromoCode::Bienvenida => subtotal.apply_percentage_discount(WELCOME_DISCOUNT_BPS),
        PromoCode::Refrescate => match drinks.last() {
            Some(most_expensive) => subtotal - *most_expensive,
            None => subtotal,
        },
        PromoCode::Combo => match (drinks.first(), meals.first()) {
            (Some(drink), Some(meal)) => subtotal - (*drink + *meal),
            _ => subtotal,
        },
        PromoCode::Pareja => subtotal - top_two(&drinks) - top_two(&meals),
    }
}

/// Unit prices of every line item of `kind`, cheapest first.
fn sorted_prices(items: &[LineItem], kind: ItemKind) -> Vec<Money> {
    let mut prices: Vec<Money> = items
        .iter()
        .filter(|item| item.kind == kind)
        .map(|item| item.price)
        .collect();
    prices.sort_unstable();
    prices
}

/// Sum of the (up to) two largest prices of an ascending list.
fn top_two(sorted: &[Money]) -> Money {
    sorted.iter().rev().take(2).sum()
}

// =============================================================================
// Entry Points
// =============================================================================

/// Prices an order and explains how the total was reached.
///
/// ## Example
/// ```rust
/// use comanda_core::pricing::price_order;
/// use comanda_core::types::{AppliedDiscount, LineItem, OrderSnapshot, PromoCode};
///
/// let order = OrderSnapshot::new(vec![
///     LineItem::meal("dish1", 30),
///     LineItem::drink("dish2", 20),
/// ])
/// .with_promo_code("BIENVENIDA");
///
/// let breakdown = price_order(&order).unwrap();
/// assert_eq!(breakdown.subtotal.cents(), 5000);
/// assert_eq!(breakdown.total.cents(), 3500);
/// assert_eq!(breakdown.discount, AppliedDiscount::Promo { code: PromoCode::Bienvenida });
/// ```
pub fn price_order(order: &OrderSnapshot) -> ValidationResult<PricingBreakdown> {
    if order.line_items.is_empty() {
        return Ok(PricingBreakdown::empty());
    }

    let aggregation = aggregate(&order.line_items)?;
    let promo = check_promo_code(aggregation.bulk.as_ref(), order.promo_code.as_ref())?;

    let (discount, total) = match (promo, aggregation.bulk) {
        (Some(code), _) => (
            AppliedDiscount::Promo { code },
            apply_promo_code(code, aggregation.subtotal, &order.line_items),
        ),
        (None, Some(bulk)) => (
            AppliedDiscount::Bulk {
                item_id: bulk.item_id,
            },
            aggregation.subtotal - bulk.amount,
        ),
        (None, None) => (AppliedDiscount::None, aggregation.subtotal),
    };

    let total = total.floor_at_zero();

    Ok(PricingBreakdown {
        subtotal: aggregation.subtotal,
        discount,
        discount_amount: aggregation.subtotal - total,
        total,
    })
}

/// Computes the payable total of an order.
pub fn compute_total(order: &OrderSnapshot) -> ValidationResult<Money> {
    price_order(order).map(|breakdown| breakdown.total)
}

/// Parses an untyped order document and computes its total.
pub fn total_from_json(value: &Value) -> PricingResult<Money> {
    let order = parse_order(value)?;
    Ok(compute_total(&order)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use proptest::prelude::*;
    use serde_json::json;

    fn repeat(item: LineItem, times: usize) -> Vec<LineItem> {
        vec![item; times]
    }

    fn total_of(items: Vec<LineItem>) -> i64 {
        compute_total(&OrderSnapshot::new(items)).unwrap().cents()
    }

    fn total_with_code(items: Vec<LineItem>, code: &str) -> ValidationResult<Money> {
        compute_total(&OrderSnapshot::new(items).with_promo_code(code))
    }

    // -------------------------------------------------------------------------
    // Grouping
    // -------------------------------------------------------------------------

    #[test]
    fn test_group_line_items() {
        let items = vec![
            LineItem::meal("dish2", 45),
            LineItem::meal("dish1", 30),
            LineItem::meal("dish1", 30),
            LineItem::drink("dish3", 20),
        ];

        let groups = group_line_items(&items).unwrap();
        let summary: Vec<(&str, usize)> = groups.iter().map(|g| (g.id.as_str(), g.count)).collect();
        assert_eq!(summary, vec![("dish1", 2), ("dish2", 1), ("dish3", 1)]);
        assert_eq!(groups[0].contribution(), Money::from_units(60));
    }

    #[test]
    fn test_group_line_items_rejects_inconsistent_prices() {
        let items = vec![LineItem::meal("dish1", 30), LineItem::meal("dish1", 25)];
        assert_eq!(
            group_line_items(&items),
            Err(ValidationError::InconsistentPrices)
        );
    }

    #[test]
    fn test_group_bulk_discount_thresholds() {
        let group = |kind, count, units| ItemGroup {
            id: "dish".to_string(),
            count,
            price: Money::from_units(units),
            kind,
        };

        assert_eq!(group(ItemKind::Meal, 2, 15).bulk_discount(), Money::zero());
        assert_eq!(group(ItemKind::Meal, 3, 15).bulk_discount(), Money::from_units(15));
        assert_eq!(group(ItemKind::Meal, 5, 60).bulk_discount(), Money::from_units(20));
        assert_eq!(group(ItemKind::Drink, 1, 8).bulk_discount(), Money::zero());
        assert_eq!(group(ItemKind::Drink, 2, 8).bulk_discount(), Money::from_units(8));
        assert_eq!(group(ItemKind::Drink, 2, 15).bulk_discount(), Money::from_units(10));
    }

    // -------------------------------------------------------------------------
    // Totals without discounts
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_order_is_free() {
        assert_eq!(total_of(vec![]), 0);

        let with_code = OrderSnapshot::new(vec![]).with_promo_codes(["X", "Y"]);
        assert_eq!(price_order(&with_code), Ok(PricingBreakdown::empty()));
    }

    #[test]
    fn test_sums_the_order_when_nothing_qualifies() {
        let items = vec![
            LineItem::meal("dish1", 30),
            LineItem::meal("dish1", 30),
            LineItem::meal("dish2", 45),
            LineItem::drink("dish3", 20),
            LineItem::drink("dish4", 25),
        ];

        let breakdown = price_order(&OrderSnapshot::new(items)).unwrap();
        assert_eq!(breakdown.total, Money::from_units(150));
        assert_eq!(breakdown.discount, AppliedDiscount::None);
        assert!(breakdown.discount_amount.is_zero());
    }

    // -------------------------------------------------------------------------
    // Bulk discounts
    // -------------------------------------------------------------------------

    #[test]
    fn test_three_repeated_meals() {
        assert_eq!(total_of(repeat(LineItem::meal("dish1", 15), 3)), 3000);

        let mut items = repeat(LineItem::meal("dish1", 15), 3);
        items.push(LineItem::meal("dish2", 30));
        items.push(LineItem::drink("dish3", 20));
        assert_eq!(total_of(items), 8000);
    }

    #[test]
    fn test_meal_discount_is_capped_at_twenty() {
        assert_eq!(total_of(repeat(LineItem::meal("dish1", 60), 3)), 16000);

        let mut items = repeat(LineItem::meal("dish1", 60), 3);
        items.push(LineItem::meal("dish2", 30));
        items.push(LineItem::drink("dish3", 20));
        assert_eq!(total_of(items), 21000);
    }

    #[test]
    fn test_two_repeated_drinks() {
        assert_eq!(total_of(repeat(LineItem::drink("dish1", 8), 2)), 800);

        let mut items = repeat(LineItem::drink("dish1", 8), 2);
        items.push(LineItem::drink("dish2", 15));
        items.push(LineItem::meal("dish3", 25));
        assert_eq!(total_of(items), 4800);
    }

    #[test]
    fn test_drink_discount_is_capped_at_ten() {
        assert_eq!(total_of(repeat(LineItem::drink("dish1", 15), 2)), 2000);

        let mut items = repeat(LineItem::drink("dish1", 15), 2);
        items.push(LineItem::drink("dish2", 15));
        items.push(LineItem::meal("dish3", 25));
        assert_eq!(total_of(items), 6000);
    }

    #[test]
    fn test_only_the_best_bulk_discount_applies() {
        let cases = [
            (LineItem::meal("dish1", 15), 3, LineItem::drink("dish2", 10), 2, 5000),
            (LineItem::meal("dish1", 30), 3, LineItem::drink("dish2", 10), 2, 9000),
            (LineItem::meal("dish1", 5), 3, LineItem::drink("dish2", 10), 2, 2500),
            (LineItem::meal("dish1", 5), 3, LineItem::drink("dish2", 15), 2, 3500),
            (LineItem::meal("dish1", 30), 3, LineItem::meal("dish2", 10), 3, 10000),
            (LineItem::drink("dish1", 20), 2, LineItem::drink("dish2", 8), 2, 4600),
        ];

        for (first, first_count, second, second_count, expected) in cases {
            let mut items = repeat(first, first_count);
            items.extend(repeat(second, second_count));
            assert_eq!(total_of(items), expected);
        }
    }

    #[test]
    fn test_bulk_breakdown_names_the_winning_group() {
        let mut items = repeat(LineItem::meal("dish1", 5), 3);
        items.extend(repeat(LineItem::drink("dish2", 15), 2));

        let breakdown = price_order(&OrderSnapshot::new(items)).unwrap();
        assert_eq!(
            breakdown.discount,
            AppliedDiscount::Bulk {
                item_id: "dish2".to_string()
            }
        );
        assert_eq!(breakdown.discount_amount, Money::from_units(10));
        assert_eq!(breakdown.subtotal - breakdown.total, breakdown.discount_amount);
    }

    #[test]
    fn test_bulk_tie_reports_smallest_id() {
        let mut items = repeat(LineItem::drink("b", 10), 2);
        items.extend(repeat(LineItem::drink("a", 10), 2));

        let aggregation = aggregate(&items).unwrap();
        assert_eq!(
            aggregation.bulk,
            Some(BulkDiscount {
                item_id: "a".to_string(),
                amount: Money::from_units(10)
            })
        );
        assert_eq!(aggregation.bulk_amount(), Money::from_units(10));
    }

    // -------------------------------------------------------------------------
    // Promo codes
    // -------------------------------------------------------------------------

    #[test]
    fn test_promo_code_rejected_when_bulk_discount_exists() {
        let meals = repeat(LineItem::meal("dish1", 15), 3);
        assert_eq!(
            total_with_code(meals, "BIENVENIDA"),
            Err(ValidationError::PromoWithDiscount)
        );

        let drinks = repeat(LineItem::drink("dish1", 8), 2);
        assert_eq!(
            total_with_code(drinks, "REFRESCATE"),
            Err(ValidationError::PromoWithDiscount)
        );
    }

    #[test]
    fn test_bulk_conflict_is_reported_before_multiple_codes() {
        let order = OrderSnapshot::new(repeat(LineItem::meal("dish1", 15), 3))
            .with_promo_codes(["BIENVENIDA", "REFRESCATE"]);
        assert_eq!(compute_total(&order), Err(ValidationError::PromoWithDiscount));
    }

    #[test]
    fn test_bienvenida() {
        let items = vec![LineItem::meal("dish1", 30), LineItem::drink("dish2", 20)];
        assert_eq!(total_with_code(items, "BIENVENIDA"), Ok(Money::from_units(35)));
    }

    #[test]
    fn test_refrescate() {
        let items = vec![LineItem::drink("dish1", 30), LineItem::drink("dish2", 20)];
        assert_eq!(total_with_code(items, "REFRESCATE"), Ok(Money::from_units(20)));

        let no_drinks = vec![LineItem::meal("dish1", 30)];
        assert_eq!(total_with_code(no_drinks, "REFRESCATE"), Ok(Money::from_units(30)));
    }

    #[test]
    fn test_combo() {
        let items = vec![
            LineItem::meal("dish1", 50),
            LineItem::meal("dish2", 35),
            LineItem::drink("dish3", 20),
            LineItem::drink("dish4", 15),
        ];
        assert_eq!(total_with_code(items, "COMBO"), Ok(Money::from_units(70)));

        let meals_only = vec![LineItem::meal("dish1", 50), LineItem::meal("dish2", 35)];
        assert_eq!(total_with_code(meals_only, "COMBO"), Ok(Money::from_units(85)));
    }

    #[test]
    fn test_pareja() {
        let items = vec![
            LineItem::meal("dish1", 50),
            LineItem::meal("dish2", 35),
            LineItem::meal("dish3", 25),
            LineItem::drink("dish4", 20),
            LineItem::drink("dish5", 15),
            LineItem::drink("dish6", 10),
        ];
        assert_eq!(total_with_code(items, "PAREJA"), Ok(Money::from_units(35)));

        // Fewer than two of a kind: takes what exists
        let items = vec![LineItem::meal("dish1", 50), LineItem::drink("dish2", 20)];
        assert_eq!(total_with_code(items, "PAREJA"), Ok(Money::zero()));
    }

    #[test]
    fn test_invalid_promo_code() {
        let items = vec![LineItem::meal("dish1", 30), LineItem::drink("dish2", 20)];
        assert_eq!(
            total_with_code(items.clone(), "INVALID"),
            Err(ValidationError::InvalidPromoCode)
        );

        let empty_list = OrderSnapshot::new(items).with_promo_codes(Vec::<String>::new());
        assert_eq!(compute_total(&empty_list), Err(ValidationError::InvalidPromoCode));
    }

    #[test]
    fn test_more_than_one_promo_code() {
        let order = OrderSnapshot::new(vec![
            LineItem::meal("dish1", 30),
            LineItem::drink("dish2", 20),
        ])
        .with_promo_codes(["BIENVENIDA", "REFRESCATE"]);

        let err = compute_total(&order).unwrap_err();
        assert_eq!(err, ValidationError::MultiplePromoCodes);
        assert_eq!(
            err.to_string(),
            "only one promotional code can be applied per order"
        );
    }

    #[test]
    fn test_single_element_code_list_is_invalid() {
        let order = OrderSnapshot::new(vec![LineItem::drink("dish1", 12)])
            .with_promo_codes(["REFRESCATE"]);
        assert_eq!(compute_total(&order), Err(ValidationError::InvalidPromoCode));

        let value = json!({
            "dishes": [
                { "_id": "dish1", "price": 30, "type": "Meal" },
                { "_id": "dish2", "price": 20, "type": "Drink" },
            ],
            "promoCode": ["BIENVENIDA"]
        });
        assert_eq!(
            total_from_json(&value),
            Err(PricingError::Validation(ValidationError::InvalidPromoCode))
        );
    }

    // -------------------------------------------------------------------------
    // JSON entry point
    // -------------------------------------------------------------------------

    #[test]
    fn test_total_from_json() {
        let value = json!({
            "clientName": "Client",
            "dishes": [
                { "_id": "dish1", "price": 30, "type": "Meal" },
                { "_id": "dish2", "price": 20, "type": "Drink" },
            ],
            "promoCode": "BIENVENIDA"
        });
        assert_eq!(total_from_json(&value), Ok(Money::from_units(35)));

        let value = json!({ "dishes": [ { "_id": "dish1", "price": 0, "type": "Meal" } ] });
        assert_eq!(
            total_from_json(&value),
            Err(PricingError::Validation(ValidationError::MissingValues))
        );
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    /// A menu of six dishes with fixed prices, and a sequence of picks.
    fn order_items() -> impl Strategy<Value = Vec<LineItem>> {
        (
            prop::collection::vec((1i64..8_000, any::<bool>()), 6),
            prop::collection::vec(0usize..6, 0..24),
        )
            .prop_map(|(menu, picks)| {
                picks
                    .into_iter()
                    .map(|pick| {
                        let (cents, is_meal) = menu[pick];
                        let kind = if is_meal { ItemKind::Meal } else { ItemKind::Drink };
                        LineItem::new(format!("dish{pick}"), Money::from_cents(cents), kind)
                    })
                    .collect()
            })
    }

    fn any_promo() -> impl Strategy<Value = Option<PromoCode>> {
        prop_oneof![Just(None), prop::sample::select(PromoCode::ALL.to_vec()).prop_map(Some)]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: whenever an order prices, the total is never negative
        /// and never above the subtotal.
        #[test]
        fn total_is_between_zero_and_subtotal(items in order_items(), promo in any_promo()) {
            let mut order = OrderSnapshot::new(items);
            if let Some(code) = promo {
                order = order.with_promo_code(code);
            }

            if let Ok(breakdown) = price_order(&order) {
                prop_assert!(!breakdown.total.is_negative());
                prop_assert!(breakdown.total <= breakdown.subtotal);
                prop_assert_eq!(breakdown.subtotal - breakdown.total, breakdown.discount_amount);
            }
        }

        /// Property: the order of line items never changes the outcome.
        #[test]
        fn permutation_does_not_change_result(items in order_items(), promo in any_promo()) {
            let mut order = OrderSnapshot::new(items.clone());
            let mut reversed = items.clone();
            reversed.reverse();
            let mut by_price = items;
            by_price.sort_by_key(|item| (item.price, item.id.clone()));

            let mut reversed_order = OrderSnapshot::new(reversed);
            let mut by_price_order = OrderSnapshot::new(by_price);
            if let Some(code) = promo {
                order = order.with_promo_code(code);
                reversed_order = reversed_order.with_promo_code(code);
                by_price_order = by_price_order.with_promo_code(code);
            }

            let expected = price_order(&order);
            prop_assert_eq!(price_order(&reversed_order), expected.clone());
            prop_assert_eq!(price_order(&by_price_order), expected);
        }

        /// Property: the bulk discount is the largest group discount, never
        /// the sum of several.
        #[test]
        fn bulk_discount_is_max_not_sum(items in order_items()) {
            let groups = group_line_items(&items).unwrap();
            let best = groups.iter().map(ItemGroup::bulk_discount).max().unwrap_or_default();

            let breakdown = price_order(&OrderSnapshot::new(items)).unwrap();
            prop_assert_eq!(breakdown.discount_amount, best);
            prop_assert!(breakdown.discount_amount <= MEAL_BULK_DISCOUNT_CAP);
        }

        /// Property: a promo code and a bulk discount never combine.
        #[test]
        fn promo_and_bulk_are_exclusive(items in order_items(), code in prop::sample::select(PromoCode::ALL.to_vec())) {
            let earns_bulk = aggregate(&items).unwrap().bulk.is_some();
            let result = price_order(&OrderSnapshot::new(items.clone()).with_promo_code(code));

            if items.is_empty() {
                prop_assert!(result.is_ok());
            } else if earns_bulk {
                prop_assert_eq!(result, Err(ValidationError::PromoWithDiscount));
            } else {
                let applied = result.map(|b| b.discount);
                prop_assert_eq!(applied, Ok(AppliedDiscount::Promo { code }));
            }
        }
    }
}
