//! # Money Module
//!
//! Provides the `Money` type for handling menu prices and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Order documents carry prices as JSON numbers:                          │
//! │    { "price": 10.1 } + { "price": 20.2 } = 30.299999999999997  ❌       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Prices are converted ONCE at the boundary (1010 + 2020 = 3030)       │
//! │    Every discount after that is exact integer arithmetic                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comanda_core::money::Money;
//!
//! let price = Money::from_cents(1500); // $15.00
//!
//! let line = price * 3_usize;           // $45.00
//! let total = line - Money::from_cents(1500);
//! assert_eq!(total.cents(), 3000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Largest price a single line item may carry, in cents ($1,000,000,000.00).
///
/// Keeps `count * price` sums far away from `i64` overflow for any order
/// that fits in memory.
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  LineItem.price ──► ItemGroup.price × count ──► subtotal               │
/// │                                                                         │
/// │  subtotal ── bulk discount OR promo code ──► total (floored at zero)   │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(20).cents(), 2000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * 100)
    }

    /// Converts a decimal amount as found in an order document into cents.
    ///
    /// Rounds to the nearest cent. Returns `None` for NaN, infinities,
    /// negative amounts and amounts above [`MAX_PRICE_CENTS`].
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(10.5).map(|m| m.cents()), Some(1050));
    /// assert_eq!(Money::from_decimal(-1.0), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }

        let cents = (amount * 100.0).round();
        if cents > MAX_PRICE_CENTS as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value as a decimal number, for JSON output only.
    #[inline]
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps negative values to zero.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-300).floor_at_zero(), Money::zero());
    /// assert_eq!(Money::from_cents(300).floor_at_zero().cents(), 300);
    /// ```
    #[inline]
    pub fn floor_at_zero(self) -> Self {
        self.max(Money::zero())
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (3000 = 30%)
    ///
    /// The discount amount is rounded half-up to the cent before it is
    /// subtracted.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(5000); // $50.00
    /// let discounted = subtotal.apply_percentage_discount(3000); // 30% off
    /// assert_eq!(discounted.cents(), 3500); // $35.00
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        let discount_amount = (self.0 as i128 * discount_bps as i128 + 5000) / 10000;
        Money::from_cents(self.0 - discount_amount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money with a dollar sign.
///
/// ## Note
/// The CLI formats with a configurable symbol; this is for debugging.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a unit count (group sizes are `usize`).
impl Mul<usize> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: usize) -> Self {
        Money(self.0 * count as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
