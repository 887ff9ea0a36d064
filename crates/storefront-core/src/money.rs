//! # Money Module
//!
//! Provides the `Money` type used for every price in the storefront.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A float cart:                                                          │
//! │    3 × $0.10 = 0.30000000000000004         ❌ totals drift              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3 × 10 cents = 30 cents                 ✅ exact                      │
//! │                                                                         │
//! │  Cart totals and rental costs are products and sums only, so they stay │
//! │  exact. Tax is the one place a rounding rule is needed.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_major_minor(299, 99); // $299.99
//! let line = price * 2;                        // $599.98
//! assert_eq!(line.cents(), 59998);
//! assert_eq!(line.to_string(), "$599.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so that "garbage in" (negative prices) stays representable; the
/// stores do not validate prices.
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartItem.price ──► price × quantity ──► Cart.total_price
///
/// Car.price_per_day ─┐
///                    ├─► calculate_cost(..., duration) ──► BookingDraft.total_cost
/// Car.price_per_hour ┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(45, 0).cents(), 4500);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    ///
    /// Only the major unit carries the sign: `(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// The cents part (0-99, always non-negative).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a count (cart quantity, rental days/hours).
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let per_day = Money::from_major_minor(100, 0);
    /// assert_eq!(per_day.multiply_quantity(3).cents(), 30000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Calculates tax on this amount, rounding half away from zero to a cent.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::TaxRate;
    ///
    /// // $10.05 × 8% = $0.804 → $0.80
    /// let tax = Money::from_cents(1005).calculate_tax(TaxRate::from_bps(800));
    /// assert_eq!(tax.cents(), 80);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large subtotals from overflowing before the division
        let scaled = self.0 as i128 * rate.bps() as i128;
        let half = if scaled < 0 { -5000 } else { 5000 };
        Money::from_cents(((scaled + half) / 10000) as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic saturates at the i64 bounds.

/// Debug-friendly display (`$12.34`, `-$5.50`).
///
/// The app formats with its configured currency symbol instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(299, 99).cents(), 29999);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(29999).to_string(), "$299.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);

        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!((b * 4).cents(), 1000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 1500);
    }

    #[test]
    fn test_tax_rounds_half_away_from_zero() {
        let rate = TaxRate::from_bps(800);
        // 10000 × 8% = 800 exactly
        assert_eq!(Money::from_cents(10000).calculate_tax(rate).cents(), 800);
        // 1006 × 8% = 80.48 → 80
        assert_eq!(Money::from_cents(1006).calculate_tax(rate).cents(), 80);
        // 1007 × 8% = 80.56 → 81
        assert_eq!(Money::from_cents(1007).calculate_tax(rate).cents(), 81);
        // refunds round symmetrically
        assert_eq!(Money::from_cents(-1007).calculate_tax(rate).cents(), -81);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let price = Money::from_cents(79999);
        assert_eq!(price * 200_000_000_000_000, Money::from_cents(i64::MAX));
        assert_eq!(price * -200_000_000_000_000, Money::from_cents(i64::MIN));
        assert_eq!(Money::from_cents(i64::MAX) + Money::from_cents(1), Money::from_cents(i64::MAX));

        let total: Money = [Money::from_cents(i64::MAX), price].iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_serializes_as_plain_cents() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "1099");
        let back: Money = serde_json::from_str("1099").unwrap();
        assert_eq!(back, Money::from_cents(1099));
    }
}
