//! # Money Module
//!
//! Provides the `Money` type for prices, line totals and order totals.
//!
//! ## Whole Units Only
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog prices are whole naira: ₦2,500, ₦8,500, ₦1,500.               │
//! │  There is no kobo anywhere in the client, and no currency conversion.  │
//! │                                                                         │
//! │  So Money is an i64 count of naira. Nothing is ever divided, so there  │
//! │  is no rounding policy to get wrong. Arithmetic saturates at the i64   │
//! │  bounds rather than overflowing.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use zamda_core::money::Money;
//!
//! let price = Money::from_naira(2500);
//! let line = price * 3;
//! assert_eq!(line.to_string(), "₦7,500");
//! assert_eq!(line.format_with("NGN "), "NGN 7,500");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Symbol used by the `Display` impl.
pub const NAIRA_SYMBOL: &str = "₦";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units (naira).
///
/// Signed so that differences (e.g. a discount line) stay representable,
/// but every catalog price is non-negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole naira.
    #[inline]
    pub const fn from_naira(naira: i64) -> Self {
        Money(naira)
    }

    /// Returns the amount in whole naira.
    #[inline]
    pub const fn naira(&self) -> i64 {
        self.0
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

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use zamda_core::money::Money;
    ///
    /// let unit_price = Money::from_naira(3200);
    /// assert_eq!(unit_price.multiply_quantity(2).naira(), 6400);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the amount with an arbitrary currency symbol.
    ///
    /// Digits are grouped in thousands with `,`; the sign goes before the
    /// symbol.
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}{}", sign, symbol, group_thousands(self.0.unsigned_abs()))
    }
}

/// Renders `1234567` as `1,234,567`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays as `₦2,500`, the format every screen shows.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(NAIRA_SYMBOL))
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

/// Multiplication by a quantity.
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

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_naira(0).to_string(), "₦0");
        assert_eq!(Money::from_naira(999).to_string(), "₦999");
        assert_eq!(Money::from_naira(2500).to_string(), "₦2,500");
        assert_eq!(Money::from_naira(24300).to_string(), "₦24,300");
        assert_eq!(Money::from_naira(1234567).to_string(), "₦1,234,567");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Money::from_naira(-1500).to_string(), "-₦1,500");
    }

    #[test]
    fn test_format_with_custom_symbol() {
        assert_eq!(Money::from_naira(12500).format_with("NGN "), "NGN 12,500");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_naira(2500);
        let b = Money::from_naira(1500);

        assert_eq!((a + b).naira(), 4000);
        assert_eq!((a - b).naira(), 1000);
        assert_eq!((a * 3).naira(), 7500);

        let mut total = Money::zero();
        total += a;
        assert_eq!(total, a);
    }

    #[test]
    fn test_sum() {
        let total: Money = [2500, 4500, 3200]
            .into_iter()
            .map(Money::from_naira)
            .sum();
        assert_eq!(total.naira(), 10200);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_naira(i64::MAX);

        assert_eq!(Money::from_naira(2500).multiply_quantity(i64::MAX), max);
        assert_eq!(max + Money::from_naira(1500), max);
        assert_eq!(Money::from_naira(i64::MIN) - Money::from_naira(1), Money::from_naira(i64::MIN));

        let total: Money = [max, max, Money::from_naira(1)].into_iter().sum();
        assert_eq!(total, max);

        let mut running = max;
        running += Money::from_naira(1);
        assert_eq!(running, max);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_naira(2500)).unwrap();
        assert_eq!(json, "2500");
    }
}
