//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    700 × (1 − 0.30) × 0.15 = 73.49999999999999 → rounds to 73  ❌       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units and basis points                     │
//! │    70_000 paise × 7000 bp × 1500 bp / 10⁸ = 73.5 → 74  ✅               │
//! │                                                                         │
//! │  One rounding step, at the very end, on an exact rational.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use royalty_core::money::Money;
//!
//! let price = Money::from_major(200);        // 200.00
//! let total = price.multiply_quantity(100).unwrap();  // 20000.00
//! assert_eq!(total.minor(), 2_000_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use ts_rs::TS;

use crate::types::Percentage;
use crate::MINOR_UNITS_PER_MAJOR;

/// Basis points in one whole (100%).
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise, cents).
///
/// ## Where Money is Used
/// ```text
/// Book.unit_price ──► copies × price ──► total_amount
///                                            │
///                          discount / scheme ▼
///                                     base after discount
///                                            │
///                              royalty rate  ▼
///                         royalty_amount + company_amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use royalty_core::money::Money;
    ///
    /// let price = Money::from_minor(19_950); // 199.50
    /// assert_eq!(price.minor(), 19_950);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_UNITS_PER_MAJOR)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_UNITS_PER_MAJOR
    }

    /// Returns the minor-unit portion, always non-negative.
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_UNITS_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a copy count, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use royalty_core::money::Money;
    ///
    /// let line = Money::from_major(300).multiply_quantity(50);
    /// assert_eq!(line, Some(Money::from_major(15_000)));
    /// assert_eq!(Money::from_minor(i64::MAX).multiply_quantity(2), None);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Adds two amounts, capping at the `i64` bounds.
    #[inline]
    pub const fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Takes a percentage of this amount, rounded half up to a minor unit.
    ///
    /// ## Example
    /// ```rust
    /// use royalty_core::money::Money;
    /// use royalty_core::types::Percentage;
    ///
    /// let total = Money::from_major(20_000);
    /// let base = total.percent_of(Percentage::from_whole(65));
    /// assert_eq!(base, Money::from_major(13_000));
    /// ```
    pub fn percent_of(&self, rate: Percentage) -> Money {
        let scaled = self.0 as i128 * rate.bps() as i128;
        Money::from_minor(round_half_up(scaled, BPS_SCALE) as i64)
    }

    /// Applies a chain of percentages and rounds half up to whole units.
    ///
    /// The product is kept exact until the single rounding step, so
    /// `total × 65% × 15%` never accumulates intermediate error.
    ///
    /// ## Example
    /// ```rust
    /// use royalty_core::money::Money;
    /// use royalty_core::types::Percentage;
    ///
    /// let total = Money::from_major(20_000);
    /// let royalty = total.scale_to_whole_units(&[
    ///     Percentage::from_whole(65),
    ///     Percentage::from_whole(15),
    /// ]);
    /// assert_eq!(royalty, Money::from_major(1_950));
    ///
    /// // 12.50 rounds up to 13
    /// let half = Money::from_minor(1_250).scale_to_whole_units(&[]);
    /// assert_eq!(half, Money::from_major(13));
    /// ```
    pub fn scale_to_whole_units(&self, factors: &[Percentage]) -> Money {
        let mut numerator = self.0 as i128;
        let mut denominator = MINOR_UNITS_PER_MAJOR as i128;
        for factor in factors {
            numerator *= factor.bps() as i128;
            denominator *= BPS_SCALE;
        }
        let whole = round_half_up(numerator, denominator);
        Money::from_minor((whole * MINOR_UNITS_PER_MAJOR as i128) as i64)
    }
}

/// `numerator / denominator` rounded half toward positive infinity.
fn round_half_up(numerator: i128, denominator: i128) -> i128 {
    (numerator + denominator / 2).div_euclid(denominator)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `major.minor` rendering without a currency symbol.
///
/// The symbol is a presentation concern and lives in the app config.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Saturating sum, so a statement over many large records caps instead of
/// overflowing.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc.saturating_add(m))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_and_major() {
        let money = Money::from_minor(19_950);
        assert_eq!(money.minor(), 19_950);
        assert_eq!(money.major(), 199);
        assert_eq!(money.minor_part(), 50);

        assert_eq!(Money::from_major(200).minor(), 20_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1_099).to_string(), "10.99");
        assert_eq!(Money::from_major(5).to_string(), "5.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_major(10);
        let b = Money::from_major(5);
        assert_eq!(a.saturating_add(b), Money::from_major(15));
        assert_eq!(a - b, Money::from_major(5));

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total, Money::from_major(20));
    }

    #[test]
    fn test_sum_saturates_instead_of_overflowing() {
        let big = Money::from_minor(i64::MAX / 2 + 1);
        let total: Money = vec![big, big, big].into_iter().sum();
        assert_eq!(total, Money::from_minor(i64::MAX));
    }

    #[test]
    fn test_percent_of_rounds_to_minor_unit() {
        // 0.15 × 65% = 0.0975 → 0.10
        let amount = Money::from_minor(15);
        assert_eq!(amount.percent_of(Percentage::from_whole(65)), Money::from_minor(10));
    }

    #[test]
    fn test_scale_to_whole_units_rounds_once() {
        // 10500 × 12% = 1260 exactly
        let base = Money::from_major(10_500);
        assert_eq!(
            base.scale_to_whole_units(&[Percentage::from_whole(12)]),
            Money::from_major(1_260)
        );

        // 700 × 70% × 15% = 73.5 exactly; floats land on 73.4999…
        let total = Money::from_major(700);
        assert_eq!(
            total.scale_to_whole_units(&[Percentage::from_whole(70), Percentage::from_whole(15)]),
            Money::from_major(74)
        );

        // 0.49 → 0, 0.50 → 1
        assert_eq!(Money::from_minor(49).scale_to_whole_units(&[]), Money::zero());
        assert_eq!(Money::from_minor(50).scale_to_whole_units(&[]), Money::from_major(1));
    }

    #[test]
    fn test_scale_to_whole_units_negative_rounds_toward_positive() {
        // -1.50 → -1, matching round-half-up semantics
        assert_eq!(Money::from_minor(-150).scale_to_whole_units(&[]), Money::from_major(-1));
    }

    #[test]
    fn test_scale_to_whole_units_large_amounts() {
        // Three factors on a large amount stays exact in i128
        let total = Money::from_major(9_000_000_000);
        let royalty = total.scale_to_whole_units(&[
            Percentage::from_whole(60),
            Percentage::from_whole(4),
        ]);
        assert_eq!(royalty, Money::from_major(216_000_000));
    }

    #[test]
    fn test_multiply_quantity_overflow() {
        assert_eq!(Money::from_major(2).multiply_quantity(3), Some(Money::from_major(6)));
        assert_eq!(Money::from_minor(i64::MAX).multiply_quantity(2), None);
    }
}
