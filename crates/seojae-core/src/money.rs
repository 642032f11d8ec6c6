//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Won                                          │
//! │    KRW has no minor unit, so a book price is simply an i64           │
//! │    (25000 = ₩25,000). Sums over a cart are exact by construction.   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use seojae_core::money::Money;
//!
//! let price = Money::from_won(25_000);
//! let line_total = price * 3;
//! assert_eq!(line_total.won(), 75_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole Korean won.
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for refunds and corrections
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent serde**: serializes as the bare integer, so the durable
///   JSON shape is `"price": 25000`, not a nested object
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole won.
    #[inline]
    pub const fn from_won(won: i64) -> Self {
        Money(won)
    }

    /// Returns the value in whole won.
    #[inline]
    pub const fn won(&self) -> i64 {
        self.0
    }

    /// Zero money value.
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

    /// Multiplies by a quantity (line totals).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. The UI shell formats for locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₩{}", sign, group_thousands(self.0.unsigned_abs()))
    }
}

/// Groups digits in threes: 1234567 -> "1,234,567".
fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut chunks = Vec::new();
    while value > 0 {
        chunks.push(value % 1000);
        value /= 1000;
    }
    let mut out = chunks.pop().map(|c| c.to_string()).unwrap_or_default();
    while let Some(chunk) = chunks.pop() {
        out.push_str(&format!(",{:03}", chunk));
    }
    out
}

/// Default money is zero.
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

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over cart lines.
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
    fn test_from_won() {
        let money = Money::from_won(25_000);
        assert_eq!(money.won(), 25_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_won(25_000)), "₩25,000");
        assert_eq!(format!("{}", Money::from_won(1_234_567)), "₩1,234,567");
        assert_eq!(format!("{}", Money::from_won(500)), "₩500");
        assert_eq!(format!("{}", Money::from_won(0)), "₩0");
        assert_eq!(format!("{}", Money::from_won(-9_900)), "-₩9,900");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_won(10_000);
        let b = Money::from_won(4_500);

        assert_eq!((a + b).won(), 14_500);
        assert_eq!((a - b).won(), 5_500);
        assert_eq!((a * 3).won(), 30_000);
        assert_eq!(a.multiply_quantity(2).won(), 20_000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [12_000, 8_800, 15_500]
            .into_iter()
            .map(Money::from_won)
            .sum();
        assert_eq!(total.won(), 36_300);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        assert!(Money::from_won(-100).is_negative());
    }

    #[test]
    fn test_serde_is_transparent() {
        // Durable JSON carries the bare integer
        let json = serde_json::to_string(&Money::from_won(25_000)).unwrap();
        assert_eq!(json, "25000");

        let back: Money = serde_json::from_str("25000").unwrap();
        assert_eq!(back, Money::from_won(25_000));
    }
}
