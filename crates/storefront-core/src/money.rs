//! # Money Module
//!
//! Provides the `Money` type and the dashboard's currency formatting.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The backend sends prices and balances as JSON numbers (floats):        │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: convert ONCE at the boundary, then integer cents         │
//! │    Money::from_major(1234.5)  → 123450 cents                            │
//! │    100 - 30.1  → 10000 - 3010 = 6990 cents → 69.9 exactly               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Display Format
//! Amounts are shown the way the storefront shows them: German-style digit
//! grouping (`.` between thousands, `,` before the fraction), trailing
//! fraction zeros dropped, followed by the currency suffix `đ`.
//!
//! - [`CurrencyFormat::format`] prints [`Money`] (balances, two decimals)
//! - [`CurrencyFormat::format_amount`] prints a raw backend number (order
//!   totals) with up to three fraction digits
//!
//! ```rust
//! use storefront_core::money::{CurrencyFormat, Money};
//!
//! let format = CurrencyFormat::default();
//! assert_eq!(format.format(Money::from_major(1000.0)), "1.000đ");
//! assert_eq!(format.format(Money::from_major(1234.5)), "1.234,5đ");
//! assert_eq!(format.format_amount(1234.567), "1.234,567đ");
//! ```
//!
//! ## Overflow
//! Arithmetic saturates at the `i64` bounds instead of panicking; absurd
//! backend values produce absurd but finite charts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::DEFAULT_CURRENCY_SUFFIX;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (1/100 of the major unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: the balance chart can legitimately go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Floats only at the boundary**: [`Money::from_major`] is the single
///   place where backend numbers enter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a backend number (major units) into Money.
    ///
    /// Rounds to the nearest cent, half away from zero, which matches how
    /// the storefront rounded balances to two decimals. Non-finite input
    /// (NaN, infinity) becomes zero.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(10.999).cents(), 1100);
    /// assert_eq!(Money::from_major(-5.5).cents(), -550);
    /// assert_eq!(Money::from_major(f64::NAN), Money::zero());
    /// ```
    pub fn from_major(value: f64) -> Self {
        if !value.is_finite() {
            return Money::zero();
        }
        Money((value * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units (for charts only, never for math).
    #[inline]
    pub fn to_major(&self) -> f64 {
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
}

/// Display uses the storefront's default currency format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&CurrencyFormat::default().format(*self))
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Currency Format
// =============================================================================

/// Locale-style number formatting plus a fixed currency suffix.
///
/// ## Layout
/// ```text
///   1234567.8  ──►  "1.234.567,8đ"
///                    │     │  │ └── suffix
///                    │     │  └──── fraction (zeros trimmed)
///                    │     └─────── decimal separator
///                    └───────────── thousands separator
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Separator between groups of three integer digits.
    pub thousands_separator: char,
    /// Separator before the fraction digits.
    pub decimal_separator: char,
    /// Appended to every formatted amount.
    pub suffix: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            thousands_separator: '.',
            decimal_separator: ',',
            suffix: DEFAULT_CURRENCY_SUFFIX.to_string(),
        }
    }
}

impl CurrencyFormat {
    /// Default separators with a custom suffix.
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        CurrencyFormat {
            suffix: suffix.into(),
            ..Self::default()
        }
    }

    /// Formats an amount including the currency suffix.
    pub fn format(&self, money: Money) -> String {
        let mut out = self.format_number(money);
        out.push_str(&self.suffix);
        out
    }

    /// Formats an amount without the currency suffix.
    pub fn format_number(&self, money: Money) -> String {
        self.format_scaled(money.cents(), 2)
    }

    /// Formats a raw backend number with up to three fraction digits,
    /// rounded half away from zero. Non-finite input prints as zero.
    ///
    /// ```rust
    /// use storefront_core::money::CurrencyFormat;
    ///
    /// let format = CurrencyFormat::default();
    /// assert_eq!(format.format_amount(1000.0), "1.000đ");
    /// assert_eq!(format.format_amount(12.5), "12,5đ");
    /// ```
    pub fn format_amount(&self, value: f64) -> String {
        let thousandths = if value.is_finite() {
            (value * 1000.0).round() as i64
        } else {
            0
        };
        let mut out = self.format_scaled(thousandths, 3);
        out.push_str(&self.suffix);
        out
    }

    /// Formats `scaled / 10^digits`.
    fn format_scaled(&self, scaled: i64, digits: u32) -> String {
        let unit = 10u64.pow(digits);
        let abs = scaled.unsigned_abs();
        let major = (abs / unit).to_string();
        let mut minor = abs % unit;

        let mut out = String::with_capacity(major.len() + major.len() / 3 + 5);
        if scaled < 0 {
            out.push('-');
        }

        for (i, digit) in major.chars().enumerate() {
            if i > 0 && (major.len() - i) % 3 == 0 {
                out.push(self.thousands_separator);
            }
            out.push(digit);
        }

        if minor != 0 {
            let mut width = digits as usize;
            while minor % 10 == 0 {
                minor /= 10;
                width -= 1;
            }
            out.push(self.decimal_separator);
            out.push_str(&format!("{:0width$}", minor, width = width));
        }

        out
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_rounds_to_cents() {
        assert_eq!(Money::from_major(1000.0).cents(), 100_000);
        assert_eq!(Money::from_major(0.125).cents(), 13);
        assert_eq!(Money::from_major(-0.125).cents(), -13);
        assert_eq!(Money::from_major(f64::INFINITY), Money::zero());
    }

    #[test]
    fn test_to_major() {
        assert_eq!(Money::from_cents(3000).to_major(), 30.0);
        assert_eq!(Money::from_cents(-5000).to_major(), -50.0);
        assert_eq!(Money::from_cents(6990).to_major(), 69.9);
    }

    #[test]
    fn test_grouping() {
        let format = CurrencyFormat::default();
        assert_eq!(format.format_number(Money::from_major(0.0)), "0");
        assert_eq!(format.format_number(Money::from_major(999.0)), "999");
        assert_eq!(format.format_number(Money::from_major(1000.0)), "1.000");
        assert_eq!(format.format_number(Money::from_major(123456.0)), "123.456");
        assert_eq!(format.format_number(Money::from_major(1234567.0)), "1.234.567");
    }

    #[test]
    fn test_fraction_digits() {
        let format = CurrencyFormat::default();
        assert_eq!(format.format_number(Money::from_major(1234.5)), "1.234,5");
        assert_eq!(format.format_number(Money::from_major(1234.56)), "1.234,56");
        assert_eq!(format.format_number(Money::from_major(0.05)), "0,05");
        assert_eq!(format.format_number(Money::from_major(12.0)), "12");
    }

    #[test]
    fn test_negative_amounts() {
        let format = CurrencyFormat::default();
        assert_eq!(format.format(Money::from_major(-1500.0)), "-1.500đ");
        assert_eq!(format.format(Money::from_major(-0.5)), "-0,5đ");
    }

    #[test]
    fn test_custom_suffix() {
        let format = CurrencyFormat::with_suffix(" VND");
        assert_eq!(format.format(Money::from_major(25000.0)), "25.000 VND");
    }

    #[test]
    fn test_display_uses_default_format() {
        assert_eq!(Money::from_cents(100_000).to_string(), "1.000đ");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);

        let mut running = Money::zero();
        running += a;
        running -= b;
        assert_eq!(running.cents(), 500);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);

        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(Money::from_cents(10_000) - min, max);
        assert_eq!(Money::from_major(-1e300), min);

        let mut running = min;
        running -= Money::from_cents(1);
        assert_eq!(running, min);
        assert_eq!(vec![max, max].into_iter().sum::<Money>(), max);
    }

    #[test]
    fn test_extreme_values_format() {
        let format = CurrencyFormat::default();
        assert!(format.format(Money::from_cents(i64::MIN)).starts_with("-92.233.720"));
        assert!(format.format_amount(1e300).ends_with('đ'));
    }

    #[test]
    fn test_format_amount_three_fraction_digits() {
        let format = CurrencyFormat::default();
        assert_eq!(format.format_amount(1234.567), "1.234,567đ");
        assert_eq!(format.format_amount(1234.5), "1.234,5đ");
        assert_eq!(format.format_amount(99.05), "99,05đ");
        assert_eq!(format.format_amount(0.0004), "0đ");
        assert_eq!(format.format_amount(2.0006), "2,001đ");
        assert_eq!(format.format_amount(-1500.25), "-1.500,25đ");
        assert_eq!(format.format_amount(f64::NAN), "0đ");
    }
}
