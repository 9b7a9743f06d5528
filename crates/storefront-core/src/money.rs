//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart that adds and subtracts float prices on every click slowly     │
//! │  drifts away from the true sum of its lines.                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Micro-units                                      │
//! │    Amounts are i64 millionths of a currency unit. Catalog prices with  │
//! │    sub-cent digits ("$0.333") keep them, and adjusting a running       │
//! │    total by deltas always equals recomputing it from scratch.          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cents only appear when rendering (`Display`, [`Money::cents`]). Decimal
//! values only exist at the edges: parsing catalog prices in
//! ([`Money::parse_lenient`], [`Money::from_decimal`]) and writing totals out
//! ([`Money::to_decimal`]).
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::parse_lenient("$12.99");
//! assert_eq!(price.cents(), 1299);
//!
//! let line = price * 2;
//! assert_eq!(line.to_string(), "$25.98");
//!
//! let third = Money::parse_lenient("0.333");
//! assert_eq!((third * 3).micros(), 999_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Micro-units in one currency unit.
pub const MICROS_PER_UNIT: i64 = 1_000_000;

/// Micro-units in one cent.
const MICROS_PER_CENT: i64 = MICROS_PER_UNIT / 100;

/// Fractional digits kept by [`Money::parse_lenient`].
const FRACTION_DIGITS: usize = 6;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in millionths of a currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: deltas applied to a cart total may be negative
/// - **Micro-units**: exact for any price with up to six decimals; the
///   largest value is about 9.2 trillion currency units
/// - **Ord**: lets callers clamp with `max(Money::zero())`
///
/// The operators saturate. Code that must stay exact (the cart reducer)
/// uses [`Money::checked_add`] and [`Money::checked_mul`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents.saturating_mul(MICROS_PER_CENT))
    }

    /// Creates a Money value from micro-units.
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Money(micros)
    }

    /// Creates a Money value from a decimal amount of currency units.
    ///
    /// Rounds half away from zero to the nearest micro-unit. Non-finite
    /// input (NaN, ±∞) becomes zero rather than poisoning a total.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(12.5).cents(), 1250);
    /// assert_eq!(Money::from_decimal(0.333).micros(), 333_000);
    /// assert_eq!(Money::from_decimal(f64::NAN).cents(), 0);
    /// ```
    pub fn from_decimal(value: f64) -> Self {
        if !value.is_finite() {
            return Money::zero();
        }
        // `as` saturates at i64 bounds
        Money((value * MICROS_PER_UNIT as f64).round() as i64)
    }

    /// Parses a loosely formatted price string.
    ///
    /// ## Rules
    /// 1. Every character that is not a digit, `.` or `-` is stripped
    ///    (`"$1,299.00"` → `"1299.00"`)
    /// 2. The longest leading `-?digits[.digits]` is read; anything after it
    ///    is ignored (`"12.5.3"` → 12.5)
    /// 3. No digits at all → zero
    /// 4. Six decimals are kept; the seventh rounds half away from zero
    /// 5. Magnitudes beyond the i64 range saturate
    ///
    /// The result may be negative; callers that need a non-negative price
    /// clamp it (see [`crate::price::Price::normalized`]).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::parse_lenient("$10.00").cents(), 1000);
    /// assert_eq!(Money::parse_lenient("USD 2.505").micros(), 2_505_000);
    /// assert_eq!(Money::parse_lenient("free").cents(), 0);
    /// ```
    pub fn parse_lenient(text: &str) -> Self {
        let mut chars = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .peekable();

        let negative = chars.next_if_eq(&'-').is_some();
        let mut saw_digit = false;

        let mut whole: i64 = 0;
        while let Some(d) = chars.next_if(char::is_ascii_digit) {
            whole = whole.saturating_mul(10).saturating_add(digit_value(d));
            saw_digit = true;
        }

        // six kept digits, then the digit that decides rounding
        let mut fraction = [0_i64; FRACTION_DIGITS + 1];
        if chars.next_if_eq(&'.').is_some() {
            let mut position = 0;
            while let Some(d) = chars.next_if(char::is_ascii_digit) {
                if position < fraction.len() {
                    fraction[position] = digit_value(d);
                }
                position += 1;
                saw_digit = true;
            }
        }

        if !saw_digit {
            return Money::zero();
        }

        let kept = fraction[..FRACTION_DIGITS]
            .iter()
            .fold(0_i64, |acc, digit| acc * 10 + digit);

        let mut micros = whole
            .saturating_mul(MICROS_PER_UNIT)
            .saturating_add(kept);
        if fraction[FRACTION_DIGITS] >= 5 {
            micros = micros.saturating_add(1);
        }

        Money(if negative { -micros } else { micros })
    }

    /// Returns the value in micro-units.
    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Returns the value rounded half away from zero to whole cents.
    pub const fn cents(&self) -> i64 {
        let whole = self.0 / MICROS_PER_CENT;
        let rest = (self.0 % MICROS_PER_CENT).abs();
        if rest * 2 >= MICROS_PER_CENT {
            whole + self.0.signum()
        } else {
            whole
        }
    }

    /// Returns the major unit (dollars) portion of the rounded value.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.dollars(), 10);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.cents() / 100
    }

    /// Returns the minor unit (cents) portion of the rounded value (0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.cents() % 100).abs()
    }

    /// Returns the value as a decimal number of currency units.
    ///
    /// For display and wire formats only; never feed this back into
    /// arithmetic.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / MICROS_PER_UNIT as f64
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

    /// Addition that reports overflow instead of saturating.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(value) => Some(Money(value)),
            None => None,
        }
    }

    /// Multiplication by a quantity that reports overflow.
    #[inline]
    pub const fn checked_mul(self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(value) => Some(Money(value)),
            None => None,
        }
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

#[inline]
fn digit_value(c: char) -> i64 {
    c.to_digit(10).map(i64::from).unwrap_or(0)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$12.34` / `-$5.50`, rounded to cents.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents() < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.micros(), 10_990_000);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_micros(999_000)), "$1.00");
        assert_eq!(format!("{}", Money::from_micros(-4_000)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_cents(1000);
        assert_eq!(a.checked_add(a), Some(Money::from_cents(2000)));
        assert_eq!(a.checked_mul(-2), Some(Money::from_cents(-2000)));

        let max = Money::from_micros(i64::MAX);
        assert_eq!(max.checked_add(Money::from_micros(1)), None);
        assert_eq!(a.checked_mul(i64::MAX), None);
    }

    #[test]
    fn test_parse_currency_strings() {
        assert_eq!(Money::parse_lenient("$12.99").cents(), 1299);
        assert_eq!(Money::parse_lenient("12.99").cents(), 1299);
        assert_eq!(Money::parse_lenient("$1,299.00").cents(), 129_900);
        assert_eq!(Money::parse_lenient("2.5").cents(), 250);
        assert_eq!(Money::parse_lenient(".5").cents(), 50);
        assert_eq!(Money::parse_lenient("7.").cents(), 700);
    }

    #[test]
    fn test_parse_keeps_sub_cent_digits() {
        assert_eq!(Money::parse_lenient("$0.333").micros(), 333_000);
        assert_eq!(Money::parse_lenient("0.123456").micros(), 123_456);
        assert_eq!((Money::parse_lenient("$0.333") * 3).micros(), 999_000);
    }

    #[test]
    fn test_parse_stops_at_first_invalid_sequence() {
        assert_eq!(Money::parse_lenient("12.5.3").cents(), 1250);
        assert_eq!(Money::parse_lenient("10-20").cents(), 1000);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert!(Money::parse_lenient("").is_zero());
        assert!(Money::parse_lenient("free").is_zero());
        assert!(Money::parse_lenient("$").is_zero());
        assert!(Money::parse_lenient("-").is_zero());
        assert!(Money::parse_lenient("--5").is_zero());
        assert!(Money::parse_lenient(".").is_zero());
    }

    #[test]
    fn test_parse_keeps_sign() {
        assert_eq!(Money::parse_lenient("-$3.10").cents(), -310);
        assert_eq!(Money::parse_lenient("-.5").cents(), -50);
    }

    #[test]
    fn test_parse_rounds_past_six_decimals() {
        assert_eq!(Money::parse_lenient("0.0000005").micros(), 1);
        assert_eq!(Money::parse_lenient("0.0000004").micros(), 0);
        assert_eq!(Money::parse_lenient("2.5049999").micros(), 2_505_000);
        assert_eq!(Money::parse_lenient("-0.0000005").micros(), -1);
    }

    #[test]
    fn test_parse_huge_values_saturate() {
        assert_eq!(
            Money::parse_lenient("99999999999999999999").micros(),
            i64::MAX
        );
    }

    #[test]
    fn test_cents_round_half_away_from_zero() {
        assert_eq!(Money::parse_lenient("2.505").cents(), 251);
        assert_eq!(Money::parse_lenient("2.504").cents(), 250);
        assert_eq!(Money::parse_lenient("-2.505").cents(), -251);
        assert_eq!(Money::parse_lenient("0.999").cents(), 100);
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(Money::from_decimal(5.0).cents(), 500);
        assert_eq!(Money::from_decimal(2.5).cents(), 250);
        assert_eq!(Money::from_decimal(19.99).cents(), 1999);
        assert_eq!(Money::from_decimal(0.999).micros(), 999_000);
        assert!(Money::from_decimal(f64::NAN).is_zero());
        assert!(Money::from_decimal(f64::INFINITY).is_zero());
    }

    #[test]
    fn test_to_decimal() {
        assert!((Money::from_cents(2000).to_decimal() - 20.0).abs() < 1e-9);
        assert!((Money::from_cents(1299).to_decimal() - 12.99).abs() < 1e-9);
        assert!((Money::from_micros(999_000).to_decimal() - 0.999).abs() < 1e-9);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 897);
    }
}
