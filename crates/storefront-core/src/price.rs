//! # Price Normalization
//!
//! Catalog rows and restored carts disagree on how a price looks:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Where a price comes from              What it looks like               │
//! │  ─────────────────────────             ──────────────────               │
//! │  GET /api/products (DECIMAL column)    "12.99"                          │
//! │  Hand-entered catalog data             "$12.99"                         │
//! │  Cart blob written by the browser      12.99                            │
//! │                                                                         │
//! │        │                │                  │                            │
//! │        └────────────────┼──────────────────┘                            │
//! │                         ▼                                               │
//! │              Price::normalized()  ← the ONLY way to get a Money         │
//! │                         │                                               │
//! │                         ▼                                               │
//! │              Money (0 ..= MAX_UNIT_PRICE, micro-units)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Price` keeps whatever representation arrived so it serializes back out
//! unchanged. Arithmetic never looks at the raw value.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

/// A unit price as it arrived: a number or a currency-formatted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Price {
    /// Numeric price in currency units (`12.99`).
    Number(f64),
    /// Formatted price (`"$12.99"`, `"12.99"`).
    Text(String),
}

/// Largest unit price a cart line can carry: $10,000,000.
///
/// Anything above it is treated as this amount, so a line total
/// (`MAX_UNIT_PRICE × MAX_QUANTITY`) always fits in [`Money`].
pub const MAX_UNIT_PRICE: Money = Money::from_cents(1_000_000_000);

impl Price {
    /// Converts the raw price into a unit price in `0..=MAX_UNIT_PRICE`.
    ///
    /// ## Rules
    /// - Text goes through [`Money::parse_lenient`]
    /// - Numbers are rounded to the nearest micro-unit; NaN/∞ become zero
    /// - Anything negative is clamped to zero
    /// - Anything above [`MAX_UNIT_PRICE`] is clamped to it
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::price::{Price, MAX_UNIT_PRICE};
    ///
    /// assert_eq!(Price::from("$10.00").normalized().cents(), 1000);
    /// assert_eq!(Price::from(2.5).normalized().cents(), 250);
    /// assert_eq!(Price::from("call us").normalized().cents(), 0);
    /// assert_eq!(Price::from("99999999999999999999").normalized(), MAX_UNIT_PRICE);
    /// ```
    pub fn normalized(&self) -> Money {
        self.amount().clamp(Money::zero(), MAX_UNIT_PRICE)
    }

    /// The amount as written, without clamping. Used for stored totals,
    /// which are not unit prices.
    pub fn amount(&self) -> Money {
        match self {
            Price::Number(value) => Money::from_decimal(*value),
            Price::Text(text) => Money::parse_lenient(text),
        }
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::Number(0.0)
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Price::Number(value)
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Price::Text(value.to_string())
    }
}

impl From<String> for Price {
    fn from(value: String) -> Self {
        Price::Text(value)
    }
}

impl From<Money> for Price {
    fn from(value: Money) -> Self {
        Price::Number(value.to_decimal())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Number(value) => write!(f, "{value}"),
            Price::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_number_agree() {
        assert_eq!(
            Price::from("$12.99").normalized(),
            Price::from(12.99).normalized()
        );
        assert_eq!(
            Price::from("2.50").normalized(),
            Price::from(2.5).normalized()
        );
    }

    #[test]
    fn test_negative_prices_clamp_to_zero() {
        assert!(Price::from("-5").normalized().is_zero());
        assert!(Price::from(-3.25).normalized().is_zero());
    }

    #[test]
    fn test_huge_prices_clamp_to_max() {
        assert_eq!(Price::from("99999999999999999999").normalized(), MAX_UNIT_PRICE);
        assert_eq!(Price::from(1e30).normalized(), MAX_UNIT_PRICE);
        assert_eq!(
            Price::from("$10,000,000.00").normalized(),
            MAX_UNIT_PRICE
        );
        assert!(Price::from(1e30).amount() > MAX_UNIT_PRICE);
    }

    #[test]
    fn test_sub_cent_prices_are_kept() {
        assert_eq!(Price::from("$0.333").normalized().micros(), 333_000);
        assert_eq!(Price::from(0.333).normalized().micros(), 333_000);
    }

    #[test]
    fn test_unparseable_is_zero() {
        assert!(Price::from("").normalized().is_zero());
        assert!(Price::from("N/A").normalized().is_zero());
        assert!(Price::from(f64::NAN).normalized().is_zero());
    }

    #[test]
    fn test_untagged_serde_keeps_shape() {
        let number: Price = serde_json::from_str("5").unwrap();
        assert_eq!(number, Price::Number(5.0));

        let text: Price = serde_json::from_str("\"$5.00\"").unwrap();
        assert_eq!(text, Price::Text("$5.00".to_string()));
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"$5.00\"");
    }
}
