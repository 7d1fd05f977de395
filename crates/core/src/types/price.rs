//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are decimal amounts in the store currency's standard unit
//! (dollars, not cents). Float arithmetic is never used for money; the
//! backend serializes prices as plain JSON numbers, which deserialize
//! into [`rust_decimal::Decimal`] without accumulating binary-float error.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative monetary amount in the store currency.
///
/// ## Examples
///
/// ```
/// use fjordhem_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(4999, 2)).unwrap();
/// assert_eq!(price.display(), "$49.99");
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from an integer number of cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }

    /// Multiply by a quantity, yielding a line total.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        let err = Price::new(Decimal::new(-100, 2)).unwrap_err();
        assert!(matches!(err, PriceError::Negative(_)));
        assert!(Price::from_cents(-1).is_err());
    }

    #[test]
    fn test_accepts_zero() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::ZERO);
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::from_cents(4999).unwrap().display(), "$49.99");
        assert_eq!(Price::from_cents(1000).unwrap().display(), "$10.00");
        assert_eq!(Price::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_times_quantity() {
        let price = Price::from_cents(10000).unwrap();
        assert_eq!(price.times(2), Decimal::new(20000, 2));
        assert_eq!(price.times(0), Decimal::ZERO);
    }

    #[test]
    fn test_serde_json_number() {
        let price = Price::from_cents(12999).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "129.99");
        let back: Price = serde_json::from_str("129.99").unwrap();
        assert_eq!(back, price);
    }
}
