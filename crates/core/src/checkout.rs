//! Order summary derivation.
//!
//! Shipping is a flat rate with no weight or distance model: 10 monetary
//! units whenever the cart has value, free for an empty cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// Flat-rate shipping fee applied to any non-empty order.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Totals derived from a cart for the checkout summary.
///
/// Always a pure function of the cart; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// The cart's derived total.
    pub subtotal: Decimal,
    /// Flat-rate shipping, zero for an empty cart.
    pub shipping: Decimal,
    /// Subtotal plus shipping.
    pub total: Decimal,
}

impl OrderSummary {
    /// Derive the summary from a cart.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        let subtotal = cart.total;
        let shipping = if subtotal > Decimal::ZERO {
            FLAT_SHIPPING_FEE
        } else {
            Decimal::ZERO
        };
        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

impl From<&Cart> for OrderSummary {
    fn from(cart: &Cart) -> Self {
        Self::from_cart(cart)
    }
}
