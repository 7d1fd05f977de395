//! Checkout flow: order summary plus the simulated purchase.
//!
//! Purchase contacts no payment or order-persistence collaborator; it
//! validates the cart, clears it, and signals success.

use fjordhem_core::cart::CartAction;
use fjordhem_core::checkout::OrderSummary;

use crate::error::AppError;
use crate::store::CartStore;

/// Confirmation returned by a successful (simulated) purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    /// The totals the order was confirmed with.
    pub summary: OrderSummary,
    /// Message for the success notification.
    pub message: String,
}

/// Derive the order summary for the current cart.
#[must_use]
pub fn summary(store: &CartStore) -> OrderSummary {
    OrderSummary::from_cart(&store.state())
}

/// Attempt the purchase.
///
/// An empty cart is rejected with a user-visible error and the cart is left
/// untouched. Otherwise the cart is cleared and a receipt returned.
///
/// # Errors
///
/// Returns [`AppError::EmptyCart`] when the line sequence is empty.
pub fn purchase(store: &CartStore) -> Result<PurchaseReceipt, AppError> {
    let cart = store.state();
    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let summary = OrderSummary::from_cart(&cart);
    store.dispatch(CartAction::ClearCart);

    Ok(PurchaseReceipt {
        summary,
        message: "Thank you for your purchase!".to_owned(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fjordhem_core::{Price, Product, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(cents).unwrap(),
            image: String::new(),
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            updated_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            user_id: None,
        }
    }

    #[test]
    fn test_purchase_with_empty_cart_is_rejected() {
        let store = CartStore::new();
        let err = purchase(&store).unwrap_err();
        assert!(matches!(err, AppError::EmptyCart));
        assert_eq!(err.user_message(), "Your cart is empty.");
        // No ClearCart was dispatched; the cart is still the canonical empty
        // state rather than a freshly cleared one, observable via listeners.
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_purchase_clears_cart_and_reports_totals() {
        let store = CartStore::new();
        store.dispatch(CartAction::AddItem(product("a", 10000)));
        store.dispatch(CartAction::AddItem(product("a", 10000)));

        let receipt = purchase(&store).unwrap();
        assert_eq!(receipt.summary.subtotal, Decimal::from(200));
        assert_eq!(receipt.summary.shipping, Decimal::from(10));
        assert_eq!(receipt.summary.total, Decimal::from(210));
        assert_eq!(receipt.message, "Thank you for your purchase!");
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_rejected_purchase_dispatches_nothing() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let store = CartStore::new();
        let dispatches = Arc::new(AtomicUsize::new(0));
        {
            let dispatches = Arc::clone(&dispatches);
            store.subscribe(move |_| {
                dispatches.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert!(purchase(&store).is_err());
        assert_eq!(dispatches.load(Ordering::SeqCst), 0);
    }
}
