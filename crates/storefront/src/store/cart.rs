//! Cart store: the cart reducer behind a subscribe/dispatch contract.

use std::sync::Mutex;

use fjordhem_core::cart::{Cart, CartAction, reduce};

use crate::observer::{ListenerId, Listeners};

/// Process-wide cart state owner.
///
/// Wraps the pure reducer from `fjordhem-core` with serialized dispatch and
/// synchronous listener notification. UI consumers read [`CartStore::state`]
/// and dispatch actions; they never mutate the cart directly.
#[derive(Default)]
pub struct CartStore {
    state: Mutex<Cart>,
    listeners: Listeners<Cart>,
}

impl CartStore {
    /// Create a store holding the canonical empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a given initial cart (e.g., restored state).
    #[must_use]
    pub fn with_state(cart: Cart) -> Self {
        Self {
            state: Mutex::new(cart),
            listeners: Listeners::default(),
        }
    }

    /// Snapshot of the current cart.
    #[must_use]
    pub fn state(&self) -> Cart {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Apply an action and notify subscribers with the new state.
    ///
    /// Transitions run to completion under the state lock; notification
    /// happens after the lock is released, on the dispatching thread.
    pub fn dispatch(&self, action: CartAction) -> Cart {
        let next = {
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *state = reduce(&state, action);
            state.clone()
        };
        self.listeners.notify(&next);
        next
    }

    /// Register a listener invoked after every dispatch.
    pub fn subscribe(&self, listener: impl Fn(&Cart) + Send + Sync + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Remove a previously registered listener.
    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.unsubscribe(id);
    }

    /// Translate a quantity edit into the correct action and dispatch it.
    ///
    /// This is the caller-side half of the `SetQuantity` contract: anything
    /// below 1 becomes a removal, so the reducer never sees an invalid
    /// quantity.
    pub fn update_quantity(&self, id: fjordhem_core::ProductId, quantity: u32) -> Cart {
        if quantity < 1 {
            self.dispatch(CartAction::RemoveItem(id))
        } else {
            self.dispatch(CartAction::SetQuantity { id, quantity })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

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
    fn test_dispatch_updates_state() {
        let store = CartStore::new();
        store.dispatch(CartAction::AddItem(product("1", 4999)));
        let state = store.state();
        assert_eq!(state.lines.len(), 1);
        assert_eq!(state.total, Decimal::new(4999, 2));
    }

    #[test]
    fn test_listeners_notified_synchronously_with_new_state() {
        let store = CartStore::new();
        let seen_totals = Arc::new(Mutex::new(Vec::new()));
        {
            let seen_totals = Arc::clone(&seen_totals);
            store.subscribe(move |cart: &Cart| {
                seen_totals.lock().unwrap().push(cart.total);
            });
        }

        store.dispatch(CartAction::AddItem(product("1", 10000)));
        store.dispatch(CartAction::AddItem(product("1", 10000)));

        let seen = seen_totals.lock().unwrap().clone();
        assert_eq!(seen, vec![Decimal::from(100), Decimal::from(200)]);
    }

    #[test]
    fn test_unsubscribed_listener_not_called() {
        let store = CartStore::new();
        let count = Arc::new(AtomicUsize::new(0));
        let id = {
            let count = Arc::clone(&count);
            store.subscribe(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };
        store.unsubscribe(id);
        store.dispatch(CartAction::ToggleOpen);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_listener_can_dispatch_follow_up_action() {
        let store = Arc::new(CartStore::new());
        {
            let store = Arc::clone(&store);
            // Open the drawer the first time something lands in the cart.
            store.clone().subscribe(move |cart: &Cart| {
                if !cart.is_open && !cart.is_empty() {
                    store.dispatch(CartAction::ToggleOpen);
                }
            });
        }

        store.dispatch(CartAction::AddItem(product("1", 4999)));

        let state = store.state();
        assert!(state.is_open);
        assert_eq!(state.lines.len(), 1);
    }

    #[test]
    fn test_update_quantity_translates_zero_to_removal() {
        let store = CartStore::new();
        store.dispatch(CartAction::AddItem(product("1", 4999)));
        let state = store.update_quantity(ProductId::new("1"), 0);
        assert!(state.is_empty());
        assert_eq!(state.total, Decimal::ZERO);
    }

    #[test]
    fn test_update_quantity_dispatches_set_quantity() {
        let store = CartStore::new();
        store.dispatch(CartAction::AddItem(product("1", 4999)));
        let state = store.update_quantity(ProductId::new("1"), 3);
        assert_eq!(state.lines[0].quantity, 3);
    }
}
