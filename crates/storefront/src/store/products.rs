//! Products store: the dashboard's view of the catalog.
//!
//! Holds the product list the admin dashboard renders and keeps it in sync
//! with backend mutations via explicit actions. Same observer contract as
//! the cart store.

use std::sync::Mutex;

use fjordhem_core::{Product, ProductId};

use crate::observer::{ListenerId, Listeners};

/// A products-list state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductsAction {
    /// Replace the whole list (initial fetch or refresh).
    Set(Vec<Product>),
    /// Append a newly created product.
    Add(Product),
    /// Replace the product with the same id. No-op when absent.
    Update(Product),
    /// Drop the product with the given id. No-op when absent.
    Delete(ProductId),
}

/// Apply a [`ProductsAction`] to a product list, yielding the next list.
#[must_use]
pub fn reduce_products(state: &[Product], action: ProductsAction) -> Vec<Product> {
    match action {
        ProductsAction::Set(products) => products,
        ProductsAction::Add(product) => {
            let mut products = state.to_vec();
            products.push(product);
            products
        }
        ProductsAction::Update(product) => state
            .iter()
            .map(|existing| {
                if existing.id == product.id {
                    product.clone()
                } else {
                    existing.clone()
                }
            })
            .collect(),
        ProductsAction::Delete(id) => state
            .iter()
            .filter(|product| product.id != id)
            .cloned()
            .collect(),
    }
}

/// State owner for the dashboard product list.
#[derive(Default)]
pub struct ProductsStore {
    state: Mutex<Vec<Product>>,
    listeners: Listeners<Vec<Product>>,
}

impl ProductsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current product list.
    #[must_use]
    pub fn state(&self) -> Vec<Product> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Apply an action and notify subscribers with the new list.
    pub fn dispatch(&self, action: ProductsAction) -> Vec<Product> {
        let next = {
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *state = reduce_products(&state, action);
            state.clone()
        };
        self.listeners.notify(&next);
        next
    }

    /// Register a listener invoked after every dispatch.
    pub fn subscribe(
        &self,
        listener: impl Fn(&Vec<Product>) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Remove a previously registered listener.
    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.unsubscribe(id);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fjordhem_core::Price;

    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::from_cents(1000).unwrap(),
            image: String::new(),
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            updated_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            user_id: None,
        }
    }

    #[test]
    fn test_set_replaces_list() {
        let next = reduce_products(
            &[product("1", "Old")],
            ProductsAction::Set(vec![product("2", "New")]),
        );
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, ProductId::new("2"));
    }

    #[test]
    fn test_add_appends() {
        let next = reduce_products(&[product("1", "A")], ProductsAction::Add(product("2", "B")));
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].name, "B");
    }

    #[test]
    fn test_update_replaces_matching_id_only() {
        let state = [product("1", "A"), product("2", "B")];
        let next = reduce_products(&state, ProductsAction::Update(product("2", "B2")));
        assert_eq!(next[0].name, "A");
        assert_eq!(next[1].name, "B2");
    }

    #[test]
    fn test_delete_drops_matching_id() {
        let state = [product("1", "A"), product("2", "B")];
        let next = reduce_products(&state, ProductsAction::Delete(ProductId::new("1")));
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, ProductId::new("2"));
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let state = [product("1", "A")];
        let next = reduce_products(&state, ProductsAction::Delete(ProductId::new("x")));
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_store_dispatch_notifies() {
        let store = ProductsStore::new();
        let seen = std::sync::Arc::new(Mutex::new(0usize));
        {
            let seen = std::sync::Arc::clone(&seen);
            store.subscribe(move |products: &Vec<Product>| {
                *seen.lock().unwrap() = products.len();
            });
        }
        store.dispatch(ProductsAction::Set(vec![product("1", "A"), product("2", "B")]));
        assert_eq!(*seen.lock().unwrap(), 2);
    }
}
