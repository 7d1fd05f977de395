//! Admin catalog operations: product CRUD behind the dashboard.
//!
//! Pairs the backend client with the products store so the dashboard list
//! stays consistent with what the backend accepted: the store is only
//! updated after a successful backend call, and backend failures leave it
//! untouched.

use fjordhem_core::{NewProduct, Product, ProductId, ProductPatch};

use crate::api::ApiClient;
use crate::error::AppError;
use crate::store::{ProductsAction, ProductsStore};

/// Dashboard-side catalog manager.
pub struct AdminCatalog {
    client: ApiClient,
    store: ProductsStore,
}

impl AdminCatalog {
    /// Create a manager over a backend client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            store: ProductsStore::new(),
        }
    }

    /// The products store the dashboard renders from.
    #[must_use]
    pub const fn store(&self) -> &ProductsStore {
        &self.store
    }

    /// Reload the full catalog into the store.
    ///
    /// # Errors
    ///
    /// Returns the backend failure; the store keeps its previous contents.
    pub async fn refresh(&self) -> Result<Vec<Product>, AppError> {
        let products = self.client.list_products().await?;
        Ok(self.store.dispatch(ProductsAction::Set(products)))
    }

    /// Create a product and append it to the store.
    ///
    /// # Errors
    ///
    /// Returns the backend failure; nothing is appended on error.
    pub async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        let created = self.client.create_product(product).await?;
        self.store.dispatch(ProductsAction::Add(created.clone()));
        Ok(created)
    }

    /// Apply a partial update and sync the store.
    ///
    /// # Errors
    ///
    /// Returns the backend failure; the store keeps the previous product.
    pub async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<Product, AppError> {
        let updated = self.client.update_product(id, patch).await?;
        self.store.dispatch(ProductsAction::Update(updated.clone()));
        Ok(updated)
    }

    /// Delete a product and drop it from the store.
    ///
    /// # Errors
    ///
    /// Returns the backend failure; the store keeps the product on error.
    pub async fn delete(&self, id: &ProductId) -> Result<(), AppError> {
        self.client.delete_product(id).await?;
        self.store.dispatch(ProductsAction::Delete(id.clone()));
        Ok(())
    }
}
