//! REST client for the local JSON backend.
//!
//! Uses `reqwest` for HTTP and caches catalog reads with `moka`
//! (5-minute TTL). Mutations invalidate the cache. Failures are collapsed
//! to one generic message per operation, passed through verbatim to the
//! notification layer; there is no retry.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use fjordhem_core::{NewProduct, Product, ProductId, ProductPatch};

use crate::config::StorefrontConfig;

/// Cache key for catalog reads.
const PRODUCTS_KEY: &str = "products";

/// Errors that can occur talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection refused, timeout, bad URL).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("HTTP error! status: {0}")]
    Status(reqwest::StatusCode),

    /// Product does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The requested operation, used to pick the user-facing message.
    #[error("{0}")]
    Operation(String),
}

impl ApiError {
    /// The generic, user-facing message for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Operation(msg) => msg.clone(),
            Self::NotFound(id) => format!("Failed to fetch product {id}"),
            Self::Http(_) | Self::Status(_) => {
                "Failed to fetch products. Please make sure the server is running.".to_owned()
            }
        }
    }

    /// Wrap any failure into the per-operation generic message, keeping the
    /// original as a structured log event.
    fn for_operation(self, message: &str) -> Self {
        tracing::error!(error = %self, "{message}");
        Self::Operation(message.to_owned())
    }
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Box<Product>),
}

/// Client for the local JSON backend.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<String, CacheValue>,
}

impl ApiClient {
    /// Create a new backend client from configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::with_base_url(config.api_url.clone())
    }

    /// Create a client against an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: Url) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url,
                cache,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|_| ApiError::Status(reqwest::StatusCode::BAD_REQUEST))
    }

    async fn invalidate(&self) {
        self.inner.cache.invalidate_all();
    }

    // =========================================================================
    // Catalog reads
    // =========================================================================

    /// Fetch the full product set (`GET /products`).
    ///
    /// # Errors
    ///
    /// Returns an error with the generic fetch message if the request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(PRODUCTS_KEY).await {
            debug!("Cache hit for products");
            return Ok(products.as_ref().clone());
        }

        let products = self
            .fetch_products()
            .await
            .map_err(|e| {
                e.for_operation("Failed to fetch products. Please make sure the server is running.")
            })?;

        self.inner
            .cache
            .insert(
                PRODUCTS_KEY.to_owned(),
                CacheValue::Products(Arc::new(products.clone())),
            )
            .await;

        Ok(products)
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("products")?)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response.json().await?)
    }

    /// Fetch a single product (`GET /products/{id}`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for a 404; any other failure carries the
    /// generic per-product message.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{id}");
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("products/{id}"))?)
            .send()
            .await
            .map_err(|e| ApiError::from(e).for_operation(&format!("Failed to fetch product {id}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id.clone()));
        }
        if !status.is_success() {
            return Err(ApiError::Status(status)
                .for_operation(&format!("Failed to fetch product {id}")));
        }

        let product: Product = response
            .json()
            .await
            .map_err(|e| ApiError::from(e).for_operation(&format!("Failed to fetch product {id}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Catalog mutations
    // =========================================================================

    /// Create a product (`POST /products`), stamping both timestamps now.
    ///
    /// # Errors
    ///
    /// Returns an error with the generic create message if the request fails.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: NewProduct) -> Result<Product, ApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct CreateBody {
            #[serde(flatten)]
            product: NewProduct,
            created_at: chrono::DateTime<Utc>,
            updated_at: chrono::DateTime<Utc>,
        }

        let now = Utc::now();
        let body = CreateBody {
            product,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .send_json(reqwest::Method::POST, "products", &body)
            .await
            .map_err(|e| e.for_operation("Failed to create product"))?;

        self.invalidate().await;
        Ok(created)
    }

    /// Partially update a product (`PATCH /products/{id}`) with a refreshed
    /// `updatedAt`.
    ///
    /// # Errors
    ///
    /// Returns an error with the generic update message if the request fails.
    #[instrument(skip(self, patch), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Product, ApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct PatchBody {
            #[serde(flatten)]
            patch: ProductPatch,
            updated_at: chrono::DateTime<Utc>,
        }

        let body = PatchBody {
            patch,
            updated_at: Utc::now(),
        };

        let updated = self
            .send_json(reqwest::Method::PATCH, &format!("products/{id}"), &body)
            .await
            .map_err(|e| e.for_operation(&format!("Failed to update product {id}")))?;

        self.invalidate().await;
        Ok(updated)
    }

    /// Delete a product (`DELETE /products/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error with the generic delete message if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        let result: Result<(), ApiError> = async {
            let response = self
                .inner
                .client
                .delete(self.endpoint(&format!("products/{id}"))?)
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::Status(status));
            }
            Ok(())
        }
        .await;

        result.map_err(|e| e.for_operation("Failed to delete product"))?;
        self.invalidate().await;
        Ok(())
    }

    async fn send_json<B: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<Product, ApiError> {
        let response = self
            .inner
            .client
            .request(method, self.endpoint(path)?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        Ok(response.json().await?)
    }
}
