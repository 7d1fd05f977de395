//! Integration test support for Fjordhem.
//!
//! Provides an in-process fixture backend that mimics the REST JSON server
//! the storefront talks to in development: a single `/products` collection
//! with generated string IDs, merge-on-PATCH semantics, and 404 for unknown
//! IDs. Each test spawns its own backend on an ephemeral port so tests can
//! run in parallel without sharing state.
//!
//! Run with: cargo test -p fjordhem-integration-tests

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tokio::task::JoinHandle;
use url::Url;
use uuid::Uuid;

/// Shared product collection. Documents are stored as raw JSON so the
/// fixture stays as schema-agnostic as the development server it stands
/// in for.
type Collection = Arc<Mutex<Vec<Value>>>;

/// An in-process REST backend for a `/products` collection.
///
/// The server is aborted when [`TestBackend::shutdown`] is called or the
/// value is dropped.
pub struct TestBackend {
    addr: SocketAddr,
    products: Collection,
    handle: JoinHandle<()>,
}

impl TestBackend {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound. Test-only code.
    pub async fn spawn() -> Self {
        let products: Collection = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .route("/products", get(list_products).post(create_product))
            .route(
                "/products/{id}",
                get(get_product).patch(patch_product).delete(delete_product),
            )
            .with_state(Arc::clone(&products));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fixture backend listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read fixture backend address");

        let handle = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, app).await {
                // The task is aborted on shutdown; serve errors outside of
                // that are test environment failures worth surfacing.
                panic!("fixture backend failed: {error}");
            }
        });

        Self {
            addr,
            products,
            handle,
        }
    }

    /// Base URL of the running backend, suitable for `StorefrontConfig`.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a valid URL. Test-only code.
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("Fixture backend address is a valid URL")
    }

    /// Number of products currently stored.
    ///
    /// # Panics
    ///
    /// Panics if the collection lock is poisoned. Test-only code.
    pub fn product_count(&self) -> usize {
        self.products.lock().expect("Collection lock poisoned").len()
    }

    /// Raw stored document for `id`, if present.
    ///
    /// # Panics
    ///
    /// Panics if the collection lock is poisoned. Test-only code.
    pub fn stored_product(&self, id: &str) -> Option<Value> {
        self.products
            .lock()
            .expect("Collection lock poisoned")
            .iter()
            .find(|doc| doc_id(doc) == Some(id))
            .cloned()
    }

    /// Stop serving. Requests sent afterwards fail at the connection level,
    /// which is how tests exercise the storefront's network error paths.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn doc_id(doc: &Value) -> Option<&str> {
    doc.get("id").and_then(Value::as_str)
}

async fn list_products(State(products): State<Collection>) -> Json<Vec<Value>> {
    let products = products.lock().expect("Collection lock poisoned");
    Json(products.clone())
}

async fn get_product(State(products): State<Collection>, Path(id): Path<String>) -> Response {
    let products = products.lock().expect("Collection lock poisoned");
    match products.iter().find(|doc| doc_id(doc) == Some(id.as_str())) {
        Some(doc) => Json(doc.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create_product(
    State(products): State<Collection>,
    Json(mut body): Json<Value>,
) -> Response {
    let Some(fields) = body.as_object_mut() else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    if !fields.contains_key("id") {
        fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    }

    let mut products = products.lock().expect("Collection lock poisoned");
    products.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn patch_product(
    State(products): State<Collection>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Response {
    let Some(patch) = patch.as_object() else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut products = products.lock().expect("Collection lock poisoned");
    let Some(doc) = products
        .iter_mut()
        .find(|doc| doc_id(doc) == Some(id.as_str()))
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if let Some(fields) = doc.as_object_mut() {
        for (key, value) in patch {
            // IDs are immutable once assigned.
            if key != "id" {
                fields.insert(key.clone(), value.clone());
            }
        }
    }

    Json(doc.clone()).into_response()
}

async fn delete_product(State(products): State<Collection>, Path(id): Path<String>) -> Response {
    let mut products = products.lock().expect("Collection lock poisoned");
    let before = products.len();
    products.retain(|doc| doc_id(doc) != Some(id.as_str()));

    if products.len() < before {
        Json(Value::Object(serde_json::Map::new())).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
