//! Product catalog types.
//!
//! Products are owned by the backend; the storefront caches them read-only
//! and only changes them through the explicit create/update/delete
//! operations on the backend client. Wire format matches the backend's JSON
//! documents (`camelCase` keys, RFC 3339 timestamps, numeric prices).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ProductId, UserId};
use super::price::Price;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend-assigned identity.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image reference (URL or data URL).
    pub image: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp, refreshed by every update operation.
    pub updated_at: DateTime<Utc>,
    /// Owning user, when the product was created through the dashboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Payload for creating a product.
///
/// The backend assigns the ID; the client stamps both timestamps at
/// request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Partial-update payload for a product.
///
/// Only set fields are sent; the client stamps a refreshed `updatedAt`
/// alongside whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductPatch {
    /// Whether the patch carries no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.image.is_none()
    }
}
