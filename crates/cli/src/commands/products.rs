//! Product CRUD commands.

use tracing::info;

use fjordhem_core::{NewProduct, ProductId, ProductPatch};

use super::seed::parse_price;

/// List all products.
///
/// # Errors
///
/// Returns an error if configuration or the backend request fails.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let client = super::client()?;
    let products = client.list_products().await?;

    info!(count = products.len(), "Fetched products");
    for product in products {
        info!(
            id = %product.id,
            name = %product.name,
            price = %product.price,
            "product"
        );
    }
    Ok(())
}

/// Show a single product.
///
/// # Errors
///
/// Returns an error if configuration or the backend request fails.
pub async fn get(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = super::client()?;
    let product = client.get_product(&ProductId::new(id)).await?;
    info!(
        id = %product.id,
        name = %product.name,
        price = %product.price,
        image = %product.image,
        updated_at = %product.updated_at,
        "product"
    );
    Ok(())
}

/// Create a product.
///
/// # Errors
///
/// Returns an error if the price is invalid or the backend request fails.
pub async fn create(name: &str, price: &str, image: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = super::client()?;
    let created = client
        .create_product(NewProduct {
            name: name.to_owned(),
            price: parse_price(price)?,
            image: image.to_owned(),
            user_id: None,
        })
        .await?;
    info!(id = %created.id, name = %created.name, "Created product");
    Ok(())
}

/// Apply a partial update to a product.
///
/// # Errors
///
/// Returns an error if no fields were given, the price is invalid, or the
/// backend request fails.
pub async fn update(
    id: &str,
    name: Option<String>,
    price: Option<String>,
    image: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let patch = ProductPatch {
        name,
        price: price.as_deref().map(parse_price).transpose()?,
        image,
    };
    if patch.is_empty() {
        return Err("nothing to update: pass --name, --price, or --image".into());
    }

    let client = super::client()?;
    let updated = client.update_product(&ProductId::new(id), patch).await?;
    info!(id = %updated.id, updated_at = %updated.updated_at, "Updated product");
    Ok(())
}

/// Delete a product.
///
/// # Errors
///
/// Returns an error if configuration or the backend request fails.
pub async fn delete(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = super::client()?;
    client.delete_product(&ProductId::new(id)).await?;
    info!(id, "Deleted product");
    Ok(())
}
