//! Seed the backend with the default furniture catalog.

use rust_decimal::Decimal;
use tracing::info;

use fjordhem_core::{NewProduct, Price};

/// The default catalog: (name, price in cents, image).
const DEFAULT_CATALOG: &[(&str, i64, &str)] = &[
    ("Stil Chair", 4999, "/images/Picture-1.png"),
    ("Eira Chair", 12999, "/images/Picture-2.png"),
    ("Lyng Table", 8999, "/images/Picture-3.png"),
    ("Lykke Sofa", 19999, "/images/Picture.png"),
    ("Skog Sofa", 7999, "/images/Picture-5.png"),
    ("Lumi table", 15999, "/images/Picture-6.png"),
    ("Viter sofa", 44999, "/images/Picture-7.png"),
    ("Klara Chair", 49999, "/images/Picture-8.png"),
];

/// Create every default product on the backend.
///
/// # Errors
///
/// Returns an error if configuration fails or any create request fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let client = super::client()?;

    info!(count = DEFAULT_CATALOG.len(), "Seeding default catalog");

    for (name, cents, image) in DEFAULT_CATALOG {
        let product = NewProduct {
            name: (*name).to_owned(),
            price: Price::from_cents(*cents)?,
            image: (*image).to_owned(),
            user_id: None,
        };
        let created = client.create_product(product).await?;
        info!(id = %created.id, name = %created.name, "Created product");
    }

    info!("Seeding complete");
    Ok(())
}

/// Parse a CLI price argument like "49.99".
///
/// # Errors
///
/// Returns an error when the input is not a valid non-negative decimal.
pub fn parse_price(input: &str) -> Result<Price, Box<dyn std::error::Error>> {
    let amount: Decimal = input.parse()?;
    Ok(Price::new(amount)?)
}
