//! CLI command implementations.

pub mod products;
pub mod seed;

use fjordhem_storefront::api::ApiClient;
use fjordhem_storefront::config::StorefrontConfig;

/// Build a backend client from the environment.
pub fn client() -> Result<ApiClient, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = StorefrontConfig::from_env()?;
    Ok(ApiClient::new(&config))
}
