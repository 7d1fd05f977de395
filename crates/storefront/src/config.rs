//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required in development
//! - `FJORDHEM_TOKEN_SECRET` - Session token signing secret (min 32 chars)
//!
//! ## Optional
//! - `FJORDHEM_API_URL` - Backend base URL (default: `http://localhost:3001`)
//! - `FJORDHEM_ENV` - `development` or `production` (default: development)
//!
//! In development the guard refuses to start without an explicit secret.
//! Outside development a missing secret falls back to a fixed demo key.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;

/// Demo signing key used outside development when no secret is configured.
const FALLBACK_TOKEN_SECRET: &str = "fjordhem-demo-256-bit-token-signing-key!";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Runtime environment the storefront is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("FJORDHEM_ENV").as_deref() {
            Err(_) | Ok("development" | "dev") => Ok(Self::Development),
            Ok("production" | "prod") => Ok(Self::Production),
            Ok(other) => Err(ConfigError::InvalidEnvVar(
                "FJORDHEM_ENV".to_owned(),
                format!("unknown environment '{other}'"),
            )),
        }
    }
}

/// Storefront application configuration.
///
/// Implements `Debug` via `SecretString`, so the signing secret is never
/// printed.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the local JSON backend.
    pub api_url: Url,
    /// Session token signing secret.
    pub token_secret: SecretString,
    /// Runtime environment.
    pub environment: Environment,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API URL is malformed, if the secret is
    /// too short, or if the secret is missing while running in development.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = Environment::from_env()?;

        let api_url = get_env_or_default("FJORDHEM_API_URL", "http://localhost:3001");
        let api_url = Url::parse(&api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("FJORDHEM_API_URL".to_owned(), e.to_string()))?;

        let token_secret = load_token_secret(environment)?;

        Ok(Self {
            api_url,
            token_secret,
            environment,
        })
    }

    /// Build a configuration directly, validating the secret length.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InsecureSecret` if the secret is too short.
    pub fn new(
        api_url: Url,
        token_secret: SecretString,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        validate_token_secret(&token_secret, "token_secret")?;
        Ok(Self {
            api_url,
            token_secret,
            environment,
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Load the token signing secret, applying the development-mode guard.
fn load_token_secret(environment: Environment) -> Result<SecretString, ConfigError> {
    match std::env::var("FJORDHEM_TOKEN_SECRET") {
        Ok(value) => {
            let secret = SecretString::from(value);
            validate_token_secret(&secret, "FJORDHEM_TOKEN_SECRET")?;
            Ok(secret)
        }
        Err(_) if environment == Environment::Development => Err(ConfigError::MissingEnvVar(
            "FJORDHEM_TOKEN_SECRET".to_owned(),
        )),
        Err(_) => {
            tracing::warn!("FJORDHEM_TOKEN_SECRET not set, using the built-in demo key");
            Ok(SecretString::from(FALLBACK_TOKEN_SECRET))
        }
    }
}

/// Validate that a token secret meets minimum length requirements.
fn validate_token_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!(
                "must be at least {} characters (got {})",
                MIN_TOKEN_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}
