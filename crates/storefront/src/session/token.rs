//! Signed session tokens.
//!
//! Tokens are HS256 JWTs with a 24-hour expiry and a not-before of "now".
//! Signing failures propagate; verification failures all collapse to
//! `None`, with expired and malformed tokens distinguished only in the
//! logs.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token lifetime.
const TOKEN_TTL_HOURS: i64 = 24;

/// Errors that can occur while minting a token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to create authentication token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// The identity a token binds: who the session belongs to.
///
/// Carries no timestamp claims on purpose - [`TokenService::sign`] always
/// mints `iat`/`exp`/`nbf` fresh, so stale claims on the input can never
/// collide with the new ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Subject id.
    pub id: String,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// The payload fields embedded in a signed session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject id.
    pub sub: String,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Issued-at timestamp (seconds).
    pub iat: i64,
    /// Expiry timestamp (seconds).
    pub exp: i64,
    /// Not-before timestamp (seconds).
    pub nbf: i64,
}

/// Mints and verifies session tokens with a single symmetric key.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        }
    }

    /// Mint a signed credential for an identity.
    ///
    /// The expiry is 24 hours from now, not-before is now, and issued-at is
    /// now; any timestamp claims on the input are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if signing itself fails.
    pub fn sign(&self, identity: &Identity) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.id.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            nbf: now.timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Validate a token and return its claims.
    ///
    /// Only HS256 is accepted. Every validation failure - expired,
    /// malformed, signature mismatch - returns `None`; callers rely on the
    /// absent-result contract for control flow, so this never raises.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf"]);

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::warn!("session token expired"),
                    ErrorKind::InvalidToken => tracing::warn!("malformed session token"),
                    _ => tracing::error!(error = %e, "session token verification failed"),
                }
                None
            }
        }
    }
}
