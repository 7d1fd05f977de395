//! Unified error handling for the storefront application layer.
//!
//! Every failure degrades to a visible UI state rather than crashing: the
//! UI shell renders [`AppError::user_message`] in a dismissable
//! notification, an error panel, or an empty state. Auth token failures
//! never appear here at all - they collapse to a silent session downgrade
//! inside the session controller.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Purchase attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,
}

impl AppError {
    /// The message shown to the user for this failure.
    ///
    /// Backend messages are passed through verbatim when available, with a
    /// generic fallback otherwise; credential problems become a form-level
    /// message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_owned(),
            Self::Auth(_) => "Login failed".to_owned(),
            Self::Config(err) => err.to_string(),
            Self::EmptyCart => "Your cart is empty.".to_owned(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_message() {
        assert_eq!(AppError::EmptyCart.user_message(), "Your cart is empty.");
    }

    #[test]
    fn test_invalid_credentials_message() {
        let err = AppError::Auth(AuthError::InvalidCredentials);
        assert_eq!(err.user_message(), "Invalid credentials");
    }
}
