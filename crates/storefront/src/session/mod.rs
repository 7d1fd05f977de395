//! Session layer: signed tokens, cookie persistence, and the controller.
//!
//! The session is a signed HS256 credential persisted in a cookie and
//! re-verified on an interval. Verification failures never raise: they
//! collapse to "no session" and the controller downgrades to logged-out.

mod controller;
mod cookie;
mod token;

pub use controller::{AuthState, SessionController, SessionUser};
pub use cookie::{AUTH_COOKIE_NAME, CookieStore, MemoryCookieStore, SameSite, SessionCookie};
pub use token::{Claims, Identity, TokenError, TokenService};

use thiserror::Error;

/// Errors surfaced by session operations.
///
/// Token verification failures are not represented here: they are not
/// errors, they are the logged-out state.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password did not match the known account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Minting a token failed (e.g., misconfigured key material).
    #[error("token error: {0}")]
    Token(#[from] TokenError),
}
