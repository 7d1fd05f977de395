//! Session cookie persistence.
//!
//! The token lives in a single cookie owned by the session controller.
//! The controller talks to a [`CookieStore`] trait so the UI shell can
//! plug in the real browser/jar implementation; tests and the CLI use the
//! in-memory store.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Cookie key holding the signed session token.
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// `SameSite` cookie policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// A cookie value plus the attributes it is persisted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value (the signed token).
    pub value: String,
    /// Expiry relative to now.
    pub max_age: Duration,
    /// Only sent over HTTPS.
    pub secure: bool,
    /// Cross-site send policy.
    pub same_site: SameSite,
}

impl SessionCookie {
    /// The auth cookie for a token: 1-day expiry, secure, strict same-site.
    #[must_use]
    pub fn auth(token: impl Into<String>) -> Self {
        Self {
            name: AUTH_COOKIE_NAME.to_owned(),
            value: token.into(),
            max_age: Duration::from_secs(60 * 60 * 24),
            secure: true,
            same_site: SameSite::Strict,
        }
    }
}

/// Persistence seam for session cookies.
pub trait CookieStore: Send + Sync {
    /// Read a cookie value by name.
    fn get(&self, name: &str) -> Option<String>;
    /// Persist a cookie.
    fn set(&self, cookie: SessionCookie);
    /// Remove a cookie by name. Unknown names are ignored.
    fn remove(&self, name: &str);
}

/// In-memory cookie store for tests, the CLI, and headless use.
#[derive(Default)]
pub struct MemoryCookieStore {
    values: Mutex<HashMap<String, SessionCookie>>,
}

impl MemoryCookieStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full stored cookie, attributes included.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<SessionCookie> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.cookie(name).map(|cookie| cookie.value)
    }

    fn set(&self, cookie: SessionCookie) {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(cookie.name.clone(), cookie);
    }

    fn remove(&self, name: &str) {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_cookie_attributes() {
        let cookie = SessionCookie::auth("tok");
        assert_eq!(cookie.name, "auth_token");
        assert_eq!(cookie.max_age, Duration::from_secs(86_400));
        assert!(cookie.secure);
        assert_eq!(cookie.same_site, SameSite::Strict);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryCookieStore::new();
        store.set(SessionCookie::auth("tok"));
        assert_eq!(store.get(AUTH_COOKIE_NAME).as_deref(), Some("tok"));
        store.remove(AUTH_COOKIE_NAME);
        assert!(store.get(AUTH_COOKIE_NAME).is_none());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let store = MemoryCookieStore::new();
        store.remove("nothing");
        assert!(store.get("nothing").is_none());
    }
}
