//! Session lifecycle tests: login, cookie persistence, restore, and the
//! periodic revalidation task.
//!
//! These use the real token service and an in-memory cookie store, driving
//! the same controller the storefront shell wires up at startup.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use fjordhem_storefront::session::{
    AUTH_COOKIE_NAME, Claims, CookieStore, MemoryCookieStore, SameSite, SessionController,
    SessionCookie, TokenService,
};
use jsonwebtoken::{EncodingKey, Header};
use secrecy::SecretString;

const SECRET: &str = "integration-test-signing-secret-0123456789";

fn controller(cookies: &Arc<MemoryCookieStore>) -> SessionController {
    let tokens = TokenService::new(&SecretString::from(SECRET));
    SessionController::new(tokens, Arc::clone(cookies) as Arc<dyn CookieStore>)
}

#[tokio::test]
async fn login_persists_a_hardened_cookie() {
    let cookies = Arc::new(MemoryCookieStore::new());
    let session = controller(&cookies);

    let state = session
        .login("admin@example.com", "Admin123!")
        .expect("demo credentials are accepted");

    assert!(state.is_authenticated());
    assert_eq!(
        state.user.as_ref().map(|u| u.email.to_string()),
        Some("admin@example.com".to_string())
    );

    let cookie = cookies.cookie(AUTH_COOKIE_NAME).expect("cookie persisted");
    assert_eq!(cookie.max_age, Duration::from_secs(60 * 60 * 24));
    assert!(cookie.secure);
    assert_eq!(cookie.same_site, SameSite::Strict);
    assert_eq!(Some(cookie.value), state.token);
}

#[tokio::test]
async fn rejected_login_clears_any_stale_cookie() {
    let cookies = Arc::new(MemoryCookieStore::new());
    let session = controller(&cookies);

    session
        .login("admin@example.com", "Admin123!")
        .expect("demo credentials are accepted");
    assert!(cookies.cookie(AUTH_COOKIE_NAME).is_some());

    let err = session
        .login("admin@example.com", "wrong")
        .expect_err("wrong password is rejected");
    assert_eq!(err.to_string(), "Invalid credentials");

    assert!(cookies.cookie(AUTH_COOKIE_NAME).is_none());
    let state = session.state();
    assert!(!state.is_authenticated());
    assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
}

#[tokio::test]
async fn session_is_restored_from_the_cookie_on_startup() {
    let cookies = Arc::new(MemoryCookieStore::new());
    controller(&cookies)
        .login("admin@example.com", "Admin123!")
        .expect("demo credentials are accepted");

    // A fresh controller over the same cookie jar stands in for a page
    // reload.
    let session = Arc::new(controller(&cookies));
    assert!(!session.state().is_authenticated());

    let handle = session.spawn_revalidation();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let state = session.state();
    assert!(state.is_authenticated());
    assert_eq!(
        state.user.as_ref().map(|u| u.name.clone()),
        Some("Admin User".to_string())
    );
    handle.abort();
}

#[tokio::test]
async fn expired_token_downgrades_silently() {
    let cookies = Arc::new(MemoryCookieStore::new());

    // A token minted 25 hours ago, one hour past its lifetime.
    let then = Utc::now() - chrono::Duration::hours(25);
    let claims = Claims {
        sub: "1".to_string(),
        email: "admin@example.com".to_string(),
        name: "Admin User".to_string(),
        iat: then.timestamp(),
        exp: (then + chrono::Duration::hours(24)).timestamp(),
        nbf: then.timestamp(),
    };
    let stale = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("encoding succeeds");
    cookies.set(SessionCookie::auth(stale));

    let session = controller(&cookies);
    let state = session.revalidate();

    // No error surfaces; the shopper is simply logged out.
    assert!(!state.is_authenticated());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn tampered_cookie_downgrades_silently() {
    let cookies = Arc::new(MemoryCookieStore::new());
    let session = controller(&cookies);
    session
        .login("admin@example.com", "Admin123!")
        .expect("demo credentials are accepted");

    cookies.set(SessionCookie::auth("not-a-real-token"));
    let state = session.revalidate();

    assert!(!state.is_authenticated());
    assert!(state.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn revalidation_task_notices_a_removed_cookie() {
    let cookies = Arc::new(MemoryCookieStore::new());
    let session = Arc::new(controller(&cookies));
    session
        .login("admin@example.com", "Admin123!")
        .expect("demo credentials are accepted");

    let handle = session.spawn_revalidation();
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(session.state().is_authenticated());

    // Simulate the cookie being cleared elsewhere; the next five-minute
    // tick downgrades the session.
    cookies.remove(AUTH_COOKIE_NAME);
    tokio::time::sleep(Duration::from_secs(5 * 60 + 1)).await;

    assert!(!session.state().is_authenticated());
    handle.abort();
}
