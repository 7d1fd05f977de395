//! Session controller: login, logout, and periodic token revalidation.
//!
//! Credentials are checked against a single hard-coded demo account; the
//! interesting part is the lifecycle around the token. The controller owns
//! the cookie, re-verifies it at startup and every five minutes, and
//! downgrades to logged-out silently whenever verification fails.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use fjordhem_core::{Email, UserId};

use crate::observer::{ListenerId, Listeners};

use super::cookie::{AUTH_COOKIE_NAME, CookieStore, SessionCookie};
use super::token::{Identity, TokenService};
use super::AuthError;

/// How often the persisted token is re-verified.
const REVALIDATION_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// The single account the demo storefront accepts.
const DEMO_EMAIL: &str = "admin@example.com";
const DEMO_PASSWORD: &str = "Admin123!";
const DEMO_USER_ID: &str = "1";
const DEMO_USER_NAME: &str = "Admin User";

/// The logged-in user's identity, decoded from verified claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
}

/// Observable session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// The authenticated user, if any.
    pub user: Option<SessionUser>,
    /// The raw signed token backing the session.
    pub token: Option<String>,
    /// Whether a login attempt is in flight.
    pub is_loading: bool,
    /// Form-level error from the last failed login.
    pub error: Option<String>,
}

impl AuthState {
    /// Whether a session exists.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Session state transition.
#[derive(Debug, Clone)]
enum AuthAction {
    LoginStart,
    LoginSuccess { user: SessionUser, token: String },
    LoginError(String),
    /// Re-adopt an already-persisted token without touching the cookie, so
    /// periodic revalidation does not slide the cookie's expiry.
    Restore { user: SessionUser, token: String },
    Logout,
}

/// Pure reducer over [`AuthState`].
fn reduce(state: &AuthState, action: &AuthAction) -> AuthState {
    match action {
        AuthAction::LoginStart => AuthState {
            is_loading: true,
            error: None,
            ..state.clone()
        },
        AuthAction::LoginSuccess { user, token } | AuthAction::Restore { user, token } => {
            AuthState {
                user: Some(user.clone()),
                token: Some(token.clone()),
                is_loading: false,
                error: None,
            }
        }
        AuthAction::LoginError(message) => AuthState {
            user: None,
            token: None,
            is_loading: false,
            error: Some(message.clone()),
        },
        AuthAction::Logout => AuthState::default(),
    }
}

/// Component owning the login/logout/token-verification lifecycle.
pub struct SessionController {
    tokens: TokenService,
    cookies: Arc<dyn CookieStore>,
    state: Mutex<AuthState>,
    listeners: Listeners<AuthState>,
}

impl SessionController {
    /// Create a controller over a token service and a cookie store.
    #[must_use]
    pub fn new(tokens: TokenService, cookies: Arc<dyn CookieStore>) -> Self {
        Self {
            tokens,
            cookies,
            state: Mutex::new(AuthState::default()),
            listeners: Listeners::default(),
        }
    }

    /// Snapshot of the current session state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Register a listener invoked after every session transition.
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + Send + Sync + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Remove a previously registered listener.
    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.unsubscribe(id);
    }

    /// Apply a transition, run its cookie side effect, notify listeners.
    fn dispatch(&self, action: AuthAction) -> AuthState {
        match &action {
            AuthAction::LoginSuccess { token, .. } => {
                self.cookies.set(SessionCookie::auth(token.clone()));
            }
            AuthAction::LoginError(_) | AuthAction::Logout => {
                self.cookies.remove(AUTH_COOKIE_NAME);
            }
            AuthAction::LoginStart | AuthAction::Restore { .. } => {}
        }

        let next = {
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *state = reduce(&state, &action);
            state.clone()
        };
        self.listeners.notify(&next);
        next
    }

    /// Attempt a login against the demo account.
    ///
    /// On success, mints a token, persists the cookie, and transitions to
    /// authenticated. On credential mismatch the persisted token is
    /// cleared and the error lands both in the return value and in
    /// [`AuthState::error`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on mismatch, or
    /// [`AuthError::Token`] if minting the token fails.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthState, AuthError> {
        self.dispatch(AuthAction::LoginStart);

        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            let err = AuthError::InvalidCredentials;
            self.dispatch(AuthAction::LoginError(err.to_string()));
            return Err(err);
        }

        let identity = Identity {
            id: DEMO_USER_ID.to_owned(),
            email: email.to_owned(),
            name: DEMO_USER_NAME.to_owned(),
        };

        let token = match self.tokens.sign(&identity) {
            Ok(token) => token,
            Err(e) => {
                self.dispatch(AuthAction::LoginError("Login failed".to_owned()));
                return Err(e.into());
            }
        };

        let user = session_user(&identity.id, &identity.email, &identity.name);
        Ok(self.dispatch(AuthAction::LoginSuccess { user, token }))
    }

    /// Drop the session and the persisted cookie.
    pub fn logout(&self) -> AuthState {
        self.dispatch(AuthAction::Logout)
    }

    /// Re-read and re-verify the persisted token.
    ///
    /// Runs once at startup and every five minutes thereafter (see
    /// [`Self::spawn_revalidation`]). An absent cookie or a failed
    /// verification transitions to logged-out; a valid token refreshes the
    /// authenticated state from its claims, leaving the cookie untouched.
    pub fn revalidate(&self) -> AuthState {
        match self.cookies.get(AUTH_COOKIE_NAME) {
            Some(token) => match self.tokens.verify(&token) {
                Some(claims) => self.dispatch(AuthAction::Restore {
                    user: session_user(&claims.sub, &claims.email, &claims.name),
                    token,
                }),
                None => {
                    tracing::debug!("stored session token failed verification, logging out");
                    self.dispatch(AuthAction::Logout)
                }
            },
            None => {
                let state = self.state();
                if state.is_authenticated() || state.token.is_some() {
                    self.dispatch(AuthAction::Logout)
                } else {
                    state
                }
            }
        }
    }

    /// Spawn the recurring revalidation task.
    ///
    /// The first tick fires immediately (the "on mount" check), then every
    /// five minutes. Drop the handle or abort it to stop revalidating.
    pub fn spawn_revalidation(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(REVALIDATION_INTERVAL);
            loop {
                interval.tick().await;
                controller.revalidate();
            }
        })
    }
}

/// Build the session user from verified claim fields.
///
/// Claims only exist after signature verification against our own key, so
/// the email is structurally valid; a parse failure falls back to a fixed
/// placeholder address rather than failing the session.
fn session_user(sub: &str, email: &str, name: &str) -> SessionUser {
    const PLACEHOLDER_EMAIL: &str = "unknown@invalid.local";
    SessionUser {
        id: UserId::new(sub),
        email: Email::parse(email)
            .or_else(|_| Email::parse(PLACEHOLDER_EMAIL))
            .unwrap_or_else(|_| unreachable!("placeholder email is valid")),
        name: name.to_owned(),
    }
}
