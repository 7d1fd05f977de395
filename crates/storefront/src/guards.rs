//! Reactive route guards over the session state.
//!
//! Two mirrored policies: one renders its children only when a session
//! exists (redirecting to home otherwise), the other only when no session
//! exists (redirecting to the dashboard otherwise). Guards subscribe to the
//! session controller, so the outcome tracks every session transition
//! rather than being a one-shot check.

use std::sync::Arc;

use crate::observer::ListenerId;
use crate::session::{AuthState, SessionController};

/// Navigation targets a guard can redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Dashboard,
}

/// What the guard decides for the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the guarded children.
    Render,
    /// Navigate away instead.
    Redirect(Route),
}

/// Which sessions a guarded subtree accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPolicy {
    /// Children render only for an authenticated session; anonymous
    /// visitors are sent home.
    RequireSession,
    /// Children render only without a session; authenticated users are
    /// sent to the dashboard.
    RequireAnonymous,
}

impl GuardPolicy {
    /// Evaluate this policy against a session state.
    #[must_use]
    pub const fn evaluate(self, state: &AuthState) -> GuardOutcome {
        match (self, state.is_authenticated()) {
            (Self::RequireSession, true) | (Self::RequireAnonymous, false) => GuardOutcome::Render,
            (Self::RequireSession, false) => GuardOutcome::Redirect(Route::Home),
            (Self::RequireAnonymous, true) => GuardOutcome::Redirect(Route::Dashboard),
        }
    }
}

/// A live guard bound to the session controller.
pub struct RouteGuard {
    controller: Arc<SessionController>,
    listener: ListenerId,
}

impl RouteGuard {
    /// Bind a policy to the controller.
    ///
    /// `on_outcome` fires once immediately with the current state and again
    /// after every session transition.
    pub fn attach(
        controller: &Arc<SessionController>,
        policy: GuardPolicy,
        on_outcome: impl Fn(GuardOutcome) + Send + Sync + 'static,
    ) -> Self {
        on_outcome(policy.evaluate(&controller.state()));
        let listener = controller.subscribe(move |state: &AuthState| {
            on_outcome(policy.evaluate(state));
        });
        Self {
            controller: Arc::clone(controller),
            listener,
        }
    }
}

impl Drop for RouteGuard {
    fn drop(&mut self) {
        self.controller.unsubscribe(self.listener);
    }
}
