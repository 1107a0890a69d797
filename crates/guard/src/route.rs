//! Ordered route admission.

use std::sync::Arc;

use photomart_auth::{AccountRole, PhotographerStatus, capability};
use photomart_core::{Navigator, Screen};
use photomart_session::{SessionSnapshot, SessionStore};

use crate::policy::RoutePolicy;

/// Outcome of evaluating a route against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still hydrating: render nothing, redirect nowhere.
    Wait,
    /// Every requirement holds; the screen may render.
    Render,
    /// Send the user elsewhere, replacing the current history entry.
    Redirect(Screen),
}

/// Evaluate `policy` against a session snapshot.
///
/// Pure and deterministic. Checks run in a fixed order and the earliest
/// failing one wins:
///
/// 1. hydration: a still-loading session answers [`RouteDecision::Wait`]
/// 2. authentication: signed-out goes to the login screen
/// 3. role: wrong role goes to the forbidden screen
/// 4. permission: missing grant goes to the forbidden screen
/// 5. approval: photographer accounts on approval-gated routes land on
///    their status screen; an unset review status counts as pending
///
/// The approval step only applies to photographer accounts: a policy may
/// combine, say, no role requirement with `require_approval` and still let
/// an admin straight through.
pub fn evaluate_route(session: &SessionSnapshot, policy: &RoutePolicy) -> RouteDecision {
    if session.loading {
        return RouteDecision::Wait;
    }

    let user = session.user.as_ref();
    if user.is_none() {
        return RouteDecision::Redirect(Screen::Login);
    }

    if let Some(role) = policy.required_role {
        if !capability::has_role(user, role) {
            return RouteDecision::Redirect(Screen::Forbidden);
        }
    }

    if let Some(permission) = &policy.required_permission {
        if !capability::has_permission(user, permission) {
            return RouteDecision::Redirect(Screen::Forbidden);
        }
    }

    if policy.require_approval && capability::has_role(user, AccountRole::Photographer) {
        match capability::photographer_status(user) {
            Some(PhotographerStatus::Approved) => {}
            Some(PhotographerStatus::Pending) => {
                return RouteDecision::Redirect(Screen::PendingApproval);
            }
            Some(PhotographerStatus::Rejected) => {
                return RouteDecision::Redirect(Screen::ApplicationRejected);
            }
            Some(PhotographerStatus::Suspended) => {
                return RouteDecision::Redirect(Screen::AccountSuspended);
            }
            // Unknown review state fails closed: treat as still pending.
            None => return RouteDecision::Redirect(Screen::PendingApproval),
        }
    }

    RouteDecision::Render
}

/// The decision function bound to a live store and navigator.
///
/// [`check`](RouteGuard::check) evaluates and, for redirect decisions,
/// immediately asks the navigator to replace the current entry, so the
/// denied screen never becomes reachable through back-navigation.
/// Navigation failures are logged; the decision is returned either way so
/// the caller still knows not to render.
pub struct RouteGuard {
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(store: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    pub fn check(&self, policy: &RoutePolicy) -> RouteDecision {
        let decision = evaluate_route(&self.store.snapshot(), policy);
        if let RouteDecision::Redirect(screen) = decision {
            tracing::debug!(%screen, "route guard redirecting");
            if let Err(err) = self.navigator.replace(screen) {
                tracing::error!("route guard redirect failed: {err}");
            }
        }
        decision
    }
}
