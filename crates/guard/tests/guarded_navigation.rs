//! Guard behavior over a real session store, stub gateway, and recording
//! navigator. Exercises the full path a screen takes: hydrate, evaluate,
//! redirect or render.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use photomart_auth::{AccountRole, PhotographerStatus, User};
use photomart_core::{Navigator, NavigationError, Screen, UserId};
use photomart_guard::{
    CapabilityGate, GateDecision, PhotographerGateDecision, PhotographerStatusGate, RouteDecision,
    RouteGuard, RoutePolicy,
};
use photomart_session::{
    AbilityGrant, AuthError, AuthGateway, AuthSession, CredentialStore, CredentialVault,
    LoginRequest, MemoryCredentialStore, ProfileSnapshot, RegisterRequest, SessionStore,
};

#[derive(Default)]
struct RecordingNavigator {
    replaced: Mutex<Vec<Screen>>,
    pushed: Mutex<Vec<Screen>>,
}

impl RecordingNavigator {
    fn replaced(&self) -> Vec<Screen> {
        self.replaced.lock().unwrap().clone()
    }

    fn pushed(&self) -> Vec<Screen> {
        self.pushed.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, screen: Screen) -> Result<(), NavigationError> {
        self.replaced.lock().unwrap().push(screen);
        Ok(())
    }

    fn push(&self, screen: Screen) -> Result<(), NavigationError> {
        self.pushed.lock().unwrap().push(screen);
        Ok(())
    }
}

/// Gateway whose only useful answer is a canned ability grant; the guard
/// tests never sign in through it.
struct GrantGateway {
    grant: AbilityGrant,
}

#[async_trait]
impl AuthGateway for GrantGateway {
    async fn login(&self, _request: &LoginRequest) -> Result<AuthSession, AuthError> {
        Err(AuthError::Network("not wired in this test".to_string()))
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<AuthSession, AuthError> {
        Err(AuthError::Network("not wired in this test".to_string()))
    }

    async fn logout(&self) -> Result<(), AuthError> {
        Ok(())
    }

    async fn fetch_abilities(&self) -> Result<AbilityGrant, AuthError> {
        Ok(self.grant.clone())
    }
}

fn suspension_grant() -> AbilityGrant {
    AbilityGrant {
        role: AccountRole::Photographer,
        permissions: vec![],
        photographer_status: Some(PhotographerStatus::Suspended),
    }
}

/// A hydrated store seeded with `user` (or signed out when `None`), plus the
/// navigator a guard over it will drive.
fn hydrated_store(user: Option<User>) -> (Arc<SessionStore>, Arc<RecordingNavigator>) {
    let backing = Arc::new(MemoryCredentialStore::new());
    if let Some(user) = &user {
        backing.set("auth.token", "token-for-tests").unwrap();
        backing
            .set(
                "auth.profile",
                &ProfileSnapshot::of(user).to_json().unwrap(),
            )
            .unwrap();
    }

    let vault = Arc::new(CredentialVault::new(backing));
    let gateway = Arc::new(GrantGateway {
        grant: suspension_grant(),
    });
    let store = Arc::new(SessionStore::new(gateway, vault));
    store.hydrate();

    (store, Arc::new(RecordingNavigator::default()))
}

fn pending_photographer() -> User {
    User::new(
        UserId::new(),
        "noor@example.com",
        "Noor Haddad",
        AccountRole::Photographer,
    )
    .with_photographer_status(PhotographerStatus::Pending)
}

fn buyer() -> User {
    User::new(
        UserId::new(),
        "sam@example.com",
        "Sam Ortega",
        AccountRole::Buyer,
    )
}

#[tokio::test]
async fn unauthenticated_visit_to_an_admin_screen_lands_on_login() {
    let (store, navigator) = hydrated_store(None);
    let guard = RouteGuard::new(store, navigator.clone());

    let decision = guard.check(&RoutePolicy::authenticated().with_role(AccountRole::Admin));

    assert_eq!(decision, RouteDecision::Redirect(Screen::Login));
    assert_eq!(navigator.replaced(), vec![Screen::Login]);
    assert!(navigator.pushed().is_empty(), "redirects must replace, not push");
}

#[tokio::test]
async fn pending_photographer_is_routed_to_the_pending_screen() {
    let (store, navigator) = hydrated_store(Some(pending_photographer()));
    let guard = RouteGuard::new(store, navigator.clone());

    let policy = RoutePolicy::authenticated()
        .with_role(AccountRole::Photographer)
        .with_approval_required();
    let decision = guard.check(&policy);

    assert_eq!(decision, RouteDecision::Redirect(Screen::PendingApproval));
    assert_eq!(navigator.replaced(), vec![Screen::PendingApproval]);
}

#[tokio::test]
async fn buyer_sees_the_fallback_of_an_admin_gate() {
    let (store, _navigator) = hydrated_store(Some(buyer()));

    let gate = CapabilityGate::new().require_role(AccountRole::Admin);
    assert_eq!(gate.evaluate(&store.snapshot()), GateDecision::Fallback);
}

#[tokio::test]
async fn before_hydration_the_guard_waits_and_stays_put() {
    let backing = Arc::new(MemoryCredentialStore::new());
    let vault = Arc::new(CredentialVault::new(backing));
    let gateway = Arc::new(GrantGateway {
        grant: suspension_grant(),
    });
    let store = Arc::new(SessionStore::new(gateway, vault));
    let navigator = Arc::new(RecordingNavigator::default());
    let guard = RouteGuard::new(store.clone(), navigator.clone());

    let policy = RoutePolicy::authenticated().with_role(AccountRole::Admin);
    assert_eq!(guard.check(&policy), RouteDecision::Wait);
    assert!(navigator.replaced().is_empty());

    // Hydration lands, the same evaluation now resolves.
    store.hydrate();
    assert_eq!(guard.check(&policy), RouteDecision::Redirect(Screen::Login));
}

#[tokio::test]
async fn suspension_arriving_via_refresh_flips_the_photographer_gate() {
    let approved = pending_photographer().with_photographer_status(PhotographerStatus::Approved);
    let (store, navigator) = hydrated_store(Some(approved));

    let gate = PhotographerStatusGate::new();
    assert!(gate.evaluate(&store.snapshot()).shows_content());

    // Moderator suspends the account server-side; the screen re-fetches
    // abilities and re-evaluates in place.
    store.refresh_abilities().await.unwrap();

    match gate.evaluate(&store.snapshot()) {
        PhotographerGateDecision::Panel(panel) => {
            assert_eq!(panel.title, "Account suspended");
        }
        other => panic!("expected the suspended panel, got {other:?}"),
    }
    // The gate swap happens inline; nothing navigated.
    assert!(navigator.replaced().is_empty());
    assert!(navigator.pushed().is_empty());

    // And the route guard now agrees with the gate.
    let guard = RouteGuard::new(store, navigator.clone());
    let decision = guard.check(&RoutePolicy::authenticated().with_approval_required());
    assert_eq!(decision, RouteDecision::Redirect(Screen::AccountSuspended));
}
