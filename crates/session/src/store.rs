//! The session store: single authoritative holder of "who is signed in".

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use photomart_auth::{AccountRole, Permission, PhotographerStatus, User, capability};

use crate::events::{SessionChange, SessionEvents, SessionSubscription};
use crate::gateway::{AbilityGrant, AuthError, AuthGateway, LoginRequest, RegisterRequest};
use crate::vault::CredentialVault;

/// Point-in-time view of the session for decision code (guards, gates).
///
/// `is_authenticated` is not stored anywhere: it is derived from user
/// presence, so it can never disagree with it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// True until start-up hydration has run.
    pub loading: bool,
    pub user: Option<User>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Partial update of the signed-in user.
///
/// `avatar_url` and `photographer_status` are double-optional: the outer
/// `None` leaves the field alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<Option<String>>,
    pub role: Option<AccountRole>,
    pub permissions: Option<Vec<Permission>>,
    pub photographer_status: Option<Option<PhotographerStatus>>,
}

impl UserPatch {
    /// The patch an ability re-fetch applies: authorization fields only.
    pub fn from_grant(grant: AbilityGrant) -> Self {
        Self {
            role: Some(grant.role),
            permissions: Some(grant.permissions),
            photographer_status: Some(grant.photographer_status),
            ..Self::default()
        }
    }

    fn apply(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(display_name) = self.display_name {
            user.display_name = display_name;
        }
        if let Some(avatar_url) = self.avatar_url {
            user.avatar_url = avatar_url;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(permissions) = self.permissions {
            user.permissions = permissions;
        }
        if let Some(status) = self.photographer_status {
            user.photographer_status = status;
        }
        user.normalize();
    }
}

struct SessionState {
    user: Option<User>,
    hydrated: bool,
    /// Identity generation. Bumped by every sign-in, sign-out and forced
    /// logout; async operations capture it before their network await and
    /// apply results only if it is unchanged, so a response that arrives
    /// after a newer transition is discarded instead of resurrecting a dead
    /// session.
    epoch: u64,
}

/// Single authoritative holder of the signed-in user.
///
/// Everything that needs the session observes this store; nothing else in
/// the process keeps its own copy of authentication state. The store never
/// holds its state lock across an await: async operations read what they
/// need, await the gateway, then re-acquire and commit (guarded by the
/// epoch).
///
/// Construction leaves the store in *loading* state; call [`hydrate`] once
/// at start-up to restore a remembered session. Decision code must treat
/// `loading == true` as "not yet known", not as signed-out.
///
/// [`hydrate`]: SessionStore::hydrate
pub struct SessionStore {
    gateway: Arc<dyn AuthGateway>,
    vault: Arc<CredentialVault>,
    state: Mutex<SessionState>,
    events: SessionEvents,
}

impl SessionStore {
    pub fn new(gateway: Arc<dyn AuthGateway>, vault: Arc<CredentialVault>) -> Self {
        Self {
            gateway,
            vault,
            state: Mutex::new(SessionState {
                user: None,
                hydrated: false,
                epoch: 0,
            }),
            events: SessionEvents::new(),
        }
    }

    // Session state is plain data; a poisoned lock still holds a usable
    // value, so recover instead of propagating the poison.
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_epoch(&self) -> u64 {
        self.state().epoch
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Restore a remembered session from local storage.
    ///
    /// Synchronous, no network: presence and shape of stored credentials is
    /// the only check. Malformed data degrades to signed-out. Idempotent;
    /// only the first call observes `loading == true` flipping.
    pub fn hydrate(&self) {
        let restored = self.vault.load();

        let mut state = self.state();
        if state.hydrated {
            return;
        }
        state.user = restored;
        state.hydrated = true;
        let authenticated = state.user.is_some();
        drop(state);

        tracing::debug!(authenticated, "session hydrated");
        self.events.publish(SessionChange::Hydrated { authenticated });
    }

    /// Interactive sign-in.
    ///
    /// On success the user is installed and, when `remember` was set,
    /// credentials are written through to storage. On failure the session is
    /// untouched and the error propagates to the form.
    pub async fn login(&self, request: LoginRequest) -> Result<User, AuthError> {
        let epoch = self.current_epoch();
        let remember = request.remember;
        let session = self.gateway.login(&request).await?;
        self.install_session(epoch, session.user, session.token, remember)
    }

    /// New-account registration; signs the account in on success.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        let epoch = self.current_epoch();
        let session = self.gateway.register(&request).await?;
        self.install_session(epoch, session.user, session.token, true)
    }

    /// Explicit sign-out.
    ///
    /// Best-effort server-side invalidation: a failure is logged and the
    /// local session is cleared regardless, including remembered
    /// credentials.
    pub async fn logout(&self) {
        if let Err(err) = self.gateway.logout().await {
            tracing::warn!("server-side logout failed, clearing locally anyway: {err}");
        }
        self.vault.clear();
        self.clear_session();
    }

    /// Synchronous local invalidation, used when the server has already
    /// rejected the session (e.g. expiry observed by the interceptor).
    ///
    /// No network, no storage writes. Idempotent: repeat calls change
    /// nothing and publish nothing.
    pub fn force_logout(&self) {
        self.vault.discard_token();
        if self.clear_session() {
            tracing::info!("session force-cleared after server-side invalidation");
        } else {
            tracing::debug!("forced logout with no active session");
        }
    }

    /// Shallow-merge `patch` into the current user.
    ///
    /// The merged record is re-normalized and a sanitized copy is persisted
    /// for remembered sessions; transient fields (signed avatar URL) never
    /// reach storage. Quiet no-op when signed out.
    pub fn update_user(&self, patch: UserPatch) {
        let mut state = self.state();
        let Some(user) = state.user.as_mut() else {
            tracing::debug!("ignoring profile update with no active session");
            return;
        };
        patch.apply(user);
        let updated = user.clone();
        drop(state);

        self.vault.record_profile(&updated);
        self.events.publish(SessionChange::UserUpdated);
    }

    /// Re-fetch role, permissions and photographer status and apply them to
    /// the current user.
    ///
    /// On any failure the previous abilities stay in effect. A result that
    /// arrives after the session identity changed is discarded.
    pub async fn refresh_abilities(&self) -> Result<User, AuthError> {
        let epoch = self.current_epoch();
        let grant = self.gateway.fetch_abilities().await?;

        let mut state = self.state();
        if state.epoch != epoch {
            tracing::warn!("discarding ability refresh that resolved after a session transition");
            return Err(AuthError::Superseded);
        }
        let Some(user) = state.user.as_mut() else {
            tracing::debug!("ability refresh resolved with no active session");
            return Err(AuthError::Superseded);
        };
        UserPatch::from_grant(grant).apply(user);
        let updated = user.clone();
        drop(state);

        self.vault.record_profile(&updated);
        self.events.publish(SessionChange::AbilitiesRefreshed);
        Ok(updated)
    }

    fn install_session(
        &self,
        started_at: u64,
        user: User,
        token: String,
        persist: bool,
    ) -> Result<User, AuthError> {
        let user = user.normalized();

        let mut state = self.state();
        if state.epoch != started_at {
            tracing::warn!("discarding sign-in that resolved after a newer session transition");
            return Err(AuthError::Superseded);
        }
        self.vault.remember(&token, &user, persist);
        state.user = Some(user.clone());
        state.epoch += 1;
        drop(state);

        tracing::info!(user_id = %user.id, role = %user.role, "session established");
        self.events.publish(SessionChange::SignedIn);
        Ok(user)
    }

    /// Returns whether a user was actually signed out. The epoch advances
    /// either way so that any in-flight sign-in resolves as superseded.
    fn clear_session(&self) -> bool {
        let mut state = self.state();
        let had_user = state.user.take().is_some();
        state.epoch += 1;
        drop(state);

        if had_user {
            self.events.publish(SessionChange::SignedOut);
        }
        had_user
    }

    // ─────────────────────────────────────────────────────────────────────
    // Observation
    // ─────────────────────────────────────────────────────────────────────

    /// True until [`hydrate`](Self::hydrate) has run.
    pub fn is_loading(&self) -> bool {
        !self.state().hydrated
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().user.is_some()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state().user.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state();
        SessionSnapshot {
            loading: !state.hydrated,
            user: state.user.clone(),
        }
    }

    /// Subscribe to session transitions.
    pub fn subscribe(&self) -> SessionSubscription {
        self.events.subscribe()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Bound capability checks (current user)
    // ─────────────────────────────────────────────────────────────────────

    pub fn has_role(&self, role: AccountRole) -> bool {
        capability::has_role(self.state().user.as_ref(), role)
    }

    pub fn has_any_role(&self, roles: &[AccountRole]) -> bool {
        capability::has_any_role(self.state().user.as_ref(), roles)
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        capability::has_permission(self.state().user.as_ref(), permission)
    }

    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        capability::has_any_permission(self.state().user.as_ref(), permissions)
    }

    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        capability::has_all_permissions(self.state().user.as_ref(), permissions)
    }

    pub fn photographer_status(&self) -> Option<PhotographerStatus> {
        capability::photographer_status(self.state().user.as_ref())
    }

    pub fn is_approved_photographer(&self) -> bool {
        capability::is_approved_photographer(self.state().user.as_ref())
    }

    pub fn can_upload_photos(&self) -> bool {
        capability::can_upload_photos(self.state().user.as_ref())
    }
}
