//! Uniform recovery when the API rejects the session's credentials.
//!
//! Any request can come back authentication-rejected once a token expires
//! or is revoked server-side. Whichever screen triggered it, the recovery
//! is the same: drop persisted credentials, force the session store to
//! signed-out, and land on the login screen. The interceptor observes the
//! response stream and performs that recovery exactly once per expiry,
//! however many in-flight requests reject together.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use photomart_core::{Navigator, Screen};
use photomart_session::{CredentialVault, SessionStore};

use crate::observer::{ObserverId, ResponseEvent, ResponseObserver, ResponseObserverRegistry};

/// How long after starting a recovery further rejections are ignored.
/// Requests already in flight when the first one rejected keep rejecting
/// for a moment; the window has to outlast that straggler tail.
const DEFAULT_QUIESCENCE: Duration = Duration::from_secs(5);

/// Observes responses and collapses authentication rejections into a
/// single signed-out recovery.
///
/// Install on the registry the API client notifies; uninstall on shutdown.
/// Both are idempotent. The interceptor only ever observes; the rejected
/// response still reaches its caller untouched.
pub struct SessionInvalidationInterceptor {
    vault: Arc<CredentialVault>,
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    quiescence: Duration,
    recovering_since: Mutex<Option<Instant>>,
    installed: Mutex<Option<ObserverId>>,
}

impl SessionInvalidationInterceptor {
    pub fn new(
        vault: Arc<CredentialVault>,
        store: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            vault,
            store,
            navigator,
            quiescence: DEFAULT_QUIESCENCE,
            recovering_since: Mutex::new(None),
            installed: Mutex::new(None),
        }
    }

    /// Override the quiescence window. A zero window disables the
    /// collapse entirely.
    pub fn with_quiescence(mut self, window: Duration) -> Self {
        self.quiescence = window;
        self
    }

    /// Register on `registry`. Installing while already installed is a
    /// no-op; at most one observation per response.
    pub fn install(self: &Arc<Self>, registry: &ResponseObserverRegistry) {
        let mut installed = self
            .installed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if installed.is_some() {
            tracing::debug!("session invalidation interceptor already installed");
            return;
        }
        *installed = Some(registry.install(self.clone()));
        tracing::debug!("session invalidation interceptor installed");
    }

    /// Remove from `registry`. Safe to call when not installed.
    pub fn uninstall(&self, registry: &ResponseObserverRegistry) {
        let mut installed = self
            .installed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(id) = installed.take() {
            registry.uninstall(id);
            tracing::debug!("session invalidation interceptor uninstalled");
        }
    }

    /// Claim the recovery slot. Answers false while a recovery started
    /// less than one quiescence window ago; the window is checked lazily,
    /// no timer runs.
    fn begin_recovery(&self) -> bool {
        let mut since = self
            .recovering_since
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(started) = *since {
            if started.elapsed() < self.quiescence {
                return false;
            }
        }
        *since = Some(Instant::now());
        true
    }

    fn recover(&self) {
        if !self.begin_recovery() {
            tracing::debug!("authentication rejection during an active recovery, ignored");
            return;
        }

        tracing::warn!("API rejected the session's credentials, recovering to signed-out");
        self.vault.clear_persisted();
        self.store.force_logout();
        if let Err(err) = self.navigator.replace(Screen::Login) {
            // The session is already cleared; the next guard evaluation
            // will bounce to login even though this transition failed.
            tracing::error!("navigation to login after session invalidation failed: {err}");
        }
    }
}

impl ResponseObserver for SessionInvalidationInterceptor {
    fn on_response(&self, event: &ResponseEvent) {
        if event.is_authentication_rejected() {
            tracing::debug!(path = %event.path, "authentication-rejected response observed");
            self.recover();
        }
    }
}
