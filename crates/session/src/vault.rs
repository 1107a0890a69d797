//! Credential custody.

use std::sync::{Arc, Mutex};

use photomart_auth::User;

use crate::snapshot::ProfileSnapshot;
use crate::storage::CredentialStore;

const TOKEN_KEY: &str = "auth.token";
const PROFILE_KEY: &str = "auth.profile";

/// Single owner of credential material.
///
/// Holds the bearer token in memory for the HTTP client and mirrors token +
/// sanitized profile into the credential store when the user asked to be
/// remembered. Storage failures never abort a session transition: they are
/// logged and the in-memory side proceeds, so a broken disk degrades
/// persistence, not sign-in or sign-out.
pub struct CredentialVault {
    store: Arc<dyn CredentialStore>,
    token: Mutex<Option<String>>,
}

impl CredentialVault {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            token: Mutex::new(None),
        }
    }

    /// Bearer token of the live session, if any.
    pub fn bearer_token(&self) -> Option<String> {
        match self.token.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        }
    }

    /// Take custody of a fresh session's credentials.
    ///
    /// With `persist`, token and sanitized profile are written through to
    /// storage; without it, any previously remembered credentials are
    /// removed so a restart cannot resurrect an older account.
    pub fn remember(&self, token: &str, user: &User, persist: bool) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }

        if persist {
            if let Err(err) = self.store.set(TOKEN_KEY, token) {
                tracing::error!("failed to persist session token: {err}");
                return;
            }
            self.write_profile(user);
        } else {
            self.clear_persisted();
        }
    }

    /// Rewrite the persisted profile after the user record changed.
    ///
    /// Only applies to remembered sessions; a session-only sign-in leaves
    /// storage untouched.
    pub fn record_profile(&self, user: &User) {
        match self.store.get(TOKEN_KEY) {
            Ok(Some(_)) => self.write_profile(user),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("skipping profile persistence, storage unreadable: {err}");
            }
        }
    }

    /// Restore a remembered session at start-up.
    ///
    /// Synchronous local lookup, no network. A token without a usable
    /// profile (or vice versa) is treated as corruption: both entries are
    /// removed and `None` is returned, so the caller starts signed out.
    pub fn load(&self) -> Option<User> {
        let token = match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) => token,
            Ok(None) => {
                // An orphaned profile without a token is unusable; ignore it.
                return None;
            }
            Err(err) => {
                tracing::warn!("credential storage unreadable at start-up: {err}");
                return None;
            }
        };

        let profile = match self.store.get(PROFILE_KEY) {
            Ok(Some(raw)) => ProfileSnapshot::parse(&raw),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("credential storage unreadable at start-up: {err}");
                None
            }
        };

        match profile {
            Some(snapshot) => {
                if let Ok(mut slot) = self.token.lock() {
                    *slot = Some(token);
                }
                Some(snapshot.into_user())
            }
            None => {
                tracing::warn!("stored token has no usable profile, clearing credentials");
                self.clear_persisted();
                None
            }
        }
    }

    /// Drop the in-memory token. Storage is deliberately untouched: forced
    /// logout must not perform writes.
    pub fn discard_token(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }

    /// Remove any remembered credentials from storage.
    pub fn clear_persisted(&self) {
        if let Err(err) = self.store.remove(TOKEN_KEY) {
            tracing::error!("failed to remove persisted token: {err}");
        }
        if let Err(err) = self.store.remove(PROFILE_KEY) {
            tracing::error!("failed to remove persisted profile: {err}");
        }
    }

    /// Full clear: memory and storage.
    pub fn clear(&self) {
        self.discard_token();
        self.clear_persisted();
    }

    fn write_profile(&self, user: &User) {
        let snapshot = ProfileSnapshot::of(user);
        match snapshot.to_json() {
            Ok(json) => {
                if let Err(err) = self.store.set(PROFILE_KEY, &json) {
                    tracing::error!("failed to persist profile snapshot: {err}");
                }
            }
            Err(err) => {
                tracing::error!("failed to encode profile snapshot: {err}");
            }
        }
    }
}
