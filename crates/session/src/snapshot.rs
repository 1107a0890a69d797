//! Sanitized persisted form of the signed-in user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use photomart_auth::{AccountRole, Permission, PhotographerStatus, User};
use photomart_core::UserId;

/// What survives of a [`User`] on disk between runs.
///
/// Deliberately not the `User` type itself: transient fields minted
/// per-process (today the signed avatar URL) must never be written, and old
/// files must keep parsing after the live record grows. `saved_at` records
/// write time for debugging; nothing expires on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub member_since: Option<DateTime<Utc>>,
    #[serde(alias = "account_type")]
    pub role: AccountRole,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default, alias = "photographerStatus")]
    pub photographer_status: Option<PhotographerStatus>,
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

impl ProfileSnapshot {
    /// Sanitize a live user for persistence.
    pub fn of(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            member_since: user.member_since,
            role: user.role,
            permissions: user.permissions.clone(),
            photographer_status: user.photographer_status,
            saved_at: Utc::now(),
        }
    }

    /// Parse a stored snapshot, tolerating legacy field spellings.
    ///
    /// Malformed input is reported as `None` with a log; the caller degrades
    /// to signed-out rather than surfacing an error.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!("discarding malformed profile snapshot: {err}");
                None
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Rebuild the in-memory user.
    ///
    /// The avatar URL stays absent until the server hands out a fresh signed
    /// one. Re-normalizes in case the file predates the
    /// only-photographers-carry-a-status rule.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            email: self.email,
            display_name: self.display_name,
            avatar_url: None,
            member_since: self.member_since,
            role: self.role,
            permissions: self.permissions,
            photographer_status: self.photographer_status,
        }
        .normalized()
    }
}
