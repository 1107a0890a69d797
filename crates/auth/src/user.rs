//! The authenticated account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use photomart_core::UserId;

use crate::{AccountRole, Permission, PhotographerStatus};

/// A signed-in marketplace account as the server describes it.
///
/// `avatar_url` is a short-lived signed media URL: valid for this process
/// lifetime only and never written to persistent storage (see the session
/// crate's snapshot type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub member_since: Option<DateTime<Utc>>,
    #[serde(alias = "account_type")]
    pub role: AccountRole,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default, alias = "photographerStatus")]
    pub photographer_status: Option<PhotographerStatus>,
}

impl User {
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        display_name: impl Into<String>,
        role: AccountRole,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: display_name.into(),
            avatar_url: None,
            member_since: None,
            role,
            permissions: Vec::new(),
            photographer_status: None,
        }
    }

    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_photographer_status(mut self, status: PhotographerStatus) -> Self {
        self.photographer_status = Some(status);
        self
    }

    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Enforce the record's structural invariant in place: only photographer
    /// accounts carry a photographer status.
    ///
    /// Every path that installs or mutates a user in the session goes through
    /// this, so gating code never observes a buyer with a leftover status. A
    /// photographer *without* a status is left as-is; consumers treat that as
    /// pending (fail closed).
    pub fn normalize(&mut self) {
        if self.role != AccountRole::Photographer {
            self.photographer_status = None;
        }
    }

    /// Owning variant of [`normalize`](Self::normalize).
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}
