//! Narrow, named session projections.
//!
//! Screens depend on these instead of importing the whole store surface:
//! an upload button asks `can_upload_photos()`, an admin menu asks
//! `is_admin()`. All of it is derived from the store's current user; nothing
//! here keeps state of its own.

use photomart_auth::{AccountRole, Permission, PhotographerStatus, capability};

use crate::store::SessionStore;

/// Everything photographer-facing screens need in one read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotographerInfo {
    pub is_photographer: bool,
    pub status: Option<PhotographerStatus>,
    pub is_approved: bool,
    pub can_upload: bool,
}

impl SessionStore {
    pub fn is_admin(&self) -> bool {
        self.has_role(AccountRole::Admin)
    }

    pub fn is_moderator(&self) -> bool {
        self.has_role(AccountRole::Moderator)
    }

    pub fn is_buyer(&self) -> bool {
        self.has_role(AccountRole::Buyer)
    }

    pub fn is_photographer(&self) -> bool {
        self.has_role(AccountRole::Photographer)
    }

    pub fn is_pending_photographer(&self) -> bool {
        self.photographer_status() == Some(PhotographerStatus::Pending)
    }

    /// Role of the current user, if any.
    pub fn role(&self) -> Option<AccountRole> {
        self.current_user().map(|u| u.role)
    }

    /// Granted permissions of the current user (empty when signed out).
    pub fn permissions(&self) -> Vec<Permission> {
        self.current_user().map(|u| u.permissions).unwrap_or_default()
    }

    /// Consistent single read of the photographer-lifecycle facts.
    pub fn photographer_info(&self) -> PhotographerInfo {
        let user = self.current_user();
        let user = user.as_ref();
        let status = capability::photographer_status(user);
        PhotographerInfo {
            is_photographer: capability::has_role(user, AccountRole::Photographer),
            status,
            is_approved: status == Some(PhotographerStatus::Approved),
            can_upload: capability::can_upload_photos(user),
        }
    }
}
