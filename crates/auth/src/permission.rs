//! Permission vocabulary.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque strings (e.g. "photos.upload") minted by the
/// server; the client must tolerate vocabulary it has never seen, so this
/// stays a newtype rather than a closed enum. The constants below cover the
/// grants the marketplace issues today. There is no wildcard: an admin's
/// reach comes from role checks plus explicit grants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    /// Upload photos for sale. Granted to approved photographers.
    pub const UPLOAD_PHOTOS: Permission = Permission(Cow::Borrowed("photos.upload"));

    /// Review and take down reported photos.
    pub const MODERATE_PHOTOS: Permission = Permission(Cow::Borrowed("photos.moderate"));

    /// Manage any order (refunds, disputes).
    pub const MANAGE_ORDERS: Permission = Permission(Cow::Borrowed("orders.manage"));

    /// Administer accounts (roles, suspensions).
    pub const MANAGE_USERS: Permission = Permission(Cow::Borrowed("users.manage"));

    /// View marketplace sales reports.
    pub const VIEW_REPORTS: Permission = Permission(Cow::Borrowed("reports.view"));

    /// Request payout of accumulated sales balance.
    pub const REQUEST_PAYOUTS: Permission = Permission(Cow::Borrowed("payouts.request"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
