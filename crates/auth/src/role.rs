//! Account roles of the marketplace.

use serde::{Deserialize, Serialize};

/// Role of a marketplace account.
///
/// Closed set: guard and gate code matches on this exhaustively, so a new
/// role is a compile-time event, not a silently unhandled string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Default role: browses, purchases and downloads photos.
    #[serde(alias = "Buyer")]
    Buyer,
    /// Sells photos once an admin approves the application.
    #[serde(alias = "Photographer")]
    Photographer,
    /// Reviews reported content and can suspend photographers.
    #[serde(alias = "Moderator")]
    Moderator,
    /// Full back-office access, including photographer approval.
    #[serde(alias = "Admin")]
    Admin,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Buyer => "buyer",
            AccountRole::Photographer => "photographer",
            AccountRole::Moderator => "moderator",
            AccountRole::Admin => "admin",
        }
    }
}

impl core::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
