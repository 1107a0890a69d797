//! Photographer application lifecycle status.

use serde::{Deserialize, Serialize};

/// Review status of a photographer account.
///
/// Only photographer accounts carry one; see `User::normalized`. Transitions
/// happen server-side (admin approval, moderator suspension) and reach the
/// client through hydration or an ability refresh, never by local mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotographerStatus {
    /// Application submitted, awaiting admin review. Uploads disabled.
    #[serde(alias = "Pending")]
    Pending,
    /// Application approved; the account can upload and sell.
    #[serde(alias = "Approved")]
    Approved,
    /// Application declined by an admin.
    #[serde(alias = "Rejected")]
    Rejected,
    /// Suspended by a moderator or admin; uploads and sales disabled.
    #[serde(alias = "Suspended")]
    Suspended,
}

impl PhotographerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotographerStatus::Pending => "pending",
            PhotographerStatus::Approved => "approved",
            PhotographerStatus::Rejected => "rejected",
            PhotographerStatus::Suspended => "suspended",
        }
    }
}

impl core::fmt::Display for PhotographerStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_capitalized_spelling() {
        let status: PhotographerStatus = serde_json::from_str("\"Suspended\"").unwrap();
        assert_eq!(status, PhotographerStatus::Suspended);
    }

    #[test]
    fn round_trips_lowercase() {
        let json = serde_json::to_string(&PhotographerStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let back: PhotographerStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PhotographerStatus::Pending);
    }
}
