//! Navigation contract between the access-control runtime and the host shell.
//!
//! The runtime never manipulates history itself; it asks a [`Navigator`] to
//! move. Access-control transitions always use [`Navigator::replace`] so the
//! screen a user was bounced off never lingers in the back stack.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Screens the runtime can send a user to.
///
/// Closed set on purpose: redirect targets are part of the access-control
/// contract, not free-form paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Sign-in form. Destination for every unauthenticated or invalidated
    /// session.
    Login,
    /// Generic "you lack the role/permission" screen.
    Forbidden,
    /// Photographer application still under review.
    PendingApproval,
    /// Photographer application was declined.
    ApplicationRejected,
    /// Photographer account suspended by a moderator or admin.
    AccountSuspended,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Login => "login",
            Screen::Forbidden => "forbidden",
            Screen::PendingApproval => "pending_approval",
            Screen::ApplicationRejected => "application_rejected",
            Screen::AccountSuspended => "account_suspended",
        }
    }

    /// Stable route path of the screen in the host application.
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Login => "/login",
            Screen::Forbidden => "/forbidden",
            Screen::PendingApproval => "/photographer/pending",
            Screen::ApplicationRejected => "/photographer/rejected",
            Screen::AccountSuspended => "/account/suspended",
        }
    }
}

impl core::fmt::Display for Screen {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by a [`Navigator`] that could not perform a transition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The host shell refused or failed the transition.
    #[error("navigation to {0} failed: {1}")]
    Failed(Screen, String),
}

/// Host-shell navigation seam.
///
/// Implementations wrap whatever history/routing machinery the shell uses.
/// Both methods are synchronous requests; the shell may complete the actual
/// transition later.
pub trait Navigator: Send + Sync {
    /// Replace the current history entry with `screen`.
    fn replace(&self, screen: Screen) -> Result<(), NavigationError>;

    /// Push `screen` as a new history entry.
    fn push(&self, screen: Screen) -> Result<(), NavigationError>;
}
