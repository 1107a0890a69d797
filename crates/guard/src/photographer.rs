//! The photographer-status gate and its informational panels.
//!
//! Unlike [`RouteGuard`](crate::RouteGuard), which redirects away from a
//! whole screen, this gate sits inline inside an otherwise-accessible
//! screen (a dashboard, say) and swaps the gated fragment for a short
//! explanatory panel. The surrounding navigation chrome stays visible.

use photomart_auth::{AccountRole, PhotographerStatus, capability};
use photomart_session::SessionSnapshot;

/// Why gated content is being withheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelReason {
    NotAPhotographer,
    Pending,
    Rejected,
    Suspended,
}

/// A link offered alongside a panel's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallToAction {
    pub label: &'static str,
    pub path: &'static str,
}

/// User-facing copy shown in place of gated content.
///
/// This is the one spot in the access-control core that carries display
/// text. Everything else decides; this explains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPanel {
    pub reason: PanelReason,
    pub title: &'static str,
    pub message: &'static str,
    pub action: Option<CallToAction>,
}

impl StatusPanel {
    pub fn for_reason(reason: PanelReason) -> Self {
        match reason {
            PanelReason::NotAPhotographer => Self {
                reason,
                title: "Photographers only",
                message: "This area is for photographer accounts. Apply to start selling your photos.",
                action: Some(CallToAction {
                    label: "Become a photographer",
                    path: "/become-a-photographer",
                }),
            },
            PanelReason::Pending => Self {
                reason,
                title: "Application under review",
                message: "Your photographer application is being reviewed. Uploading unlocks once you're approved.",
                action: Some(CallToAction {
                    label: "Browse the marketplace",
                    path: "/photos",
                }),
            },
            PanelReason::Rejected => Self {
                reason,
                title: "Application not approved",
                message: "Your photographer application was not approved this time. Contact support if you believe this is a mistake.",
                action: Some(CallToAction {
                    label: "Contact support",
                    path: "/support",
                }),
            },
            PanelReason::Suspended => Self {
                reason,
                title: "Account suspended",
                message: "Your photographer account is suspended and uploads are paused. Contact support to resolve this.",
                action: Some(CallToAction {
                    label: "Contact support",
                    path: "/support",
                }),
            },
        }
    }
}

/// Outcome of a [`PhotographerStatusGate`] evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotographerGateDecision {
    /// The user is an approved photographer; render the gated content.
    Content,
    /// Render this panel in place of the content.
    Panel(StatusPanel),
    /// Panels are opted out; render nothing.
    Hidden,
}

impl PhotographerGateDecision {
    pub fn shows_content(&self) -> bool {
        *self == PhotographerGateDecision::Content
    }
}

/// Specializes [`CapabilityGate`](crate::CapabilityGate) for the most
/// common condition, approved-photographer, and adds the explanatory
/// panels a bare gate cannot offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhotographerStatusGate {
    hide_panels: bool,
}

impl PhotographerStatusGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opt out of the informational panels; withheld content renders as
    /// nothing at all.
    pub fn without_panels() -> Self {
        Self { hide_panels: true }
    }

    pub fn evaluate(&self, session: &SessionSnapshot) -> PhotographerGateDecision {
        let user = session.user.as_ref();

        if capability::is_approved_photographer(user) {
            return PhotographerGateDecision::Content;
        }

        let reason = if !capability::has_role(user, AccountRole::Photographer) {
            PanelReason::NotAPhotographer
        } else {
            match capability::photographer_status(user) {
                Some(PhotographerStatus::Rejected) => PanelReason::Rejected,
                Some(PhotographerStatus::Suspended) => PanelReason::Suspended,
                // Unset status on a photographer account reads as pending,
                // same fail-closed default the route guard applies.
                Some(PhotographerStatus::Pending) | Some(PhotographerStatus::Approved) | None => {
                    PanelReason::Pending
                }
            }
        };
        self.withheld(reason)
    }

    fn withheld(&self, reason: PanelReason) -> PhotographerGateDecision {
        if self.hide_panels {
            PhotographerGateDecision::Hidden
        } else {
            PhotographerGateDecision::Panel(StatusPanel::for_reason(reason))
        }
    }
}
