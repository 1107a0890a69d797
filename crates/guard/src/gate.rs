//! Inline capability gating for screen fragments.

use photomart_auth::{AccountRole, Permission, capability};
use photomart_session::SessionSnapshot;

/// Whether a gated fragment shows its content or its fallback.
///
/// Hidden content is ordinary state, never an error: the fallback is
/// whatever the caller renders in place of the content (possibly nothing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Show,
    Fallback,
}

impl GateDecision {
    pub fn is_show(&self) -> bool {
        *self == GateDecision::Show
    }
}

/// Declarative visibility conditions for an inline fragment.
///
/// Supplied conditions AND across categories; the `any_*` lists OR within
/// themselves. Leaving a category out skips it entirely, which is different
/// from supplying it empty: an explicit empty `any_*` list asks for "at
/// least one of nothing" and can never pass. A gate with no conditions at
/// all always shows.
///
/// Pure render-time filtering; nothing here navigates or mutates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapabilityGate {
    permission: Option<Permission>,
    any_permission: Option<Vec<Permission>>,
    all_permissions: Option<Vec<Permission>>,
    role: Option<AccountRole>,
    any_role: Option<Vec<AccountRole>>,
    approved_photographer: bool,
}

impl CapabilityGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_permission(mut self, permission: Permission) -> Self {
        self.permission = Some(permission);
        self
    }

    pub fn require_any_permission(mut self, permissions: Vec<Permission>) -> Self {
        self.any_permission = Some(permissions);
        self
    }

    pub fn require_all_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.all_permissions = Some(permissions);
        self
    }

    pub fn require_role(mut self, role: AccountRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn require_any_role(mut self, roles: Vec<AccountRole>) -> Self {
        self.any_role = Some(roles);
        self
    }

    pub fn require_approved_photographer(mut self) -> Self {
        self.approved_photographer = true;
        self
    }

    pub fn evaluate(&self, session: &SessionSnapshot) -> GateDecision {
        let user = session.user.as_ref();

        if let Some(permission) = &self.permission {
            if !capability::has_permission(user, permission) {
                return GateDecision::Fallback;
            }
        }
        if let Some(permissions) = &self.any_permission {
            if !capability::has_any_permission(user, permissions) {
                return GateDecision::Fallback;
            }
        }
        if let Some(permissions) = &self.all_permissions {
            if !capability::has_all_permissions(user, permissions) {
                return GateDecision::Fallback;
            }
        }
        if let Some(role) = self.role {
            if !capability::has_role(user, role) {
                return GateDecision::Fallback;
            }
        }
        if let Some(roles) = &self.any_role {
            if !capability::has_any_role(user, roles) {
                return GateDecision::Fallback;
            }
        }
        if self.approved_photographer && !capability::is_approved_photographer(user) {
            return GateDecision::Fallback;
        }

        GateDecision::Show
    }
}
