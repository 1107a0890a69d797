//! Declarative access requirements of a route.

use photomart_auth::{AccountRole, Permission};

/// What a screen requires before it may render.
///
/// Stateless value object: routes declare one of these and hand it to the
/// guard on every evaluation. All supplied requirements must hold;
/// `require_approval` additionally subjects photographer accounts to the
/// application-review lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutePolicy {
    pub required_role: Option<AccountRole>,
    pub required_permission: Option<Permission>,
    pub require_approval: bool,
}

impl RoutePolicy {
    /// Any signed-in account.
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: AccountRole) -> Self {
        self.required_role = Some(role);
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.required_permission = Some(permission);
        self
    }

    pub fn with_approval_required(mut self) -> Self {
        self.require_approval = true;
        self
    }

    /// The standard photographer-workspace policy: photographer role plus an
    /// approved application.
    pub fn approved_photographer() -> Self {
        Self::authenticated()
            .with_role(AccountRole::Photographer)
            .with_approval_required()
    }
}
