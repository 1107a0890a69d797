//! Capability checks over an optionally-present account.
//!
//! Single decision point for "can this session do X": route guards, inline
//! gates and screen accessors all call through here rather than poking at
//! `User` fields. Every predicate takes `Option<&User>` and answers `false`
//! (or `None`) for an absent user, so callers never null-check first.
//!
//! - No IO
//! - No panics
//! - No business logic beyond the capability rules themselves

use crate::{AccountRole, Permission, PhotographerStatus, User};

/// True when a user is present and holds exactly `role`.
pub fn has_role(user: Option<&User>, role: AccountRole) -> bool {
    user.is_some_and(|u| u.role == role)
}

/// True when a user is present and holds one of `roles`.
///
/// An empty list can never match.
pub fn has_any_role(user: Option<&User>, roles: &[AccountRole]) -> bool {
    user.is_some_and(|u| roles.contains(&u.role))
}

/// True when a user is present and was granted `permission`.
///
/// The permission set is authoritative: no role implies a permission here.
pub fn has_permission(user: Option<&User>, permission: &Permission) -> bool {
    user.is_some_and(|u| u.has_permission(permission))
}

/// True when a user is present and holds at least one of `permissions`.
///
/// An empty list can never match (there is nothing to satisfy the "at
/// least one").
pub fn has_any_permission(user: Option<&User>, permissions: &[Permission]) -> bool {
    user.is_some_and(|u| permissions.iter().any(|p| u.has_permission(p)))
}

/// True when a user is present and holds every one of `permissions`.
///
/// An empty list is vacuously satisfied for any present user; an absent
/// user still answers `false`.
pub fn has_all_permissions(user: Option<&User>, permissions: &[Permission]) -> bool {
    user.is_some_and(|u| permissions.iter().all(|p| u.has_permission(p)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Photographer lifecycle capabilities
// ─────────────────────────────────────────────────────────────────────────────

/// Review status of the account's photographer application.
///
/// `None` for absent users and for every non-photographer role, even if a
/// stray status survived on the record. A photographer with no recorded
/// status also answers `None`; consumers treat that as pending (fail
/// closed).
pub fn photographer_status(user: Option<&User>) -> Option<PhotographerStatus> {
    user.and_then(|u| {
        if u.role == AccountRole::Photographer {
            u.photographer_status
        } else {
            None
        }
    })
}

/// True only for a photographer whose application an admin approved.
pub fn is_approved_photographer(user: Option<&User>) -> bool {
    photographer_status(user) == Some(PhotographerStatus::Approved)
}

/// True when the account may upload photos for sale.
///
/// Named capability: today it coincides with [`is_approved_photographer`],
/// but upload screens must ask this question, not re-derive it, so the
/// definition can grow (e.g. an upload permission) without touching callers.
pub fn can_upload_photos(user: Option<&User>) -> bool {
    is_approved_photographer(user)
}
