//! `photomart-auth` — account model and capability checks.
//!
//! This crate is intentionally decoupled from HTTP, storage and rendering:
//! it defines who a marketplace user is (role, granted permissions,
//! photographer lifecycle) and answers capability questions about a possibly
//! absent user. Session state, guards and gates build on it.

pub mod capability;
pub mod permission;
pub mod role;
pub mod status;
pub mod user;

pub use permission::Permission;
pub use role::AccountRole;
pub use status::PhotographerStatus;
pub use user::User;
