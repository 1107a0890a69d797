//! `photomart-core` — shared foundation of the marketplace client runtime.
//!
//! This crate contains **pure** primitives (no IO, no HTTP): typed ids, the
//! domain error model and the navigation contract the access-control layer
//! drives redirects through.

pub mod error;
pub mod id;
pub mod nav;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
pub use nav::{NavigationError, Navigator, Screen};
