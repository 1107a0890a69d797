//! `photomart-session` — the authoritative client-side session.
//!
//! One store owns "who is signed in"; collaborators are injected behind
//! traits ([`AuthGateway`] for the remote API, [`CredentialStore`] for
//! persistence) so the store itself stays runtime- and transport-agnostic.
//! Guards and gates consume [`SessionSnapshot`]s; screens use the narrow
//! accessors; the HTTP layer reads the bearer token out of the
//! [`CredentialVault`].

pub mod accessors;
pub mod events;
pub mod gateway;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod vault;

pub use accessors::PhotographerInfo;
pub use events::{SessionChange, SessionEvent, SessionSubscription};
pub use gateway::{
    AbilityGrant, AuthError, AuthGateway, AuthSession, LoginRequest, RegisterRequest,
};
pub use snapshot::ProfileSnapshot;
pub use storage::{CredentialStore, MemoryCredentialStore, StorageError};
pub use store::{SessionSnapshot, SessionStore, UserPatch};
pub use vault::CredentialVault;
