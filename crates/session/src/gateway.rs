//! Remote authentication collaborator contract.
//!
//! The session store only ever talks to the marketplace API through this
//! trait; the production HTTP implementation lives in the client crate and
//! tests substitute stubs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use photomart_auth::{AccountRole, Permission, PhotographerStatus, User};

/// Credentials for an interactive sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Keep the session across restarts (write-through to credential
    /// storage). Never sent over the wire.
    #[serde(skip)]
    pub remember: bool,
}

/// New-account application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    /// Apply for a photographer account; the application starts in pending
    /// review.
    #[serde(default)]
    pub apply_as_photographer: bool,
}

/// A successful authentication: the account plus its bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Re-fetched authorization payload: everything gating decisions read,
/// nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityGrant {
    #[serde(alias = "account_type")]
    pub role: AccountRole,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub photographer_status: Option<PhotographerStatus>,
}

/// Errors of the authentication flows.
///
/// Authorization denial is deliberately absent: lacking a role or permission
/// is ordinary state answered by guards and gates, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The server rejected the submitted email/password pair.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The server rejected submitted fields (e.g. email already taken).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Transport-level failure; nothing can be said about the session.
    #[error("network error: {0}")]
    Network(String),

    /// The server no longer accepts the session's token.
    #[error("authentication rejected")]
    Rejected,

    /// Unexpected API response.
    #[error("API error ({0}): {1}")]
    Api(u16, String),

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The call resolved after a newer session transition; its result was
    /// discarded.
    #[error("superseded by a newer session transition")]
    Superseded,
}

/// Authentication endpoints of the marketplace API.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthSession, AuthError>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, AuthError>;

    /// Invalidate the session server-side. Callers treat failure as
    /// advisory; the local session is cleared regardless.
    async fn logout(&self) -> Result<(), AuthError>;

    /// Current role/permissions/photographer-status of the authenticated
    /// account.
    async fn fetch_abilities(&self) -> Result<AbilityGrant, AuthError>;
}
