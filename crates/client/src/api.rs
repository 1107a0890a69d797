//! HTTP implementation of the authentication gateway.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;

use photomart_session::{
    AbilityGrant, AuthError, AuthGateway, AuthSession, CredentialVault, LoginRequest,
    RegisterRequest,
};

use crate::observer::{ResponseEvent, ResponseObserverRegistry};

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const LOGOUT_PATH: &str = "/api/auth/logout";
const ABILITIES_PATH: &str = "/api/auth/abilities";

/// Marketplace API client for the authentication endpoints.
///
/// Bearer tokens come from the vault on every call, so a sign-in on the
/// same vault immediately authenticates subsequent requests. Every
/// response, success or failure, is reported to the observer registry
/// before the result reaches the caller.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    vault: Arc<CredentialVault>,
    observers: Arc<ResponseObserverRegistry>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        vault: Arc<CredentialVault>,
        observers: Arc<ResponseObserverRegistry>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            vault,
            observers,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send `request`, then report the response before handing it back.
    /// Transport failures never produce a response, so there is nothing
    /// to observe for them.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<reqwest::Response, AuthError> {
        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        self.observers
            .notify(&ResponseEvent::new(response.status().as_u16(), path));
        Ok(response)
    }

    fn bearer(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.vault.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Map a non-success status to the gateway error the caller handles.
/// `unauthorized` differs by endpoint: a rejected login is bad credentials,
/// a rejected anything-else is an invalidated session.
async fn ensure_success(
    response: reqwest::Response,
    unauthorized: AuthError,
) -> Result<reqwest::Response, AuthError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(unauthorized);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(match status.as_u16() {
            400 | 422 => AuthError::Validation(server_message(&body)),
            code => AuthError::Api(code, body),
        });
    }
    Ok(response)
}

/// Pull the human-readable message out of an `{"error", "message"}` body;
/// fall back to the raw text.
fn server_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthSession, AuthError> {
        let response = self
            .execute(self.http.post(self.url(LOGIN_PATH)).json(request), LOGIN_PATH)
            .await?;
        let response = ensure_success(response, AuthError::InvalidCredentials).await?;
        response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, AuthError> {
        let response = self
            .execute(
                self.http.post(self.url(REGISTER_PATH)).json(request),
                REGISTER_PATH,
            )
            .await?;
        let response = ensure_success(response, AuthError::Rejected).await?;
        response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let request = self.bearer(self.http.post(self.url(LOGOUT_PATH)));
        let response = self.execute(request, LOGOUT_PATH).await?;
        ensure_success(response, AuthError::Rejected).await?;
        Ok(())
    }

    async fn fetch_abilities(&self) -> Result<AbilityGrant, AuthError> {
        let request = self.bearer(self.http.get(self.url(ABILITIES_PATH)));
        let response = self.execute(request, ABILITIES_PATH).await?;
        let response = ensure_success(response, AuthError::Rejected).await?;
        response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))
    }
}
