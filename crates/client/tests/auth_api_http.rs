//! Black-box tests of the API client against a real HTTP server speaking
//! the marketplace's auth endpoints.

use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use photomart_auth::{AccountRole, PhotographerStatus, User};
use photomart_client::{ApiClient, ResponseEvent, ResponseObserver, ResponseObserverRegistry};
use photomart_core::UserId;
use photomart_session::{
    AuthError, AuthGateway, CredentialVault, LoginRequest, MemoryCredentialStore, RegisterRequest,
};

const LIVE_TOKEN: &str = "live-token";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        photomart_observability::init();
        let app = auth_router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn auth_router() -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/abilities", get(abilities))
}

fn json_error(status: StatusCode, code: &'static str, message: &'static str) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message,
        })),
    )
        .into_response()
}

fn buyer_json() -> serde_json::Value {
    json!({
        "id": "0192c7a4-5a7e-7c80-b1a4-6f2e9a1b2c3d",
        "email": "dana@example.com",
        "display_name": "Dana Whitfield",
        "avatar_url": "https://cdn.example.com/avatars/dana.jpg?Expires=1735689600&Signature=sig",
        "member_since": "2024-03-01T00:00:00Z",
        "role": "buyer",
        "permissions": []
    })
}

async fn login(Json(body): Json<serde_json::Value>) -> axum::response::Response {
    if body["password"].as_str() == Some("correct-horse") {
        (
            StatusCode::OK,
            Json(json!({ "user": buyer_json(), "token": "fresh-token" })),
        )
            .into_response()
    } else {
        json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid email or password",
        )
    }
}

async fn register(Json(body): Json<serde_json::Value>) -> axum::response::Response {
    if body["email"].as_str() == Some("taken@example.com") {
        return json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "email already registered",
        );
    }
    let user = json!({
        "id": "0192c7a4-5a7e-7c80-b1a4-6f2e9a1b2c4e",
        "email": body["email"],
        "display_name": body["display_name"],
        "role": "photographer",
        "photographer_status": "pending"
    });
    (
        StatusCode::OK,
        Json(json!({ "user": user, "token": "fresh-token" })),
    )
        .into_response()
}

fn bearer_of(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn logout(headers: HeaderMap) -> axum::response::Response {
    if bearer_of(&headers) == Some(LIVE_TOKEN) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "token rejected")
    }
}

async fn abilities(headers: HeaderMap) -> axum::response::Response {
    if bearer_of(&headers) != Some(LIVE_TOKEN) {
        return json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "token rejected");
    }
    // Legacy field spelling on purpose; the client accepts both.
    (
        StatusCode::OK,
        Json(json!({
            "account_type": "photographer",
            "permissions": ["photos.upload"],
            "photographer_status": "suspended"
        })),
    )
        .into_response()
}

#[derive(Default)]
struct CollectingObserver {
    events: Mutex<Vec<ResponseEvent>>,
}

impl CollectingObserver {
    fn events(&self) -> Vec<ResponseEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ResponseObserver for CollectingObserver {
    fn on_response(&self, event: &ResponseEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn client_against(base_url: &str) -> (ApiClient, Arc<CredentialVault>, Arc<CollectingObserver>) {
    let vault = Arc::new(CredentialVault::new(Arc::new(MemoryCredentialStore::new())));
    let observer = Arc::new(CollectingObserver::default());
    let registry = Arc::new(ResponseObserverRegistry::new());
    registry.install(observer.clone());
    let client = ApiClient::new(base_url, vault.clone(), registry);
    (client, vault, observer)
}

fn login_request(password: &str) -> LoginRequest {
    LoginRequest {
        email: "dana@example.com".to_string(),
        password: password.to_string(),
        remember: false,
    }
}

#[tokio::test]
async fn login_round_trips_the_session() {
    let srv = TestServer::spawn().await;
    let (client, _vault, observer) = client_against(&srv.base_url);

    let session = client.login(&login_request("correct-horse")).await.unwrap();

    assert_eq!(session.token, "fresh-token");
    assert_eq!(session.user.email, "dana@example.com");
    assert_eq!(session.user.role, AccountRole::Buyer);
    assert!(session.user.avatar_url.is_some());
    assert!(session.user.member_since.is_some());

    assert_eq!(
        observer.events(),
        vec![ResponseEvent::new(200, "/api/auth/login")]
    );
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials_and_still_observed() {
    let srv = TestServer::spawn().await;
    let (client, _vault, observer) = client_against(&srv.base_url);

    let err = client
        .login(&login_request("wrong"))
        .await
        .expect_err("login must fail");

    assert_eq!(err, AuthError::InvalidCredentials);
    // The observer pipeline sees the rejection even though the caller
    // receives the error untouched.
    assert_eq!(
        observer.events(),
        vec![ResponseEvent::new(401, "/api/auth/login")]
    );
}

#[tokio::test]
async fn register_surfaces_the_server_validation_message() {
    let srv = TestServer::spawn().await;
    let (client, _vault, _observer) = client_against(&srv.base_url);

    let request = RegisterRequest {
        email: "taken@example.com".to_string(),
        password: "correct-horse".to_string(),
        display_name: "Dana Whitfield".to_string(),
        apply_as_photographer: true,
    };
    let err = client.register(&request).await.expect_err("email is taken");

    assert_eq!(
        err,
        AuthError::Validation("email already registered".to_string())
    );
}

#[tokio::test]
async fn register_lands_a_pending_photographer() {
    let srv = TestServer::spawn().await;
    let (client, _vault, _observer) = client_against(&srv.base_url);

    let request = RegisterRequest {
        email: "noor@example.com".to_string(),
        password: "correct-horse".to_string(),
        display_name: "Noor Haddad".to_string(),
        apply_as_photographer: true,
    };
    let session = client.register(&request).await.unwrap();

    assert_eq!(session.user.role, AccountRole::Photographer);
    assert_eq!(
        session.user.photographer_status,
        Some(PhotographerStatus::Pending)
    );
}

#[tokio::test]
async fn abilities_use_the_vault_token_and_accept_legacy_spellings() {
    let srv = TestServer::spawn().await;
    let (client, vault, observer) = client_against(&srv.base_url);

    // No token in the vault yet: the server rejects, the client maps it to
    // a session rejection, and the observer records the 401 the
    // invalidation interceptor would react to.
    let err = client.fetch_abilities().await.expect_err("no token yet");
    assert_eq!(err, AuthError::Rejected);
    assert_eq!(
        observer.events(),
        vec![ResponseEvent::new(401, "/api/auth/abilities")]
    );

    let user = User::new(
        UserId::new(),
        "dana@example.com",
        "Dana Whitfield",
        AccountRole::Photographer,
    );
    vault.remember(LIVE_TOKEN, &user, false);

    let grant = client.fetch_abilities().await.unwrap();
    assert_eq!(grant.role, AccountRole::Photographer);
    assert_eq!(
        grant.photographer_status,
        Some(PhotographerStatus::Suspended)
    );
    assert_eq!(grant.permissions.len(), 1);
}

#[tokio::test]
async fn logout_round_trips_with_the_bearer_token() {
    let srv = TestServer::spawn().await;
    let (client, vault, _observer) = client_against(&srv.base_url);

    let user = User::new(
        UserId::new(),
        "dana@example.com",
        "Dana Whitfield",
        AccountRole::Buyer,
    );
    vault.remember(LIVE_TOKEN, &user, false);

    client.logout().await.unwrap();
}

#[tokio::test]
async fn transport_failure_is_a_network_error() {
    // Bind then immediately drop, so the port is known-dead.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let (client, _vault, observer) = client_against(&dead);

    let err = client
        .login(&login_request("correct-horse"))
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err, AuthError::Network(_)));
    // No response ever arrived, so nothing was observed.
    assert!(observer.events().is_empty());
}
