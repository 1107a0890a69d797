//! `photomart-client` — HTTP edge of the access-control runtime.
//!
//! Production implementations of the seams the session layer abstracts
//! over: the marketplace API as an [`photomart_session::AuthGateway`],
//! file-backed credential storage, and the response-observation pipeline
//! that turns a server-side session invalidation into one uniform local
//! recovery.

pub mod api;
pub mod file_store;
pub mod interceptor;
pub mod observer;

pub use api::ApiClient;
pub use file_store::FileCredentialStore;
pub use interceptor::SessionInvalidationInterceptor;
pub use observer::{ObserverId, ResponseEvent, ResponseObserver, ResponseObserverRegistry};
