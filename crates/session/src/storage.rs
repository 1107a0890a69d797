//! Opaque credential storage contract.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Failure of the credential storage backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend cannot be used at all (missing directory, poisoned
    /// state).
    #[error("credential storage unavailable: {0}")]
    Unavailable(String),

    /// A single read or write failed.
    #[error("credential storage IO failed: {0}")]
    Io(String),
}

/// Minimal key-value surface the session layer persists credentials through.
///
/// Values are opaque strings; what goes into them is the vault's business.
/// Implementations must be safe for concurrent use. The production
/// file-backed store lives in the client crate.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and session-only (non-remembered) use.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
