//! File-backed credential storage under the OS app-data directory.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;

use photomart_session::{CredentialStore, StorageError};

/// Persists credentials as one JSON object at
/// `{app_data_dir}/photomart/credentials.json`.
///
/// Every read and write goes to disk; the file is small and the session
/// layer touches it only on sign-in, sign-out, and profile updates.
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes the read-modify-write cycle within this process.
    lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Store at the conventional per-user location, creating the
    /// directory if needed.
    pub fn open_default() -> Result<Self, StorageError> {
        let path =
            credentials_file_path().map_err(|e| StorageError::Unavailable(format!("{e:#}")))?;
        Ok(Self::at(path))
    }

    /// Store at an explicit path. The parent directory must exist.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_entries(&self) -> Result<HashMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| StorageError::Io(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| StorageError::Io(e.to_string()))
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string_pretty(entries).map_err(|e| StorageError::Io(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| StorageError::Io(e.to_string()))
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::Unavailable("poisoned".to_string()))?;
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::Unavailable("poisoned".to_string()))?;
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::Unavailable("poisoned".to_string()))?;
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

/// Resolve `{app_data_dir}/photomart/credentials.json`, creating the
/// directory if it doesn't exist.
fn credentials_file_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut dir = base;
    dir.push("photomart");

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create credential directory at {:?}", dir))?;

    dir.push("credentials.json");

    Ok(dir)
}
