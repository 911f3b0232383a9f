//! Persistent auth token storage
//!
//! The backend bearer token survives restarts in a small JSON file under
//! the app data directory. Absence of the file simply means no session.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    access_token: String,
}

/// File-backed store for the backend access token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the persisted token, if any. An unreadable or corrupt file is
    /// treated as no session.
    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<StoredToken>(&raw) {
            Ok(stored) => Some(stored.access_token),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding corrupt token file");
                None
            }
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        let stored = StoredToken {
            access_token: token.to_string(),
        };
        fs::write(&self.path, serde_json::to_string(&stored)?)?;
        Ok(())
    }

    /// Remove the persisted token. Missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("session.json"));

        assert!(store.load().is_none());
        store.save("token-123").unwrap();
        assert_eq!(store.load().as_deref(), Some("token-123"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("session.json"));

        store.save("token-123").unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_treated_as_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = TokenStore::new(path);
        assert!(store.load().is_none());
    }
}
