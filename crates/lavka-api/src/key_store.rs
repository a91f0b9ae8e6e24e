//! Persistent API-key storage.
//!
//! The service authenticates every call with an `api_key` query parameter.
//! The key lives in a small file under the state directory so a shopper keeps
//! their key across sessions; when nothing is persisted yet the well-known
//! default key is written out and used, so every session is authenticated.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Fallback key used when the shopper has not stored their own.
pub const DEFAULT_API_KEY: &str = "07ad9b1b-9a18-4e25-8eeb-5c6b5f3cb362";

const KEY_FILE: &str = "api_key";

/// File-backed store for the API key.
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    #[must_use]
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(KEY_FILE),
        }
    }

    /// Returns the persisted key, if any.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Returns the key to authenticate with, self-healing to the default.
    ///
    /// When no key is persisted, [`DEFAULT_API_KEY`] is written out and
    /// returned. A failed write degrades to using the default for this call
    /// only; requests still go out authenticated.
    #[must_use]
    pub fn current(&self) -> String {
        if let Some(key) = self.get() {
            return key;
        }
        if let Err(e) = self.set(DEFAULT_API_KEY) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist default API key");
        }
        DEFAULT_API_KEY.to_string()
    }

    /// Persists a key. An empty (after trimming) value clears the store.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the key file cannot be written.
    pub fn set(&self, value: &str) -> Result<(), io::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return self.clear();
        }
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, trimmed)
    }

    /// Removes the persisted key; the next call self-heals to the default.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the key file cannot be removed.
    pub fn clear(&self) -> Result<(), io::Error> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_self_heals_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyStore::new(dir.path());
        assert_eq!(store.get(), None);
        assert_eq!(store.current(), DEFAULT_API_KEY);
        // The default must now be persisted for the next session.
        assert_eq!(store.get().as_deref(), Some(DEFAULT_API_KEY));
    }

    #[test]
    fn set_and_get_round_trip_with_trimming() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyStore::new(dir.path());
        store.set("  my-key \n").unwrap();
        assert_eq!(store.get().as_deref(), Some("my-key"));
        assert_eq!(store.current(), "my-key");
    }

    #[test]
    fn setting_empty_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyStore::new(dir.path());
        store.set("my-key").unwrap();
        store.set("   ").unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn clear_on_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyStore::new(dir.path());
        store.clear().unwrap();
    }
}
