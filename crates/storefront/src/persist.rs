//! Persistence capability for client-side state.
//!
//! Stores persist a JSON document per key on every mutation (last write
//! wins, no batching). The capability is injected so store logic is testable
//! against [`MemoryPersistence`] without touching the filesystem.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying storage I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Persisted document failed to serialize.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable key-value persistence for client state.
///
/// Keys are store-chosen and schema-versioned (e.g. `cart/v1`); values are
/// JSON documents. Implementations must be safe to share across threads.
pub trait Persistence: Send + Sync {
    /// Load the document stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage read fails. A missing key
    /// is `Ok(None)`, not an error.
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Store `value` under `key`, replacing any previous document.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage write fails.
    fn save(&self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Remove the document stored under `key`. Removing an absent key is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage removal fails.
    fn remove(&self, key: &str) -> Result<(), PersistError>;
}

// =============================================================================
// FilePersistence
// =============================================================================

/// One JSON file per key under a state directory.
#[derive(Debug)]
pub struct FilePersistence {
    dir: PathBuf,
}

impl FilePersistence {
    /// Create a file-backed persistence rooted at `dir`, creating the
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys contain `/` as a namespace separator; flatten to a single
        // filesystem-safe file name.
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.dir.join(format!("{sanitized}.json"))
    }
}

impl Persistence for FilePersistence {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PersistError> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// MemoryPersistence
// =============================================================================

/// In-memory persistence, used by tests and embedders that don't want
/// durable state.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryPersistence {
    /// Create an empty in-memory persistence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a key currently has a stored document.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let persistence = MemoryPersistence::new();
        assert!(persistence.load("cart/v1").unwrap().is_none());

        persistence.save("cart/v1", r#"{"items":[]}"#).unwrap();
        assert_eq!(
            persistence.load("cart/v1").unwrap().as_deref(),
            Some(r#"{"items":[]}"#)
        );

        persistence.remove("cart/v1").unwrap();
        assert!(persistence.load("cart/v1").unwrap().is_none());
        // Removing again is a no-op
        persistence.remove("cart/v1").unwrap();
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join(format!(
            "driftwood-persist-test-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let persistence = FilePersistence::new(&dir).unwrap();

        assert!(persistence.load("favorites/v1").unwrap().is_none());
        persistence.save("favorites/v1", r#"{"items":[]}"#).unwrap();
        assert_eq!(
            persistence.load("favorites/v1").unwrap().as_deref(),
            Some(r#"{"items":[]}"#)
        );

        persistence.remove("favorites/v1").unwrap();
        assert!(persistence.load("favorites/v1").unwrap().is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_key_sanitization() {
        let persistence = FilePersistence {
            dir: PathBuf::from("/tmp/state"),
        };
        let path = persistence.path_for("cart/v1");
        assert_eq!(path, PathBuf::from("/tmp/state/cart-v1.json"));
    }
}
