//! # Storage Backends
//!
//! Key-value text storage underneath [`crate::Persisted`].
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  trait StorageBackend                                                   │
//! │    load(key)          -> Option<String>                                 │
//! │    save(key, value)                                                     │
//! │    remove(key)                                                          │
//! │        │                                                                │
//! │        ├── MemoryStorage   shared HashMap, clones see the same data     │
//! │        │                                                                │
//! │        └── FileStorage     <dir>/<key>.json                             │
//! │                            write <key>.json.tmp, then rename            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Trait
// =============================================================================

/// Where snapshots live.
///
/// A missing key is `Ok(None)`, not an error.
pub trait StorageBackend {
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    fn save(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removing a missing key succeeds.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process storage.
///
/// Clones share one map, so a test can hand a clone to a store, drop the
/// store, and reopen from the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock can't leave the map half-written, so
    // poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// One JSON file per key inside a directory.
///
/// ## Example
/// ```rust,no_run
/// use storefront_store::{FileStorage, StorageBackend};
///
/// let storage = FileStorage::new("/tmp/storefront");
/// storage.save("cart-storage", "{}").unwrap();
/// assert_eq!(storage.path_for("cart-storage").unwrap().file_name().unwrap(), "cart-storage.json");
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// File that holds `key`.
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StorageBackend for FileStorage {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // Readers see either the old snapshot or the new one, never a prefix.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(key = %key, bytes = value.len(), path = %path.display(), "Snapshot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.save("cart-storage", "{\"items\":[]}").unwrap();
        assert_eq!(
            other.load("cart-storage").unwrap().as_deref(),
            Some("{\"items\":[]}")
        );
        assert_eq!(other.len(), 1);

        other.remove("cart-storage").unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.load("cart-storage").unwrap(), None);
    }

    #[test]
    fn test_file_save_load_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.load("booking-storage").unwrap(), None);

        storage.save("booking-storage", "{}").unwrap();
        let path = storage.path_for("booking-storage").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(storage.load("booking-storage").unwrap().as_deref(), Some("{}"));

        storage.save("booking-storage", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.load("booking-storage").unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        storage.remove("booking-storage").unwrap();
        storage.remove("booking-storage").unwrap();
        assert_eq!(storage.load("booking-storage").unwrap(), None);
    }

    #[test]
    fn test_file_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        for key in ["", "../cart", "a/b", "cart.json"] {
            assert!(
                matches!(storage.save(key, "{}"), Err(StoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_backend_by_reference() {
        fn roundtrip(backend: impl StorageBackend) -> Option<String> {
            backend.save("k", "v").unwrap();
            backend.load("k").unwrap()
        }

        let storage = MemoryStorage::new();
        assert_eq!(roundtrip(&storage).as_deref(), Some("v"));
        assert_eq!(storage.len(), 1);
    }
}
