//! # Persisted Store
//!
//! Wraps a store value so every mutation is written through to a backend.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  open(backend, key)                                                     │
//! │    load(key) ── Some(json) ── parse ok ──► state = snapshot             │
//! │        │                         │                                      │
//! │        None                      parse error ──► warn!, state = default │
//! │        │                                                                │
//! │        └──► state = default                                             │
//! │                                                                         │
//! │  mutate(|state| ...)                                                    │
//! │    run closure ──► serialize ──► save(key)                              │
//! │                                    │                                    │
//! │                                    └── error ──► warn!, keep going      │
//! │                                                                         │
//! │  flush()  same write, but the error is returned                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! In-memory state is the source of truth. A failed write never rolls a
//! mutation back; the next successful write catches the snapshot up.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backend::StorageBackend;
use crate::error::StoreResult;

/// A store value plus the backend key it is mirrored to.
///
/// ## Example
/// ```rust
/// use storefront_core::cart::{Cart, NewCartItem};
/// use storefront_core::money::Money;
/// use storefront_store::{MemoryStorage, Persisted};
///
/// let storage = MemoryStorage::new();
/// let mut cart: Persisted<Cart, _> = Persisted::open(storage.clone(), "cart-storage");
///
/// cart.mutate(|c| c.add_item(NewCartItem::new(1, "A", Money::from_cents(500), ""), 2));
///
/// let reopened: Persisted<Cart, _> = Persisted::open(storage, "cart-storage");
/// assert_eq!(reopened.get().total_items(), 2);
/// ```
#[derive(Debug)]
pub struct Persisted<T, B> {
    state: T,
    backend: B,
    key: String,
}

impl<T, B> Persisted<T, B>
where
    T: Serialize + DeserializeOwned + Default,
    B: StorageBackend,
{
    /// Opens the store, restoring the last snapshot under `key`.
    ///
    /// Never fails: a missing, unreadable or corrupt snapshot yields
    /// `T::default()` and a warning.
    pub fn open(backend: B, key: impl Into<String>) -> Self {
        let key = key.into();

        let state = match backend.load(&key) {
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(state) => {
                    info!(key = %key, "Restored store snapshot");
                    state
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "Discarding corrupt store snapshot");
                    T::default()
                }
            },
            Ok(None) => {
                debug!(key = %key, "No store snapshot, starting empty");
                T::default()
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Failed to read store snapshot");
                T::default()
            }
        };

        Persisted {
            state,
            backend,
            key,
        }
    }

    /// Read access to the current state.
    pub fn get(&self) -> &T {
        &self.state
    }

    /// Applies `f` to the state, then writes the new snapshot.
    ///
    /// Returns whatever `f` returns. Write failures are logged, not
    /// returned.
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.state);

        if let Err(err) = self.write() {
            warn!(key = %self.key, error = %err, "Failed to persist store snapshot");
        }

        result
    }

    /// Writes the current snapshot, returning any failure.
    pub fn flush(&self) -> StoreResult<()> {
        self.write()
    }

    fn write(&self) -> StoreResult<()> {
        let text = serde_json::to_string(&self.state)?;
        self.backend.save(&self.key, &text)
    }
}

impl<T, B> Persisted<T, B>
where
    T: Clone,
{
    /// An owned copy of the current state.
    pub fn snapshot(&self) -> T {
        self.state.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
