//! # State Module
//!
//! Everything a command can touch, owned in one place.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  main() ──► AppState::open(FileStorage, config, LogNotifier)            │
//! │                │                                                        │
//! │                │  &mut AppState passed to each command                  │
//! │    ┌───────────┼──────────────┬──────────────┬──────────────┐           │
//! │    ▼           ▼              ▼              ▼              ▼           │
//! │  CartState  BookingStore   ConfigState    Catalog       Notifier        │
//! │  (persisted) State          (read-only)   (read-only)   (toasts)        │
//! │              (persisted)                                                │
//! │                                                                         │
//! │  One owner, one thread: exclusive borrows instead of locks.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod booking;
mod cart;
mod config;

pub use booking::BookingStoreState;
pub use cart::CartState;
pub use config::{ConfigError, ConfigState, CONFIG_FILE_NAME};

use storefront_store::StorageBackend;

use crate::data::Catalog;
use crate::notify::{Notifier, Toast};

/// Application root state.
pub struct AppState<B> {
    pub cart: CartState<B>,
    pub booking: BookingStoreState<B>,
    pub config: ConfigState,
    pub catalog: Catalog,
    notifier: Box<dyn Notifier>,
}

impl<B: StorageBackend + Clone> AppState<B> {
    /// Opens both stores on `backend` with the demo catalog.
    pub fn open(backend: B, config: ConfigState, notifier: Box<dyn Notifier>) -> Self {
        Self::with_catalog(backend, config, Catalog::demo(), notifier)
    }

    pub fn with_catalog(
        backend: B,
        config: ConfigState,
        catalog: Catalog,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        AppState {
            cart: CartState::open(backend.clone()),
            booking: BookingStoreState::open(backend),
            config,
            catalog,
            notifier,
        }
    }
}

impl<B> AppState<B> {
    pub fn notify(&self, toast: Toast) {
        self.notifier.notify(toast);
    }
}
