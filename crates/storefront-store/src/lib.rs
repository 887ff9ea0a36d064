//! # storefront-store: Persistence for the Storefront Stores
//!
//! Mirrors the cart and booking stores to key-value storage as JSON
//! snapshots, the way a browser app keeps them in local storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  App command (add_to_cart)                                              │
//! │       │  cart.mutate(|c| c.add_item(..))                                │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   Persisted<Cart, B>          Persisted<BookingState, B>        │   │
//! │  │          │                              │                       │   │
//! │  │          ▼                              ▼                       │   │
//! │  │   "cart-storage"               "booking-storage"                │   │
//! │  │          └──────────────┬───────────────┘                       │   │
//! │  │                         ▼                                       │   │
//! │  │        StorageBackend: MemoryStorage | FileStorage              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - The `StorageBackend` trait and its two implementations
//! - [`persisted`] - Write-through wrapper around a store value
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod persisted;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub use error::{StoreError, StoreResult};
pub use persisted::Persisted;

use storefront_core::{BookingState, Cart};

/// Storage key of the cart snapshot.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Storage key of the booking snapshot.
pub const BOOKING_STORAGE_KEY: &str = "booking-storage";

/// The persisted cart store.
pub type CartStore<B> = Persisted<Cart, B>;

/// The persisted booking store.
pub type BookingStore<B> = Persisted<BookingState, B>;

/// Opens the cart store under [`CART_STORAGE_KEY`].
pub fn open_cart<B: StorageBackend>(backend: B) -> CartStore<B> {
    Persisted::open(backend, CART_STORAGE_KEY)
}

/// Opens the booking store under [`BOOKING_STORAGE_KEY`].
pub fn open_booking<B: StorageBackend>(backend: B) -> BookingStore<B> {
    Persisted::open(backend, BOOKING_STORAGE_KEY)
}
