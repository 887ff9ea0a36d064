//! # Cart State
//!
//! The persisted cart store as the app sees it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  User Action              Command                 Cart Change           │
//! │  ───────────              ───────                 ───────────           │
//! │                                                                         │
//! │  Add to cart ────────────► add_to_cart() ───────► merge or append line  │
//! │  Change quantity ────────► update_cart_item() ──► set qty (≤0 removes)  │
//! │  Click remove ───────────► remove_from_cart() ──► drop product lines    │
//! │  Click clear ────────────► clear_cart() ────────► empty                 │
//! │  View cart ──────────────► get_cart() ──────────► (read only)           │
//! │                                                                         │
//! │  Every write goes through with_cart_mut, which saves "cart-storage".   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::Cart;
use storefront_store::{open_cart, CartStore, StorageBackend, StoreResult};

/// App-owned cart state.
///
/// Exclusive access comes from `&mut AppState`, so there is no mutex here.
#[derive(Debug)]
pub struct CartState<B> {
    store: CartStore<B>,
}

impl<B: StorageBackend> CartState<B> {
    /// Opens the cart, restoring the last saved snapshot.
    pub fn open(backend: B) -> Self {
        CartState {
            store: open_cart(backend),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = cart_state.with_cart(|cart| cart.total_items());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(self.store.get())
    }

    /// Executes a function with write access to the cart, then saves it.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_item(item, 1));
    /// ```
    pub fn with_cart_mut<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        self.store.mutate(f)
    }

    /// Saves the cart now, surfacing any write failure.
    pub fn flush(&self) -> StoreResult<()> {
        self.store.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{Money, NewCartItem};
    use storefront_store::{MemoryStorage, CART_STORAGE_KEY};

    #[test]
    fn test_writes_are_saved() {
        let storage = MemoryStorage::new();
        let mut cart = CartState::open(storage.clone());

        cart.with_cart_mut(|c| c.add_item(NewCartItem::new(1, "A", Money::from_cents(500), ""), 2));

        assert!(storage.load(CART_STORAGE_KEY).unwrap().is_some());
        let reopened = CartState::open(storage);
        assert_eq!(reopened.with_cart(|c| c.total_price().cents()), 1000);
    }

    #[test]
    fn test_reads_do_not_save() {
        let storage = MemoryStorage::new();
        let cart = CartState::open(storage.clone());

        assert!(cart.with_cart(|c| c.is_empty()));
        assert!(storage.is_empty());

        cart.flush().unwrap();
        assert_eq!(storage.len(), 1);
    }
}
