//! # Booking State
//!
//! The persisted booking store: one draft slot plus confirmed history.
//!
//! ```text
//!   start_booking ──► Drafted ──┬── confirm_booking ──► Empty (draft archived)
//!        ▲                      │
//!        └── replaces draft ────┴── cancel_booking  ──► Empty (draft dropped)
//! ```

use storefront_core::BookingState;
use storefront_store::{open_booking, BookingStore, StorageBackend, StoreResult};

/// App-owned booking state.
#[derive(Debug)]
pub struct BookingStoreState<B> {
    store: BookingStore<B>,
}

impl<B: StorageBackend> BookingStoreState<B> {
    pub fn open(backend: B) -> Self {
        BookingStoreState {
            store: open_booking(backend),
        }
    }

    pub fn with_booking<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BookingState) -> R,
    {
        f(self.store.get())
    }

    /// Write access; saves "booking-storage" afterwards.
    pub fn with_booking_mut<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut BookingState) -> R,
    {
        self.store.mutate(f)
    }

    pub fn flush(&self) -> StoreResult<()> {
        self.store.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::BookingPhase;
    use storefront_store::MemoryStorage;

    #[test]
    fn test_opens_empty() {
        let booking = BookingStoreState::open(MemoryStorage::new());
        assert_eq!(booking.with_booking(|b| b.phase()), BookingPhase::Empty);
        assert!(booking.with_booking(|b| b.booking_history().is_empty()));
    }
}
