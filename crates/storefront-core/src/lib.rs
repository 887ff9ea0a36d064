//! # storefront-core: Pure State Logic for the Storefront
//!
//! This crate holds the client-side state containers of the two storefront
//! demos (electronics shop and car rental) as plain Rust values with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 CLI / web front-end (consumers)                 │   │
//! │  │   Search ──► Product ──► Cart        Car ──► Booking ──► Confirm│   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │   │  money  │ │  cart   │ │ booking │ │ catalog │ │validation│ │   │
//! │  │   │  Money  │ │  Cart   │ │ Booking │ │ filters │ │ required │ │   │
//! │  │   │ TaxRate │ │ totals  │ │  State  │ │  sorts  │ │  fields  │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               storefront-store (Persistence Layer)              │   │
//! │  │          cart-storage / booking-storage JSON snapshots          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Catalog entities (Product, Car, Category, ...)
//! - [`cart`] - Cart store with derived totals
//! - [`booking`] - Booking store, cost and rental duration
//! - [`catalog`] - Search, filter and sort over the catalog
//! - [`validation`] - Required-field checks run before store operations
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::{Cart, NewCartItem};
//! use storefront_core::money::Money;
//!
//! let mut cart = Cart::new();
//! let item = NewCartItem::new(1, "A", Money::from_cents(1000), "");
//!
//! cart.add_item(item.clone(), 1);
//! cart.add_item(item, 1);
//!
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price().cents(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod booking;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use booking::{BookingDraft, BookingPhase, BookingState, DurationType, RentalRequest};
pub use cart::{Cart, CartItem, LineKey, NewCartItem, OrderSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default sales tax shown on the order summary, in basis points (8%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Quantity used when a caller adds an item without specifying one.
pub const DEFAULT_ADD_QUANTITY: i64 = 1;
