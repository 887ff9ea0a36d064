//! # Commands Module
//!
//! Every operation the front-end (here, the CLI) can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── Cart manipulation + order summary
//! ├── catalog.rs  ◄─── Search, category pages, product/car details
//! └── booking.rs  ◄─── Rental quote, draft, confirm, history
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI args ──► request struct ──► command(&mut AppState, request)        │
//! │                                        │                                │
//! │                                        ├── Ok(Response) ──► JSON out    │
//! │                                        └── Err(ApiError) ──► [CODE] msg │
//! │                                                                         │
//! │  Reads take &AppState, writes take &mut AppState and persist through    │
//! │  the store before returning.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod booking;
pub mod cart;
pub mod catalog;
