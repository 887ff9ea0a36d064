//! # Storefront Library
//!
//! Composition root for the storefront application: owns the persisted
//! stores, resolves configuration and dispatches CLI commands.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (tracing setup, dispatch)
//! ├── main.rs         ◄─── Binary entry point
//! ├── cli.rs          ◄─── clap argument structures
//! ├── data.rs         ◄─── Demo catalog (products, categories, cars)
//! ├── notify.rs       ◄─── Toast notifications
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState
//! │   ├── cart.rs     ◄─── Persisted cart wrapper
//! │   ├── booking.rs  ◄─── Persisted booking wrapper
//! │   └── config.rs   ◄─── storefront.toml + STOREFRONT_* env
//! ├── commands/
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── catalog.rs  ◄─── Search and browse commands
//! │   └── booking.rs  ◄─── Rental booking commands
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse CLI           → Cli::parse()                                  │
//! │  2. Init tracing        → RUST_LOG or -v / -vv                          │
//! │  3. Load config         → defaults < storefront.toml < STOREFRONT_* env │
//! │  4. Open stores         → FileStorage in the data dir                   │
//! │  5. Execute command     → JSON on stdout, [CODE] message on stderr      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod data;
pub mod error;
pub mod notify;
pub mod state;

use serde::Serialize;
use serde_json::Value;
use storefront_store::{FileStorage, StorageBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{BookingCommand, CarsCommand, CartCommand, Cli, Commands, ProductsCommand};
use commands::{booking, cart, catalog};
use error::ApiError;
use notify::LogNotifier;
use state::{AppState, ConfigState};

/// Filter used when neither RUST_LOG nor -v is given.
const DEFAULT_LOG_FILTER: &str = "info,storefront=debug";

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so stdout stays clean JSON.
///
/// ## Levels
/// - no flag: `RUST_LOG`, else `info,storefront=debug`
/// - `-v`: debug
/// - `-vv`: trace
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Runs one CLI invocation against the on-disk stores.
///
/// Returns the command response as JSON; `main` prints it.
pub fn run(cli: Cli) -> Result<Value, ApiError> {
    let mut config = match cli.config {
        // An explicit config file must load cleanly.
        Some(path) => ConfigState::load(Some(path)).map_err(|e| ApiError::validation(e.to_string()))?,
        None => ConfigState::load_or_default(None),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let data_dir = config.resolve_data_dir();
    info!(data_dir = %data_dir.display(), store = %config.store_name, "Opening storefront");

    let mut state = AppState::open(FileStorage::new(data_dir), config, Box::new(LogNotifier));
    let output = execute(&mut state, cli.command)?;

    // Surface write failures that the stores swallowed during the command.
    state.cart.flush()?;
    state.booking.flush()?;

    Ok(output)
}

/// Dispatches a parsed command against `state`.
pub fn execute<B: StorageBackend>(state: &mut AppState<B>, command: Commands) -> Result<Value, ApiError> {
    match command {
        Commands::Cart(command) => match command {
            CartCommand::Show => to_json(cart::get_cart(state)),
            CartCommand::Add {
                product_id,
                quantity,
                line,
            } => to_json(cart::add_to_cart(state, line.add_request(product_id, quantity))?),
            CartCommand::Remove { product_id, line } => {
                to_json(cart::remove_from_cart(state, line.selector(product_id)))
            }
            CartCommand::Update {
                product_id,
                quantity,
                line,
            } => to_json(cart::update_cart_item(state, line.selector(product_id), quantity)),
            CartCommand::Clear => to_json(cart::clear_cart(state)),
            CartCommand::Summary => to_json(cart::cart_summary(state)),
        },

        Commands::Products(command) => match command {
            ProductsCommand::Search { query } => to_json(catalog::search_products(state, &query)),
            ProductsCommand::Categories => to_json(catalog::list_categories(state)),
            ProductsCommand::Category {
                slug,
                listing,
                in_stock,
            } => to_json(catalog::browse_category(state, &slug, listing.product_filter(in_stock))?),
            ProductsCommand::Show { id } => to_json(catalog::get_product(state, id)?),
        },

        Commands::Cars(command) => match command {
            CarsCommand::Search {
                query,
                listing,
                category,
                fuel,
                transmission,
                min_seats,
                available,
            } => {
                let filter = cli::car_filter(query, listing, category, fuel, transmission, min_seats, available);
                to_json(catalog::search_cars(state, &filter))
            }
            CarsCommand::Show { id } => to_json(catalog::get_car(state, id)?),
        },

        Commands::Booking(command) => match command {
            BookingCommand::Quote { car_id, rental } => {
                to_json(booking::quote_rental(state, car_id, &rental.into())?)
            }
            BookingCommand::Start {
                car_id,
                rental,
                pickup,
            } => to_json(booking::start_booking(state, rental.start_request(car_id, pickup))?),
            BookingCommand::Show => to_json(booking::get_booking(state)),
            BookingCommand::Cancel => to_json(booking::cancel_booking(state)),
            BookingCommand::Confirm { details } => to_json(booking::confirm_booking(state, &details.into())?),
            BookingCommand::History => to_json(booking::booking_history(state)),
        },
    }
}

fn to_json<T: Serialize>(response: T) -> Result<Value, ApiError> {
    serde_json::to_value(response).map_err(|e| ApiError::internal(format!("Failed to encode response: {}", e)))
}
