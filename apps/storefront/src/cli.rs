//! CLI argument structures
//!
//! Defines the `storefront` command line and converts parsed arguments into
//! command requests.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use storefront_core::catalog::{CarFilter, ListingFilter, ProductFilter, SortBy};
use storefront_core::validation::CheckoutDetails;
use storefront_core::{DurationType, FuelType, Money, RentalRequest, Transmission};

use crate::commands::booking::StartBookingRequest;
use crate::commands::cart::{AddToCartRequest, LineSelector};

/// Browse the demo shop, fill a cart and book rental cars
#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "storefront - electronics shop and car rental from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to storefront.toml in the platform config dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory for the saved cart and bookings
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Shopping cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Electronics catalog
    #[command(subcommand)]
    Products(ProductsCommand),

    /// Rental fleet
    #[command(subcommand)]
    Cars(CarsCommand),

    /// Car rental bookings
    #[command(subcommand)]
    Booking(BookingCommand),
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show cart contents and totals
    Show,

    /// Add a product
    Add {
        product_id: u32,

        /// Quantity to add
        #[arg(short, long)]
        quantity: Option<i64>,

        #[command(flatten)]
        line: LineArgs,
    },

    /// Remove a product (or one variant/size line of it)
    Remove {
        product_id: u32,

        #[command(flatten)]
        line: LineArgs,
    },

    /// Set the quantity of a product (0 or less removes it)
    Update {
        product_id: u32,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        #[command(flatten)]
        line: LineArgs,
    },

    /// Empty the cart
    Clear,

    /// Subtotal, shipping, tax and total
    Summary,
}

/// Narrows a cart operation to one line.
#[derive(Debug, Clone, Default, Args)]
pub struct LineArgs {
    /// Color, storage or memory option
    #[arg(long)]
    pub variant: Option<String>,

    /// Size option
    #[arg(long)]
    pub size: Option<String>,
}

impl LineArgs {
    pub fn selector(self, product_id: u32) -> LineSelector {
        LineSelector {
            product_id,
            variant: self.variant,
            size: self.size,
        }
    }

    pub fn add_request(self, product_id: u32, quantity: Option<i64>) -> AddToCartRequest {
        AddToCartRequest {
            product_id,
            quantity,
            variant: self.variant,
            size: self.size,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// Search by name, description, brand or category
    Search {
        /// Search text (empty lists everything)
        #[arg(default_value = "")]
        query: String,
    },

    /// List categories with product counts
    Categories,

    /// Browse one category
    Category {
        slug: String,

        #[command(flatten)]
        listing: ListingArgs,

        /// Hide out-of-stock products
        #[arg(long)]
        in_stock: bool,
    },

    /// Product details
    Show { id: u32 },
}

/// Filters shared by product and car listings. Prices are in cents.
#[derive(Debug, Clone, Args)]
pub struct ListingArgs {
    /// name, price-low, price-high or rating
    #[arg(long, default_value = "name")]
    pub sort: SortBy,

    #[arg(long, value_name = "CENTS")]
    pub min_price: Option<i64>,

    #[arg(long, value_name = "CENTS")]
    pub max_price: Option<i64>,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub min_rating: Option<f32>,
}

impl ListingArgs {
    fn into_filter(self, query: Option<String>, category_slug: Option<String>) -> ListingFilter {
        ListingFilter {
            query,
            category_slug,
            brand: self.brand,
            price_min: self.min_price.map(Money::from_cents),
            price_max: self.max_price.map(Money::from_cents),
            min_rating: self.min_rating,
            sort: self.sort,
        }
    }

    pub fn product_filter(self, in_stock_only: bool) -> ProductFilter {
        ProductFilter {
            listing: self.into_filter(None, None),
            in_stock_only,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CarsCommand {
    /// Search and filter the fleet
    Search {
        /// Matches name, brand, model, category or location
        query: Option<String>,

        #[command(flatten)]
        listing: ListingArgs,

        /// Category slug (sedan, suv, ...)
        #[arg(long)]
        category: Option<String>,

        #[arg(long, value_enum)]
        fuel: Option<FuelArg>,

        #[arg(long, value_enum)]
        transmission: Option<TransmissionArg>,

        #[arg(long)]
        min_seats: Option<u8>,

        /// Only cars that can be booked now
        #[arg(long)]
        available: bool,
    },

    /// Car details
    Show { id: u32 },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FuelArg {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

impl From<FuelArg> for FuelType {
    fn from(arg: FuelArg) -> Self {
        match arg {
            FuelArg::Petrol => FuelType::Petrol,
            FuelArg::Diesel => FuelType::Diesel,
            FuelArg::Electric => FuelType::Electric,
            FuelArg::Hybrid => FuelType::Hybrid,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TransmissionArg {
    Manual,
    Automatic,
}

impl From<TransmissionArg> for Transmission {
    fn from(arg: TransmissionArg) -> Self {
        match arg {
            TransmissionArg::Manual => Transmission::Manual,
            TransmissionArg::Automatic => Transmission::Automatic,
        }
    }
}

/// Builds the fleet filter from `cars search` arguments.
pub fn car_filter(
    query: Option<String>,
    listing: ListingArgs,
    category: Option<String>,
    fuel: Option<FuelArg>,
    transmission: Option<TransmissionArg>,
    min_seats: Option<u8>,
    available_only: bool,
) -> CarFilter {
    CarFilter {
        listing: listing.into_filter(query, category),
        fuel_type: fuel.map(FuelType::from),
        transmission: transmission.map(Transmission::from),
        min_seats,
        available_only,
    }
}

// =============================================================================
// Booking
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum BookingCommand {
    /// Price a rental without booking it
    Quote {
        car_id: u32,

        #[command(flatten)]
        rental: RentalArgs,
    },

    /// Start a booking (replaces any booking in progress)
    Start {
        car_id: u32,

        #[command(flatten)]
        rental: RentalArgs,

        /// Pickup location; drop-off is the same place
        #[arg(long, default_value = "")]
        pickup: String,
    },

    /// Show the booking in progress
    Show,

    /// Discard the booking in progress
    Cancel,

    /// Confirm the booking in progress
    Confirm {
        #[command(flatten)]
        details: CheckoutArgs,
    },

    /// Confirmed bookings, newest first
    History,
}

/// Rental dates and times. Blank values are reported by validation.
#[derive(Debug, Clone, Args)]
pub struct RentalArgs {
    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub start_date: String,

    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub end_date: String,

    /// HH:MM, hourly rentals only
    #[arg(long)]
    pub start_time: Option<String>,

    /// HH:MM, hourly rentals only
    #[arg(long)]
    pub end_time: Option<String>,

    /// days or hours
    #[arg(long = "by", default_value = "days")]
    pub duration_type: DurationType,
}

impl From<RentalArgs> for RentalRequest {
    fn from(args: RentalArgs) -> Self {
        RentalRequest {
            start_date: args.start_date,
            end_date: args.end_date,
            start_time: args.start_time,
            end_time: args.end_time,
            duration_type: args.duration_type,
        }
    }
}

impl RentalArgs {
    pub fn start_request(self, car_id: u32, pickup_location: String) -> StartBookingRequest {
        StartBookingRequest {
            car_id,
            rental: self.into(),
            pickup_location,
        }
    }
}

/// Driver and payment details for `booking confirm`.
#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub license_number: String,
    #[arg(long, default_value = "")]
    pub card_number: String,
    /// MM/YY
    #[arg(long, default_value = "")]
    pub expiry_date: String,
    #[arg(long, default_value = "")]
    pub cvv: String,
    #[arg(long, default_value = "")]
    pub cardholder_name: String,
}

impl From<CheckoutArgs> for CheckoutDetails {
    fn from(args: CheckoutArgs) -> Self {
        CheckoutDetails {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            license_number: args.license_number,
            card_number: args.card_number,
            expiry_date: args.expiry_date,
            cvv: args.cvv,
            cardholder_name: args.cardholder_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_add_with_variant() {
        let cli = Cli::try_parse_from([
            "storefront", "cart", "add", "1", "-q", "2", "--variant", "Black",
        ])
        .unwrap();

        match cli.command {
            Commands::Cart(CartCommand::Add {
                product_id,
                quantity,
                line,
            }) => {
                let request = line.add_request(product_id, quantity);
                assert_eq!(request.product_id, 1);
                assert_eq!(request.quantity, Some(2));
                assert_eq!(request.variant.as_deref(), Some("Black"));
                assert!(request.size.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_negative_update() {
        let cli = Cli::try_parse_from(["storefront", "cart", "update", "3", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cart(CartCommand::Update { quantity: -1, .. })
        ));
    }

    #[test]
    fn test_parse_category_sort() {
        let cli = Cli::try_parse_from([
            "storefront", "-v", "products", "category", "audio", "--sort", "price-high",
            "--max-price", "20000",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);

        match cli.command {
            Commands::Products(ProductsCommand::Category {
                listing, in_stock, ..
            }) => {
                let filter = listing.product_filter(in_stock);
                assert_eq!(filter.listing.sort, SortBy::PriceDesc);
                assert_eq!(filter.listing.price_max, Some(Money::from_cents(20000)));
                assert!(!filter.in_stock_only);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["storefront", "products", "category", "audio", "--sort", "best"]).is_err());
    }

    #[test]
    fn test_parse_hourly_booking() {
        let cli = Cli::try_parse_from([
            "storefront", "booking", "start", "2", "--start-date", "2024-06-01",
            "--end-date", "2024-06-01", "--start-time", "10:00", "--end-time", "13:30",
            "--by", "hours", "--pickup", "Airport",
        ])
        .unwrap();

        match cli.command {
            Commands::Booking(BookingCommand::Start {
                car_id,
                rental,
                pickup,
            }) => {
                let request = rental.start_request(car_id, pickup);
                assert_eq!(request.rental.duration_type, DurationType::Hours);
                assert_eq!(request.rental.duration().unwrap(), 4);
                assert_eq!(request.pickup_location, "Airport");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
