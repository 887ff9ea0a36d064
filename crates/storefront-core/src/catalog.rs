//! # Catalog Queries
//!
//! Search, filter and sort over the static catalog.
//!
//! ## Query Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  &[Product] / &[Car]                                                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  text query ──► category ──► brand ──► price range ──► flags            │
//! │  (substring,    (slug)       (exact,   (inclusive)     (stock, seats,   │
//! │   any field)                  no case)                  fuel, ...)      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  stable sort: name ↑ | price ↑ | price ↓ | rating ↓                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Vec<&T>  (borrowed; the catalog is never copied)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Car, FuelType, Product, Transmission};

// =============================================================================
// Listing Trait
// =============================================================================

/// What the shared filter/sort code needs from a catalog entry.
pub trait Listing {
    fn name(&self) -> &str;
    fn brand(&self) -> &str;
    fn category_slug(&self) -> &str;
    /// Price used for range filters and price sorts.
    fn list_price(&self) -> Money;
    fn rating(&self) -> f32;
    /// Fields a free-text query is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

impl Listing for Product {
    fn name(&self) -> &str {
        &self.name
    }

    fn brand(&self) -> &str {
        &self.brand
    }

    fn category_slug(&self) -> &str {
        &self.category_slug
    }

    fn list_price(&self) -> Money {
        self.price
    }

    fn rating(&self) -> f32 {
        self.rating
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.brand.as_str(),
            self.category.as_str(),
        ]
    }
}

impl Listing for Car {
    fn name(&self) -> &str {
        &self.name
    }

    fn brand(&self) -> &str {
        &self.brand
    }

    fn category_slug(&self) -> &str {
        &self.category_slug
    }

    /// Cars are listed and filtered by their daily rate.
    fn list_price(&self) -> Money {
        self.price_per_day
    }

    fn rating(&self) -> f32 {
        self.rating
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.brand.as_str(),
            self.model.as_str(),
            self.category.as_str(),
            self.location.as_str(),
        ]
    }
}

/// Case-insensitive substring match over [`Listing::search_fields`].
/// A blank query matches everything.
pub fn matches_query<T: Listing>(entry: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    entry
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Free-text product search, catalog order preserved.
pub fn search_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| matches_query(*p, query)).collect()
}

// =============================================================================
// Sorting
// =============================================================================

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Name A-Z, ignoring case.
    #[default]
    Name,
    /// Price low to high.
    #[serde(rename = "price-low")]
    PriceAsc,
    /// Price high to low.
    #[serde(rename = "price-high")]
    PriceDesc,
    /// Highest rated first.
    Rating,
}

impl SortBy {
    fn compare<T: Listing>(&self, a: &T, b: &T) -> Ordering {
        match self {
            SortBy::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
            SortBy::PriceAsc => a.list_price().cmp(&b.list_price()),
            SortBy::PriceDesc => b.list_price().cmp(&a.list_price()),
            SortBy::Rating => b.rating().total_cmp(&a.rating()),
        }
    }

    /// Stable sort in place.
    pub fn sort<T: Listing>(&self, entries: &mut [&T]) {
        entries.sort_by(|a, b| self.compare(*a, *b));
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortBy::Name => "name",
            SortBy::PriceAsc => "price-low",
            SortBy::PriceDesc => "price-high",
            SortBy::Rating => "rating",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortBy::Name),
            "price-low" | "price" | "price-asc" => Ok(SortBy::PriceAsc),
            "price-high" | "price-desc" => Ok(SortBy::PriceDesc),
            "rating" => Ok(SortBy::Rating),
            other => Err(ValidationError::InvalidFormat {
                field: "sort".to_string(),
                reason: format!(
                    "'{}' is not one of: name, price-low, price-high, rating",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// Shared Filter Fields
// =============================================================================

/// Filter fields common to products and cars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilter {
    pub query: Option<String>,
    pub category_slug: Option<String>,
    pub brand: Option<String>,
    /// Inclusive lower bound.
    pub price_min: Option<Money>,
    /// Inclusive upper bound.
    pub price_max: Option<Money>,
    pub min_rating: Option<f32>,
    #[serde(default)]
    pub sort: SortBy,
}

impl ListingFilter {
    fn accepts<T: Listing>(&self, entry: &T) -> bool {
        if let Some(query) = &self.query {
            if !matches_query(entry, query) {
                return false;
            }
        }
        if let Some(slug) = &self.category_slug {
            if entry.category_slug() != slug.as_str() {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if !entry.brand().eq_ignore_ascii_case(brand) {
                return false;
            }
        }
        let price = entry.list_price();
        if self.price_min.is_some_and(|min| price < min) {
            return false;
        }
        if self.price_max.is_some_and(|max| price > max) {
            return false;
        }
        if self.min_rating.is_some_and(|min| entry.rating() < min) {
            return false;
        }
        true
    }

    fn run<'a, T: Listing>(
        &self,
        entries: &'a [T],
        extra: impl Fn(&T) -> bool,
    ) -> Vec<&'a T> {
        let mut hits: Vec<&T> = entries
            .iter()
            .filter(|e| self.accepts(*e) && extra(*e))
            .collect();
        self.sort.sort(&mut hits);
        hits
    }
}

// =============================================================================
// Product Filter
// =============================================================================

/// Category page / search page filter for products.
///
/// ## Example
/// ```rust
/// use storefront_core::catalog::{ProductFilter, SortBy};
///
/// let filter = ProductFilter::category("audio").sorted_by(SortBy::PriceDesc);
/// assert_eq!(filter.listing.category_slug.as_deref(), Some("audio"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(flatten)]
    pub listing: ListingFilter,
    #[serde(default)]
    pub in_stock_only: bool,
}

impl ProductFilter {
    pub fn category(slug: impl Into<String>) -> Self {
        let mut filter = ProductFilter::default();
        filter.listing.category_slug = Some(slug.into());
        filter
    }

    pub fn sorted_by(mut self, sort: SortBy) -> Self {
        self.listing.sort = sort;
        self
    }

    pub fn price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.listing.price_min = min;
        self.listing.price_max = max;
        self
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        self.listing
            .run(products, |p| !self.in_stock_only || p.in_stock)
    }
}

// =============================================================================
// Car Filter
// =============================================================================

/// Fleet search filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarFilter {
    #[serde(flatten)]
    pub listing: ListingFilter,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub min_seats: Option<u8>,
    #[serde(default)]
    pub available_only: bool,
}

impl CarFilter {
    pub fn apply<'a>(&self, cars: &'a [Car]) -> Vec<&'a Car> {
        self.listing.run(cars, |car| {
            self.fuel_type.map_or(true, |f| car.fuel_type == f)
                && self.transmission.map_or(true, |t| car.transmission == t)
                && self.min_seats.map_or(true, |s| car.seating_capacity >= s)
                && (!self.available_only || car.available)
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
