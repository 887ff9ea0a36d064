//! # Catalog Commands
//!
//! Read-only browsing: search, category pages, product and car details.

use serde::Serialize;
use storefront_core::catalog::{search_products as search, CarFilter, ProductFilter};
use storefront_core::{Car, Category, Product};
use storefront_store::StorageBackend;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// A category page: the category plus its filtered, sorted products.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub category: Category,
    pub products: Vec<Product>,
}

/// A category with its product count, for the home page grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: usize,
}

/// Product detail with the display-ready discount.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub discount_percent: Option<i64>,
    pub formatted_price: String,
}

/// Free-text product search; a blank query returns everything.
pub fn search_products<B: StorageBackend>(state: &AppState<B>, query: &str) -> Vec<Product> {
    debug!(query = %query, "search_products command");
    let hits = search(state.catalog.products(), query);
    debug!(count = hits.len(), "Search returned products");
    hits.into_iter().cloned().collect()
}

pub fn list_categories<B: StorageBackend>(state: &AppState<B>) -> Vec<CategorySummary> {
    state
        .catalog
        .categories()
        .iter()
        .map(|category| CategorySummary {
            category: category.clone(),
            product_count: state.catalog.product_count(&category.slug),
        })
        .collect()
}

/// Products of one category after `filter`.
///
/// The category slug always comes from `slug`, whatever `filter` says.
pub fn browse_category<B: StorageBackend>(
    state: &AppState<B>,
    slug: &str,
    mut filter: ProductFilter,
) -> Result<CategoryResponse, ApiError> {
    debug!(slug = %slug, sort = %filter.listing.sort, "browse_category command");

    let category = state.catalog.category(slug)?.clone();
    filter.listing.category_slug = Some(category.slug.clone());

    let products = filter
        .apply(state.catalog.products())
        .into_iter()
        .cloned()
        .collect();

    Ok(CategoryResponse { category, products })
}

pub fn get_product<B: StorageBackend>(state: &AppState<B>, id: u32) -> Result<ProductDetail, ApiError> {
    debug!(product_id = %id, "get_product command");
    let product = state.catalog.product(id)?;
    Ok(ProductDetail {
        discount_percent: product.discount_percent(),
        formatted_price: state.config.format_money(product.price),
        product: product.clone(),
    })
}

pub fn search_cars<B: StorageBackend>(state: &AppState<B>, filter: &CarFilter) -> Vec<Car> {
    debug!(query = ?filter.listing.query, "search_cars command");
    filter.apply(state.catalog.cars()).into_iter().cloned().collect()
}

pub fn get_car<B: StorageBackend>(state: &AppState<B>, id: u32) -> Result<Car, ApiError> {
    debug!(car_id = %id, "get_car command");
    Ok(state.catalog.car(id)?.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::notify::LogNotifier;
    use crate::state::ConfigState;
    use storefront_core::catalog::SortBy;
    use storefront_core::{FuelType, Money};
    use storefront_store::MemoryStorage;

    fn app() -> AppState<MemoryStorage> {
        AppState::open(MemoryStorage::new(), ConfigState::default(), Box::new(LogNotifier))
    }

    fn product_names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn car_names(cars: &[Car]) -> Vec<&str> {
        cars.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_search_matches_brand_case_insensitive() {
        let state = app();
        let hits = search_products(&state, "apple");
        assert_eq!(product_names(&hits), vec!["iPhone Air", "MacBook Air 13"]);
        assert_eq!(search_products(&state, "  ").len(), state.catalog.products().len());
    }

    #[test]
    fn test_browse_category_price_range_desc() {
        let state = app();
        let filter = ProductFilter::default()
            .sorted_by(SortBy::PriceDesc)
            .price_range(Some(Money::from_cents(50000)), Some(Money::from_cents(100000)));

        let page = browse_category(&state, "smartphones", filter).unwrap();
        assert_eq!(page.category.name, "Smartphones");
        assert_eq!(product_names(&page.products), vec!["iPhone Air", "Galaxy Nova 12"]);
    }

    #[test]
    fn test_browse_unknown_category() {
        let state = app();
        let err = browse_category(&state, "toys", ProductFilter::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_product_detail_discount() {
        let state = app();
        let detail = get_product(&state, 6).unwrap();
        assert_eq!(detail.discount_percent, Some(20));
        assert_eq!(detail.formatted_price, "$199.99");
    }

    #[test]
    fn test_search_cars_filters() {
        let state = app();
        let filter = CarFilter {
            fuel_type: Some(FuelType::Petrol),
            available_only: true,
            ..Default::default()
        };
        let cars = search_cars(&state, &filter);
        assert_eq!(car_names(&cars), vec!["BMW 5 Series", "Ford Explorer"]);

        assert_eq!(get_car(&state, 99).unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_category_counts() {
        let state = app();
        let counts: Vec<(String, usize)> = list_categories(&state)
            .into_iter()
            .map(|c| (c.category.slug, c.product_count))
            .collect();
        assert!(counts.contains(&("smartphones".to_string(), 3)));
        assert!(counts.contains(&("audio".to_string(), 2)));
    }
}
