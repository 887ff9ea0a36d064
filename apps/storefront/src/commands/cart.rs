//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│ Summary  │                         │
//! │  │  Cart    │     │          │     │ (8% tax) │                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │       ▲                │                                                │
//! │       │           add_to_cart                                           │
//! │       │           update_cart_item                                      │
//! │       │           remove_from_cart                                      │
//! │       │                │                                                │
//! │       └─── clear_cart ─┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use storefront_core::{
    Cart, CartItem, CoreError, LineKey, Money, NewCartItem, OrderSummary, Product, ProductVariant,
    VariantKind, DEFAULT_ADD_QUANTITY,
};
use storefront_core::validation::validate_quantity;
use storefront_store::StorageBackend;
use tracing::debug;

use crate::error::ApiError;
use crate::notify::Toast;
use crate::state::{AppState, ConfigState};

// =============================================================================
// Request / Response Types
// =============================================================================

/// Cart contents plus derived totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub total_items: i64,
    pub total_price: Money,
    /// `total_price` in the configured currency.
    pub formatted_total: String,
}

impl CartResponse {
    fn new(cart: &Cart, config: &ConfigState) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            formatted_total: config.format_money(cart.total_price()),
        }
    }
}

/// The order summary box next to the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: OrderSummary,
    pub tax_rate_percent: f64,
    pub subtotal: String,
    /// "Free" when shipping is zero.
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

/// What to add.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: u32,
    /// Defaults to 1.
    pub quantity: Option<i64>,
    /// Color, storage or memory option value.
    pub variant: Option<String>,
    pub size: Option<String>,
}

/// Which line(s) an update or removal targets.
///
/// With neither `variant` nor `size`, every line of the product is hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSelector {
    pub product_id: u32,
    pub variant: Option<String>,
    pub size: Option<String>,
}

impl LineSelector {
    pub fn product(product_id: u32) -> Self {
        LineSelector {
            product_id,
            ..Default::default()
        }
    }

    fn line_key(&self) -> Option<LineKey> {
        if self.variant.is_none() && self.size.is_none() {
            return None;
        }
        Some(LineKey {
            id: self.product_id,
            variant: self.variant.clone(),
            size: self.size.clone(),
        })
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the current cart contents.
pub fn get_cart<B: StorageBackend>(state: &AppState<B>) -> CartResponse {
    debug!("get_cart command");
    state.cart.with_cart(|c| CartResponse::new(c, &state.config))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Same product, variant and size already in cart: quantity increases
/// - Otherwise a new line is added
/// - Price is frozen at the time of adding; a variant price overrides the
///   product price
///
/// ## Errors
/// - `NOT_FOUND`: unknown product, variant or size
/// - `VALIDATION_ERROR`: quantity below 1
/// - `CART_ERROR`: product or variant out of stock
pub fn add_to_cart<B: StorageBackend>(
    state: &mut AppState<B>,
    request: AddToCartRequest,
) -> Result<CartResponse, ApiError> {
    let quantity = request.quantity.unwrap_or(DEFAULT_ADD_QUANTITY);
    debug!(product_id = %request.product_id, quantity = %quantity, "add_to_cart command");

    validate_quantity(quantity)?;

    let product = state.catalog.product(request.product_id)?;
    if !product.in_stock {
        return Err(ApiError::cart(format!("{} is out of stock", product.name)));
    }

    let mut item = NewCartItem::from_product(product);

    if let Some(value) = request.variant.as_deref() {
        let option = find_option(product, value)?;
        ensure_in_stock(product, option)?;
        item = item.with_variant(option.value.clone());
        if let Some(price) = option.price {
            item = item.with_price(price);
        }
    }

    if let Some(value) = request.size.as_deref() {
        let size = product
            .variant(VariantKind::Size, value)
            .ok_or_else(|| variant_not_found(product, value))?;
        ensure_in_stock(product, size)?;
        item = item.with_size(size.value.clone());
    }

    let name = product.name.clone();
    let response = {
        let config = &state.config;
        state.cart.with_cart_mut(|c| {
            c.add_item(item, quantity);
            CartResponse::new(c, config)
        })
    };

    state.notify(Toast::success(
        "Added to cart",
        format!("{} {}(s) added to your cart.", quantity, name),
    ));

    Ok(response)
}

/// Sets the quantity of a product's lines, or of one exact line.
///
/// ## Behavior
/// - Quantity ≤ 0: removes the targeted line(s)
/// - Product not in cart: no change
pub fn update_cart_item<B: StorageBackend>(
    state: &mut AppState<B>,
    selector: LineSelector,
    quantity: i64,
) -> CartResponse {
    debug!(product_id = %selector.product_id, quantity = %quantity, "update_cart_item command");

    let config = &state.config;
    state.cart.with_cart_mut(|c| {
        match selector.line_key() {
            Some(key) => c.update_line_quantity(&key, quantity),
            None => c.update_quantity(selector.product_id, quantity),
        }
        CartResponse::new(c, config)
    })
}

/// Removes a product's lines, or one exact line.
pub fn remove_from_cart<B: StorageBackend>(
    state: &mut AppState<B>,
    selector: LineSelector,
) -> CartResponse {
    debug!(product_id = %selector.product_id, "remove_from_cart command");

    let config = &state.config;
    state.cart.with_cart_mut(|c| {
        match selector.line_key() {
            Some(key) => c.remove_line(&key),
            None => c.remove_item(selector.product_id),
        }
        CartResponse::new(c, config)
    })
}

/// Clears all items from the cart.
pub fn clear_cart<B: StorageBackend>(state: &mut AppState<B>) -> CartResponse {
    debug!("clear_cart command");

    let config = &state.config;
    state.cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::new(c, config)
    })
}

/// Total quantity of a product across all its lines.
pub fn get_item_quantity<B: StorageBackend>(state: &AppState<B>, product_id: u32) -> i64 {
    state.cart.with_cart(|c| c.get_item_quantity(product_id))
}

/// Subtotal, shipping, tax and total for the current cart.
pub fn cart_summary<B: StorageBackend>(state: &AppState<B>) -> SummaryResponse {
    debug!("cart_summary command");

    let config = &state.config;
    let summary = state
        .cart
        .with_cart(|c| OrderSummary::for_cart(c, config.tax_rate()));

    SummaryResponse {
        summary,
        tax_rate_percent: config.tax_rate().percentage(),
        subtotal: config.format_money(summary.subtotal),
        shipping: if summary.shipping.is_zero() {
            "Free".to_string()
        } else {
            config.format_money(summary.shipping)
        },
        tax: config.format_money(summary.tax),
        total: config.format_money(summary.total),
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// A non-size option (color, storage, memory) with this value.
fn find_option<'a>(product: &'a Product, value: &str) -> Result<&'a ProductVariant, CoreError> {
    product
        .variants
        .iter()
        .find(|v| v.kind != VariantKind::Size && v.value.eq_ignore_ascii_case(value))
        .ok_or_else(|| variant_not_found(product, value))
}

fn variant_not_found(product: &Product, value: &str) -> CoreError {
    CoreError::VariantNotFound {
        product_id: product.id,
        value: value.to_string(),
    }
}

fn ensure_in_stock(product: &Product, option: &ProductVariant) -> Result<(), ApiError> {
    if option.in_stock {
        Ok(())
    } else {
        Err(ApiError::cart(format!(
            "{} ({}) is out of stock",
            product.name, option.value
        )))
    }
}
