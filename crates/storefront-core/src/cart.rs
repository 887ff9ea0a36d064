//! # Cart Store
//!
//! The shopping cart of the electronics storefront.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller Action            Cart Method              Line Change          │
//! │  ─────────────            ───────────              ───────────          │
//! │                                                                         │
//! │  Add to cart ───────────► add_item() ────────────► merge by (id,        │
//! │                                                    variant, size) or    │
//! │                                                    append               │
//! │  +/- buttons ───────────► update_quantity() ─────► set qty, ≤0 removes  │
//! │                                                                         │
//! │  Remove ────────────────► remove_item() ─────────► drop every line of id│
//! │                                                                         │
//! │  Clear cart ────────────► clear() ───────────────► no lines             │
//! │                                                                         │
//! │  Badge count ───────────► get_item_quantity() ───► (read only)          │
//! │                                                                         │
//! │  EVERY mutation ends with recompute(): totals are never patched.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Matching Keys
//! Insertion merges on the composite key `(id, variant, size)`, so the same
//! product in two colors is two lines. The product-level operations
//! (`remove_item`, `update_quantity`, `get_item_quantity`) match on the
//! product id alone and therefore touch every line of that product. The
//! `*_line` operations take a [`LineKey`] and touch exactly one line.
//!
//! ## Invariants
//! - Every stored line has `quantity >= 1`
//! - `total_items == Σ quantity`, `total_price == Σ price × quantity`
//! - No operation fails; inputs are not validated (garbage in, garbage out)

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, TaxRate};

// =============================================================================
// Line Items
// =============================================================================

/// What a caller hands to [`Cart::add_item`]: a cart line without a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewCartItem {
    pub id: u32,
    pub name: String,
    pub price: Money,
    pub image: String,
    pub variant: Option<String>,
    pub size: Option<String>,
}

impl NewCartItem {
    /// A plain item with no variant or size.
    pub fn new(id: u32, name: impl Into<String>, price: Money, image: impl Into<String>) -> Self {
        NewCartItem {
            id,
            name: name.into(),
            price,
            image: image.into(),
            variant: None,
            size: None,
        }
    }

    /// Snapshot of a catalog product.
    ///
    /// ## Price Freezing
    /// The price is copied now; later catalog changes do not reach the line.
    pub fn from_product(product: &Product) -> Self {
        NewCartItem::new(product.id, &product.name, product.price, &product.image)
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Overrides the frozen price (variants with their own price).
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = price;
        self
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            id: self.id,
            variant: self.variant.clone(),
            size: self.size.clone(),
        }
    }
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    pub id: u32,
    pub name: String,
    /// Unit price frozen when the line was created.
    pub price: Money,
    pub image: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartItem {
    fn from_new(item: NewCartItem, quantity: i64) -> Self {
        CartItem {
            id: item.id,
            name: item.name,
            price: item.price,
            image: item.image,
            quantity,
            variant: item.variant,
            size: item.size,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            id: self.id,
            variant: self.variant.clone(),
            size: self.size.clone(),
        }
    }

    /// Composite-key comparison without allocating a [`LineKey`].
    pub fn matches(&self, key: &LineKey) -> bool {
        self.id == key.id && self.variant == key.variant && self.size == key.size
    }
}

/// Identity of a cart line: product id plus the chosen variant and size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineKey {
    pub id: u32,
    pub variant: Option<String>,
    pub size: Option<String>,
}

impl LineKey {
    pub fn product(id: u32) -> Self {
        LineKey {
            id,
            variant: None,
            size: None,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart store.
///
/// Totals are private and only written by `recompute`. A
/// deserialized cart recomputes them too, so a hand-edited snapshot cannot
/// smuggle in totals that disagree with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CartSnapshot")]
pub struct Cart {
    items: Vec<CartItem>,
    total_items: i64,
    total_price: Money,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            total_items: 0,
            total_price: Money::zero(),
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Σ quantity over all lines.
    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    /// Σ price × quantity over all lines.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` of an item, merging into an existing line with the
    /// same `(id, variant, size)`.
    ///
    /// No upper bound and no validation: a zero or negative quantity is
    /// applied as given, and a line that drops below 1 is removed. Counts and
    /// totals saturate instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::cart::{Cart, NewCartItem};
    /// use storefront_core::money::Money;
    ///
    /// let mut cart = Cart::new();
    /// let shirt = NewCartItem::new(7, "Tee", Money::from_cents(1500), "");
    ///
    /// cart.add_item(shirt.clone().with_size("M"), 1);
    /// cart.add_item(shirt.clone().with_size("L"), 1);
    /// cart.add_item(shirt.with_size("M"), 2);
    ///
    /// assert_eq!(cart.items().len(), 2);
    /// assert_eq!(cart.total_items(), 4);
    /// ```
    pub fn add_item(&mut self, item: NewCartItem, quantity: i64) {
        let key = item.key();
        match self.items.iter_mut().find(|line| line.matches(&key)) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.items.push(CartItem::from_new(item, quantity)),
        }
        self.recompute();
    }

    /// Removes every line of product `id`, whatever its variant or size.
    pub fn remove_item(&mut self, id: u32) {
        self.items.retain(|line| line.id != id);
        self.recompute();
    }

    /// Sets the quantity of every line of product `id`.
    ///
    /// `quantity <= 0` behaves exactly like [`Cart::remove_item`].
    pub fn update_quantity(&mut self, id: u32, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        for line in self.items.iter_mut().filter(|line| line.id == id) {
            line.quantity = quantity;
        }
        self.recompute();
    }

    /// Removes the single line matching `key`.
    pub fn remove_line(&mut self, key: &LineKey) {
        self.items.retain(|line| !line.matches(key));
        self.recompute();
    }

    /// Sets the quantity of the single line matching `key`; `<= 0` removes it.
    pub fn update_line_quantity(&mut self, key: &LineKey, quantity: i64) {
        if quantity <= 0 {
            self.remove_line(key);
            return;
        }

        if let Some(line) = self.items.iter_mut().find(|line| line.matches(key)) {
            line.quantity = quantity;
        }
        self.recompute();
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    /// Units of product `id` in the cart across all its lines, 0 if absent.
    pub fn get_item_quantity(&self, id: u32) -> i64 {
        self.items
            .iter()
            .filter(|line| line.id == id)
            .fold(0, |total, line| total.saturating_add(line.quantity))
    }

    /// Quantity of exactly the line matching `key`, 0 if absent.
    pub fn line_quantity(&self, key: &LineKey) -> i64 {
        self.items
            .iter()
            .find(|line| line.matches(key))
            .map_or(0, |line| line.quantity)
    }

    /// Re-derives both totals from the lines.
    ///
    /// Also drops lines whose quantity fell below 1 (e.g. `add_item` with a
    /// negative amount), which keeps the `quantity >= 1` invariant.
    fn recompute(&mut self) {
        self.items.retain(|line| line.quantity >= 1);
        self.total_items = self
            .items
            .iter()
            .fold(0, |total: i64, line| total.saturating_add(line.quantity));
        self.total_price = self.items.iter().map(CartItem::line_total).sum();
    }
}

/// Wire shape of a persisted cart; totals in it are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartSnapshot {
    #[serde(default)]
    items: Vec<CartItem>,
}

impl From<CartSnapshot> for Cart {
    fn from(snapshot: CartSnapshot) -> Self {
        let mut cart = Cart {
            items: snapshot.items,
            total_items: 0,
            total_price: Money::zero(),
        };
        cart.recompute();
        cart
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Checkout totals shown next to the cart.
///
/// ## Layout
/// ```text
/// ┌──────────────────────────────────────────┐
/// │  Subtotal (3 items)             $649.97  │
/// │  Shipping                          Free  │
/// │  Tax                             $52.00  │
/// │  ────────────────────────────────────    │
/// │  Total                          $701.97  │
/// └──────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    pub item_count: i64,
    pub subtotal: Money,
    /// Shipping is always free in the demo store.
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    pub fn for_cart(cart: &Cart, tax_rate: TaxRate) -> Self {
        let subtotal = cart.total_price();
        let tax = subtotal.calculate_tax(tax_rate);
        let shipping = Money::zero();
        OrderSummary {
            item_count: cart.total_items(),
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, cents: i64) -> NewCartItem {
        NewCartItem::new(id, format!("Product {}", id), Money::from_cents(cents), "")
    }

    fn assert_totals_consistent(cart: &Cart) {
        let qty: i64 = cart.items().iter().map(|l| l.quantity).sum();
        let price: i64 = cart.items().iter().map(|l| l.price.cents() * l.quantity).sum();
        assert_eq!(cart.total_items(), qty);
        assert_eq!(cart.total_price().cents(), price);
        assert!(cart.items().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_add_same_item_twice_merges() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 1000), 1);
        cart.add_item(item(1, 1000), 1);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price().cents(), 2000);

        cart.remove_item(1);
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Money::zero());
    }

    #[test]
    fn test_add_quantities_accumulate() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 250), 3);
        cart.add_item(item(1, 250), 4);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 7);
        assert_eq!(cart.total_price().cents(), 1750);
    }

    #[test]
    fn test_variant_and_size_make_distinct_lines() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 1000).with_variant("Black"), 1);
        cart.add_item(item(1, 1000).with_variant("Silver"), 1);
        cart.add_item(item(1, 1000).with_variant("Black").with_size("L"), 1);
        cart.add_item(item(1, 1000), 1);

        assert_eq!(cart.items().len(), 4);
        assert_eq!(cart.total_items(), 4);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_totals_hold_after_every_mutation() {
        let mut cart = Cart::new();
        let steps: Vec<Box<dyn Fn(&mut Cart)>> = vec![
            Box::new(|c: &mut Cart| c.add_item(item(1, 999), 2)),
            Box::new(|c: &mut Cart| c.add_item(item(2, 4999).with_size("XL"), 1)),
            Box::new(|c: &mut Cart| c.add_item(item(2, 4999).with_size("S"), 3)),
            Box::new(|c: &mut Cart| c.update_quantity(1, 5)),
            Box::new(|c: &mut Cart| c.add_item(item(3, 0), 10)),
            Box::new(|c: &mut Cart| c.remove_line(&LineKey {
                id: 2,
                variant: None,
                size: Some("S".into()),
            })),
            Box::new(|c: &mut Cart| c.update_quantity(3, -1)),
        ];

        for step in steps {
            step(&mut cart);
            assert_totals_consistent(&cart);
        }

        assert_eq!(cart.total_items(), 6);
        assert_eq!(cart.total_price().cents(), 999 * 5 + 4999);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        for qty in [0, -5] {
            let mut cart = Cart::new();
            cart.add_item(item(1, 500), 2);
            cart.add_item(item(2, 300), 1);

            cart.update_quantity(1, qty);

            assert_eq!(cart.items().len(), 1);
            assert_eq!(cart.get_item_quantity(1), 0);
            assert_eq!(cart.total_items(), 1);
            assert_eq!(cart.total_price().cents(), 300);
        }
    }

    #[test]
    fn test_product_level_ops_touch_every_variant() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 100).with_variant("Red"), 1);
        cart.add_item(item(1, 100).with_variant("Blue"), 2);
        cart.add_item(item(2, 100), 1);

        cart.update_quantity(1, 4);
        assert_eq!(cart.get_item_quantity(1), 8);

        cart.remove_item(1);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].id, 2);
    }

    #[test]
    fn test_line_ops_touch_one_line() {
        let mut cart = Cart::new();
        let red = item(1, 100).with_variant("Red");
        let blue = item(1, 100).with_variant("Blue");
        cart.add_item(red.clone(), 1);
        cart.add_item(blue.clone(), 2);

        cart.update_line_quantity(&red.key(), 6);
        assert_eq!(cart.line_quantity(&red.key()), 6);
        assert_eq!(cart.line_quantity(&blue.key()), 2);

        cart.remove_line(&blue.key());
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 6);

        cart.update_line_quantity(&red.key(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 100), 1);

        cart.remove_item(42);
        cart.update_quantity(42, 3);
        cart.update_line_quantity(&LineKey::product(42), 3);

        assert_eq!(cart.get_item_quantity(42), 0);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_clear_always_zeroes() {
        let mut cart = Cart::new();
        cart.clear();
        assert!(cart.is_empty());

        cart.add_item(item(1, 100), 3);
        cart.add_item(item(2, 200).with_size("M"), 1);
        cart.clear();

        assert!(cart.items().is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Money::zero());
    }

    #[test]
    fn test_negative_prices_are_accepted() {
        let mut cart = Cart::new();
        cart.add_item(item(1, -500), 2);

        assert_eq!(cart.total_price().cents(), -1000);
    }

    #[test]
    fn test_add_zero_creates_no_line() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 1000), 0);
        cart.add_item(item(2, 1000), -2);

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Money::zero());
    }

    #[test]
    fn test_add_negative_to_existing_line() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 1000), 3);
        cart.add_item(item(2, 500), 1);

        cart.add_item(item(1, 1000), -1);
        assert_eq!(cart.get_item_quantity(1), 2);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price().cents(), 2500);
        assert_totals_consistent(&cart);

        cart.add_item(item(1, 1000), 1);
        assert_eq!(cart.get_item_quantity(1), 3);
        cart.add_item(item(1, 1000), -5);
        assert_eq!(cart.get_item_quantity(1), 0);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price().cents(), 500);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 79999), 200_000_000_000_000);
        assert_eq!(cart.total_items(), 200_000_000_000_000);
        assert_eq!(cart.total_price().cents(), i64::MAX);

        cart.add_item(item(2, 0), i64::MAX);
        cart.add_item(item(2, 0), 1);
        assert_eq!(cart.get_item_quantity(2), i64::MAX);
        assert_eq!(cart.total_items(), i64::MAX);

        cart.remove_item(1);
        cart.remove_item(2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_snapshot_with_huge_quantity_loads() {
        let json = r#"{"items": [{"id": 1, "name": "A", "price": 79999, "image": "", "quantity": 9000000000000000000}]}"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.total_items(), 9_000_000_000_000_000_000);
        assert_eq!(cart.total_price().cents(), i64::MAX);
    }

    #[test]
    fn test_snapshot_totals_are_recomputed_on_load() {
        let json = r#"{
            "items": [{"id": 1, "name": "A", "price": 1000, "image": "", "quantity": 3}],
            "totalItems": 99,
            "totalPrice": 1
        }"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price().cents(), 3000);
    }

    #[test]
    fn test_snapshot_field_names() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 1000).with_size("M"), 2);
        let json = serde_json::to_value(&cart).unwrap();

        assert_eq!(json["totalItems"], 2);
        assert_eq!(json["totalPrice"], 2000);
        assert_eq!(json["items"][0]["size"], "M");
        assert!(json["items"][0].get("variant").is_none());
    }

    #[test]
    fn test_order_summary() {
        let mut cart = Cart::new();
        cart.add_item(item(1, 10000), 1);

        let summary = OrderSummary::for_cart(&cart, TaxRate::from_bps(800));

        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.subtotal.cents(), 10000);
        assert!(summary.shipping.is_zero());
        assert_eq!(summary.tax.cents(), 800);
        assert_eq!(summary.total.cents(), 10800);
    }
}
