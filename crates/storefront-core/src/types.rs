//! # Domain Types
//!
//! Catalog entities shared by both storefronts.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  Electronics shop                     Car rental                        │
//! │  ┌─────────────────┐                  ┌─────────────────┐               │
//! │  │    Product      │                  │      Car        │               │
//! │  │  ─────────────  │                  │  ─────────────  │               │
//! │  │  id, name       │                  │  id, name       │               │
//! │  │  price          │                  │  price_per_day  │               │
//! │  │  category_slug  │                  │  price_per_hour │               │
//! │  │  variants[] ────┼──► ProductVariant│  fuel_type      │               │
//! │  └─────────────────┘                  │  transmission   │               │
//! │  ┌─────────────────┐                  └─────────────────┘               │
//! │  │    Category     │                                                    │
//! │  │  slug, parent   │   TaxRate: basis points, 800 = 8%                  │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is static for the lifetime of the process. Stores copy the
//! fields they need (name, price, image) into their own lines, so a cart
//! line never points back into the catalog.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points (1 bps = 0.01%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Rate as a percentage, for display only.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Products
// =============================================================================

/// A product in the electronics catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: Money,
    /// Pre-discount price, shown struck through.
    pub original_price: Option<Money>,
    pub image: String,
    /// Display name of the category.
    pub category: String,
    pub category_slug: String,
    pub brand: String,
    /// Average review score, 0.0 - 5.0.
    pub rating: f32,
    pub review_count: u32,
    pub in_stock: bool,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Finds a variant of the given kind by its value (e.g. color "Black").
    pub fn variant(&self, kind: VariantKind, value: &str) -> Option<&ProductVariant> {
        self.variants
            .iter()
            .find(|v| v.kind == kind && v.value.eq_ignore_ascii_case(value))
    }

    /// Whole-percent discount against `original_price`, if any.
    pub fn discount_percent(&self) -> Option<i64> {
        let original = self.original_price?;
        if original.cents() <= 0 {
            return None;
        }
        let saved = (original - self.price).cents();
        Some((saved * 100 + original.cents() / 2) / original.cents())
    }
}

/// What a product variant varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum VariantKind {
    Color,
    Size,
    Storage,
    Memory,
}

/// One selectable option of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductVariant {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariantKind,
    pub value: String,
    /// Overrides the product price when set.
    pub price: Option<Money>,
    pub in_stock: bool,
}

/// A browsable product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<u32>,
}

// =============================================================================
// Cars
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Transmission {
    Manual,
    Automatic,
}

/// A car in the rental fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Car {
    pub id: u32,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub price_per_day: Money,
    pub price_per_hour: Money,
    pub image: String,
    pub category: String,
    pub category_slug: String,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub seating_capacity: u8,
    pub rating: f32,
    pub available: bool,
    pub location: String,
    #[serde(default)]
    pub featured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headphones() -> Product {
        Product {
            id: 1,
            name: "Wireless Headphones".into(),
            description: "Noise cancelling".into(),
            price: Money::from_cents(19999),
            original_price: Some(Money::from_cents(24999)),
            image: String::new(),
            category: "Audio".into(),
            category_slug: "audio".into(),
            brand: "AudioTech".into(),
            rating: 4.5,
            review_count: 10,
            in_stock: true,
            variants: vec![ProductVariant {
                id: "black".into(),
                name: "Black".into(),
                kind: VariantKind::Color,
                value: "Black".into(),
                price: None,
                in_stock: true,
            }],
            featured: false,
        }
    }

    #[test]
    fn test_tax_rate_default_is_eight_percent() {
        let rate = TaxRate::default();
        assert_eq!(rate.bps(), 800);
        assert!((rate.percentage() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_variant_lookup_is_case_insensitive() {
        let product = headphones();
        assert!(product.variant(VariantKind::Color, "black").is_some());
        assert!(product.variant(VariantKind::Size, "Black").is_none());
        assert!(product.variant(VariantKind::Color, "Purple").is_none());
    }

    #[test]
    fn test_discount_percent() {
        // 50.00 off 249.99 → 20%
        assert_eq!(headphones().discount_percent(), Some(20));

        let mut full_price = headphones();
        full_price.original_price = None;
        assert_eq!(full_price.discount_percent(), None);
    }

    #[test]
    fn test_variant_kind_serializes_as_type() {
        let json = serde_json::to_value(&headphones().variants[0]).unwrap();
        assert_eq!(json["type"], "color");
        assert_eq!(json["inStock"], true);
    }
}
