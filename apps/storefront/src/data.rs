//! # Demo Catalog
//!
//! The static product, category and car listings the storefront browses.
//!
//! Loaded once at startup and never mutated. Stores copy what they need out
//! of these entries, so the catalog can be swapped without touching saved
//! carts or bookings.

use storefront_core::{
    Car, Category, CoreError, CoreResult, FuelType, Money, Product, ProductVariant, Transmission,
    VariantKind,
};

/// Read-only catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    cars: Vec<Car>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>, cars: Vec<Car>) -> Self {
        Catalog {
            products,
            categories,
            cars,
        }
    }

    /// The built-in demo listings.
    pub fn demo() -> Self {
        Catalog::new(demo_products(), demo_categories(), demo_cars())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn product(&self, id: u32) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))
    }

    pub fn car(&self, id: u32) -> CoreResult<&Car> {
        self.cars
            .iter()
            .find(|c| c.id == id)
            .ok_or(CoreError::CarNotFound(id))
    }

    pub fn category(&self, slug: &str) -> CoreResult<&Category> {
        self.categories
            .iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| CoreError::CategoryNotFound(slug.to_string()))
    }

    /// Number of products filed under `slug`.
    pub fn product_count(&self, slug: &str) -> usize {
        self.products.iter().filter(|p| p.category_slug == slug).count()
    }
}

// =============================================================================
// Demo Data
// =============================================================================

fn dollars(major: i64, minor: i64) -> Money {
    Money::from_major_minor(major, minor)
}

fn category(id: u32, name: &str, slug: &str, description: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
        description: Some(description.to_string()),
        parent_id: None,
    }
}

fn variant(kind: VariantKind, value: &str, price: Option<Money>) -> ProductVariant {
    ProductVariant {
        id: value.to_lowercase().replace(' ', "-"),
        name: value.to_string(),
        kind,
        value: value.to_string(),
        price,
        in_stock: true,
    }
}

fn demo_categories() -> Vec<Category> {
    vec![
        category(1, "Smartphones", "smartphones", "Latest phones from top brands"),
        category(2, "Laptops", "laptops", "Work and gaming notebooks"),
        category(3, "Audio", "audio", "Headphones, earbuds and speakers"),
        category(4, "Wearables", "wearables", "Smartwatches and fitness trackers"),
    ]
}

struct ProductSeed {
    id: u32,
    name: &'static str,
    description: &'static str,
    price: Money,
    original_price: Option<Money>,
    category: &'static str,
    slug: &'static str,
    brand: &'static str,
    rating: f32,
    review_count: u32,
    in_stock: bool,
    featured: bool,
}

impl ProductSeed {
    fn build(self, variants: Vec<ProductVariant>) -> Product {
        Product {
            id: self.id,
            name: self.name.to_string(),
            description: self.description.to_string(),
            price: self.price,
            original_price: self.original_price,
            image: format!("/images/products/{}.jpg", self.id),
            category: self.category.to_string(),
            category_slug: self.slug.to_string(),
            brand: self.brand.to_string(),
            rating: self.rating,
            review_count: self.review_count,
            in_stock: self.in_stock,
            variants,
            featured: self.featured,
        }
    }
}

fn demo_products() -> Vec<Product> {
    use VariantKind::{Color, Memory, Size, Storage};

    vec![
        ProductSeed {
            id: 1,
            name: "Galaxy Nova 12",
            description: "6.5-inch AMOLED phone with a triple camera",
            price: dollars(799, 99),
            original_price: Some(dollars(899, 99)),
            category: "Smartphones",
            slug: "smartphones",
            brand: "Samsung",
            rating: 4.6,
            review_count: 1243,
            in_stock: true,
            featured: true,
        }
        .build(vec![
            variant(Color, "Black", None),
            variant(Color, "Silver", None),
            variant(Storage, "256GB", Some(dollars(899, 99))),
        ]),
        ProductSeed {
            id: 2,
            name: "iPhone Air",
            description: "Thin and light phone with all-day battery",
            price: dollars(999, 0),
            original_price: None,
            category: "Smartphones",
            slug: "smartphones",
            brand: "Apple",
            rating: 4.8,
            review_count: 2310,
            in_stock: true,
            featured: true,
        }
        .build(vec![variant(Color, "Blue", None), variant(Color, "White", None)]),
        ProductSeed {
            id: 3,
            name: "Pixel Budget 8a",
            description: "Clean Android at a sensible price",
            price: dollars(499, 0),
            original_price: Some(dollars(549, 0)),
            category: "Smartphones",
            slug: "smartphones",
            brand: "Google",
            rating: 4.4,
            review_count: 587,
            in_stock: false,
            featured: false,
        }
        .build(Vec::new()),
        ProductSeed {
            id: 4,
            name: "ZenBook Pro 14",
            description: "OLED ultrabook for creators",
            price: dollars(1499, 0),
            original_price: Some(dollars(1699, 0)),
            category: "Laptops",
            slug: "laptops",
            brand: "Asus",
            rating: 4.5,
            review_count: 312,
            in_stock: true,
            featured: true,
        }
        .build(vec![
            variant(Memory, "16GB", None),
            variant(Memory, "32GB", Some(dollars(1799, 0))),
        ]),
        ProductSeed {
            id: 5,
            name: "MacBook Air 13",
            description: "Fanless laptop with an all-day battery",
            price: dollars(1099, 0),
            original_price: None,
            category: "Laptops",
            slug: "laptops",
            brand: "Apple",
            rating: 4.9,
            review_count: 1876,
            in_stock: true,
            featured: false,
        }
        .build(vec![variant(Color, "Midnight", None), variant(Color, "Starlight", None)]),
        ProductSeed {
            id: 6,
            name: "Wireless Headphones",
            description: "Over-ear noise cancelling headphones",
            price: dollars(199, 99),
            original_price: Some(dollars(249, 99)),
            category: "Audio",
            slug: "audio",
            brand: "AudioTech",
            rating: 4.5,
            review_count: 964,
            in_stock: true,
            featured: true,
        }
        .build(vec![variant(Color, "Black", None), variant(Color, "Silver", None)]),
        ProductSeed {
            id: 7,
            name: "Bluetooth Speaker Mini",
            description: "Waterproof pocket speaker",
            price: dollars(49, 99),
            original_price: None,
            category: "Audio",
            slug: "audio",
            brand: "SoundWave",
            rating: 4.1,
            review_count: 421,
            in_stock: true,
            featured: false,
        }
        .build(Vec::new()),
        ProductSeed {
            id: 8,
            name: "Fitness Watch 5",
            description: "GPS smartwatch with heart-rate tracking",
            price: dollars(299, 0),
            original_price: Some(dollars(349, 0)),
            category: "Wearables",
            slug: "wearables",
            brand: "Garmin",
            rating: 4.7,
            review_count: 655,
            in_stock: true,
            featured: false,
        }
        .build(vec![
            variant(Size, "S", None),
            variant(Size, "M", None),
            variant(Size, "L", None),
            variant(Color, "Graphite", None),
        ]),
    ]
}

struct CarSeed {
    id: u32,
    brand: &'static str,
    model: &'static str,
    year: u16,
    per_day: Money,
    per_hour: Money,
    category: &'static str,
    slug: &'static str,
    fuel_type: FuelType,
    transmission: Transmission,
    seats: u8,
    rating: f32,
    available: bool,
    location: &'static str,
    featured: bool,
}

impl CarSeed {
    fn build(self) -> Car {
        Car {
            id: self.id,
            name: format!("{} {}", self.brand, self.model),
            brand: self.brand.to_string(),
            model: self.model.to_string(),
            year: self.year,
            price_per_day: self.per_day,
            price_per_hour: self.per_hour,
            image: format!("/images/cars/{}.jpg", self.id),
            category: self.category.to_string(),
            category_slug: self.slug.to_string(),
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            seating_capacity: self.seats,
            rating: self.rating,
            available: self.available,
            location: self.location.to_string(),
            featured: self.featured,
        }
    }
}

fn demo_cars() -> Vec<Car> {
    vec![
        CarSeed {
            id: 1,
            brand: "Toyota",
            model: "Camry",
            year: 2023,
            per_day: dollars(45, 0),
            per_hour: dollars(8, 0),
            category: "Sedan",
            slug: "sedan",
            fuel_type: FuelType::Hybrid,
            transmission: Transmission::Automatic,
            seats: 5,
            rating: 4.6,
            available: true,
            location: "Downtown",
            featured: true,
        }
        .build(),
        CarSeed {
            id: 2,
            brand: "Tesla",
            model: "Model 3",
            year: 2024,
            per_day: dollars(89, 0),
            per_hour: dollars(15, 0),
            category: "Electric",
            slug: "electric",
            fuel_type: FuelType::Electric,
            transmission: Transmission::Automatic,
            seats: 5,
            rating: 4.9,
            available: true,
            location: "Airport",
            featured: true,
        }
        .build(),
        CarSeed {
            id: 3,
            brand: "Ford",
            model: "Explorer",
            year: 2022,
            per_day: dollars(75, 0),
            per_hour: dollars(12, 50),
            category: "SUV",
            slug: "suv",
            fuel_type: FuelType::Petrol,
            transmission: Transmission::Automatic,
            seats: 7,
            rating: 4.3,
            available: true,
            location: "Downtown",
            featured: false,
        }
        .build(),
        CarSeed {
            id: 4,
            brand: "Volkswagen",
            model: "Golf",
            year: 2021,
            per_day: dollars(35, 0),
            per_hour: dollars(6, 0),
            category: "Compact",
            slug: "compact",
            fuel_type: FuelType::Diesel,
            transmission: Transmission::Manual,
            seats: 5,
            rating: 4.2,
            available: false,
            location: "Train Station",
            featured: false,
        }
        .build(),
        CarSeed {
            id: 5,
            brand: "BMW",
            model: "5 Series",
            year: 2024,
            per_day: dollars(120, 0),
            per_hour: dollars(20, 0),
            category: "Luxury",
            slug: "luxury",
            fuel_type: FuelType::Petrol,
            transmission: Transmission::Automatic,
            seats: 5,
            rating: 4.8,
            available: true,
            location: "Airport",
            featured: true,
        }
        .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_ids_are_unique() {
        let catalog = Catalog::demo();

        let mut product_ids: Vec<u32> = catalog.products().iter().map(|p| p.id).collect();
        product_ids.sort_unstable();
        product_ids.dedup();
        assert_eq!(product_ids.len(), catalog.products().len());

        let mut car_ids: Vec<u32> = catalog.cars().iter().map(|c| c.id).collect();
        car_ids.sort_unstable();
        car_ids.dedup();
        assert_eq!(car_ids.len(), catalog.cars().len());
    }

    #[test]
    fn test_every_product_has_a_known_category() {
        let catalog = Catalog::demo();
        for product in catalog.products() {
            assert!(
                catalog.category(&product.category_slug).is_ok(),
                "{} has unknown category {}",
                product.name,
                product.category_slug
            );
        }
    }

    #[test]
    fn test_lookups() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.product(6).unwrap().name, "Wireless Headphones");
        assert_eq!(catalog.car(2).unwrap().name, "Tesla Model 3");
        assert!(matches!(catalog.product(99), Err(CoreError::ProductNotFound(99))));
        assert!(matches!(catalog.car(99), Err(CoreError::CarNotFound(99))));
        assert!(matches!(
            catalog.category("toys"),
            Err(CoreError::CategoryNotFound(_))
        ));
        assert_eq!(catalog.product_count("audio"), 2);
    }
}
