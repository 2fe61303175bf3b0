//! Integration tests for Apteka.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p apteka-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart operations and persistence round-trips
//! - `checkout_flow` - Order form validation and order history
//!
//! The crate itself only provides the shared catalog fixture; the
//! flows live under `tests/`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use rust_decimal::Decimal;

use apteka_core::{Price, ProductId};
use apteka_storefront::catalog::{Catalog, Product};

/// A product with only the fields every test cares about.
#[must_use]
pub fn product(
    id: i32,
    name: &str,
    price: i64,
    in_stock: bool,
    prescription: bool,
    category: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Price::rub(Decimal::from(price)),
        in_stock,
        prescription,
        category: category.to_owned(),
        description: format!("{name} description"),
        form: None,
        pack_size: None,
        active_substance: None,
        manufacturer: None,
        dosage: None,
        contraindications: None,
        side_effects: None,
        storage_conditions: None,
        shelf_life: None,
        atc_code: None,
    }
}

/// The fixed catalog the integration flows run against.
#[must_use]
pub fn sample_catalog() -> Catalog {
    Catalog::from_products(vec![
        product(7, "Paracetamol", 150, true, false, "painkillers"),
        product(8, "Amoxicillin", 320, true, true, "antibiotics"),
        product(9, "Ibuprofen", 210, false, false, "painkillers"),
        product(10, "Vitamin C", 95, true, false, "vitamins"),
        product(11, "Insulin", 1500, true, true, "diabetes"),
    ])
}
