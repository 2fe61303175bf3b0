//! Product catalog loaded from a static JSON file at startup.
//!
//! The catalog is the external, read-only data source every cart
//! operation resolves product ids against. It is loaded once, held in
//! memory, and never mutated for the lifetime of the process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use apteka_core::{Price, ProductId};

/// Errors that can occur loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("cannot read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The catalog file is not a valid product array.
    #[error("cannot parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A single catalog record.
///
/// The descriptive fields beyond `description` feed the product
/// details view and are optional in the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub in_stock: bool,
    /// Dispensed by prescription only.
    pub prescription: bool,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub pack_size: Option<String>,
    #[serde(default)]
    pub active_substance: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub contraindications: Option<String>,
    #[serde(default)]
    pub side_effects: Option<String>,
    #[serde(default)]
    pub storage_conditions: Option<String>,
    #[serde(default)]
    pub shelf_life: Option<String>,
    #[serde(default)]
    pub atc_code: Option<String>,
}

/// The product catalog: an ordered product list with an id index.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Load the catalog from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or parsed.
    /// A corrupt catalog is fatal to startup, unlike corrupt cart
    /// state: without products there is nothing to sell.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let products: Vec<Product> =
            serde_json::from_str(&text).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(count = products.len(), path = %path.display(), "Loaded catalog");
        Ok(Self::from_products(products))
    }

    /// Build a catalog from an in-memory product list.
    ///
    /// If two products share an id, the first occurrence wins and the
    /// duplicate is dropped with a warning.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut kept = Vec::with_capacity(products.len());
        let mut index = HashMap::with_capacity(products.len());

        for product in products {
            if index.contains_key(&product.id) {
                tracing::warn!(id = %product.id, name = %product.name, "Duplicate product id in catalog, dropping");
                continue;
            }
            index.insert(product.id, kept.len());
            kept.push(product);
        }

        Self {
            products: kept,
            index,
        }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|&i| self.products.get(i))
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products in the given category, in catalog order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// The first `n` products, shown as the featured selection.
    #[must_use]
    pub fn featured(&self, n: usize) -> &[Product] {
        self.products.get(..n.min(self.products.len())).unwrap_or_default()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal::Decimal;

    /// A small fixed catalog shared by unit tests in this crate.
    pub(crate) fn sample_catalog() -> Catalog {
        Catalog::from_products(vec![
            product(7, "Paracetamol", 150, true, false, "painkillers"),
            product(8, "Amoxicillin", 320, true, true, "antibiotics"),
            product(9, "Ibuprofen", 210, false, false, "painkillers"),
            product(10, "Vitamin C", 95, true, false, "vitamins"),
        ])
    }

    pub(crate) fn product(
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

    #[test]
    fn test_get_by_id() {
        let catalog = sample_catalog();
        assert_eq!(catalog.get(ProductId::new(7)).unwrap().name, "Paracetamol");
        assert!(catalog.get(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_in_category_preserves_order() {
        let catalog = sample_catalog();
        let names: Vec<&str> = catalog
            .in_category("painkillers")
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Paracetamol", "Ibuprofen"]);
    }

    #[test]
    fn test_featured_is_prefix() {
        let catalog = sample_catalog();
        assert_eq!(catalog.featured(2).len(), 2);
        assert_eq!(catalog.featured(2)[0].name, "Paracetamol");
        // Asking for more than exists returns everything
        assert_eq!(catalog.featured(100).len(), catalog.len());
    }

    #[test]
    fn test_duplicate_ids_first_wins() {
        let catalog = Catalog::from_products(vec![
            product(1, "First", 100, true, false, "a"),
            product(1, "Second", 200, true, false, "a"),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(ProductId::new(1)).unwrap().name, "First");
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let json = serde_json::to_string(&vec![product(7, "Paracetamol", 150, true, false, "painkillers")])
            .unwrap();
        std::fs::write(&path, json).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        let p = catalog.get(ProductId::new(7)).unwrap();
        assert_eq!(p.price.amount, Decimal::from(150));
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Catalog::load(&path).unwrap_err(),
            CatalogError::Parse { .. }
        ));
    }
}
