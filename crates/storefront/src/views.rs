//! Display read models for presentation adapters.
//!
//! The core never renders; after every mutating operation a
//! presentation adapter (the CLI, a future web layer) re-reads these
//! views. All prices arrive pre-formatted.

use apteka_core::{Price, ProductId};

use crate::cart::CartStore;
use crate::catalog::{Catalog, Product};
use crate::services::cart::total_price_of;
use crate::storage::Storage;

/// Cart line display data.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub prescription: bool,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart display data.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::zero().to_string(),
            item_count: 0,
        }
    }

    /// Build the view of the current cart.
    ///
    /// Lines whose product no longer resolves in the catalog are
    /// skipped, matching how totals treat stale references.
    #[must_use]
    pub fn build<S: Storage>(catalog: &Catalog, store: &CartStore<S>) -> Self {
        let items = store
            .items()
            .iter()
            .filter_map(|line| {
                catalog.get(line.product_id).map(|product| CartLineView {
                    product_id: line.product_id,
                    name: product.name.clone(),
                    category: product.category.clone(),
                    prescription: product.prescription,
                    quantity: line.quantity,
                    unit_price: product.price.to_string(),
                    line_total: product.price.times(line.quantity).to_string(),
                })
            })
            .collect();

        Self {
            items,
            subtotal: total_price_of(catalog, store.items()).to_string(),
            item_count: store.total_item_count(),
        }
    }
}

/// Catalog entry display data, including how many are already in the
/// cart.
#[derive(Debug, Clone)]
pub struct CatalogEntryView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub in_stock: bool,
    pub prescription: bool,
    pub in_cart: u32,
}

impl CatalogEntryView {
    fn from_product<S: Storage>(product: &Product, store: &CartStore<S>) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            in_stock: product.in_stock,
            prescription: product.prescription,
            in_cart: store.quantity_of(product.id),
        }
    }
}

/// The catalog listing, optionally filtered to one category.
#[must_use]
pub fn catalog_view<S: Storage>(
    catalog: &Catalog,
    store: &CartStore<S>,
    category: Option<&str>,
) -> Vec<CatalogEntryView> {
    match category {
        Some(cat) => catalog
            .in_category(cat)
            .map(|p| CatalogEntryView::from_product(p, store))
            .collect(),
        None => catalog
            .products()
            .iter()
            .map(|p| CatalogEntryView::from_product(p, store))
            .collect(),
    }
}
