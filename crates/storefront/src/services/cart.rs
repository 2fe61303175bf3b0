//! Cart operations: add, remove, update, clear, and totals.
//!
//! Every mutation resolves the product against the catalog first,
//! mutates the cart store, and persists before returning, so callers
//! can re-read the store immediately after any operation.

use thiserror::Error;

use apteka_core::{Price, ProductId};

use crate::cart::{CartLine, CartStore};
use crate::catalog::Catalog;
use crate::storage::Storage;

/// A yes/no decision the cart asks its caller for.
///
/// The core never talks to a user directly; confirmation dialogs
/// (prescription check, clearing the cart) are injected as this
/// capability. Closures implement it, so tests pass `&|_: &str| true`.
pub trait Confirmation {
    /// Ask the user to confirm `prompt`; true means proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirmation for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Errors from cart operations. None of these mutate the cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product id has no catalog entry.
    #[error("product {0} is not in the catalog")]
    ProductNotFound(ProductId),

    /// The product exists but is not currently available.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// The prescription confirmation was declined.
    #[error("prescription confirmation declined")]
    PrescriptionDeclined,

    /// A quantity update referenced a product not in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),
}

/// Cart operations over a catalog and a cart store.
pub struct CartService<'a, S: Storage> {
    catalog: &'a Catalog,
    store: &'a mut CartStore<S>,
}

impl<'a, S: Storage> CartService<'a, S> {
    pub fn new(catalog: &'a Catalog, store: &'a mut CartStore<S>) -> Self {
        Self { catalog, store }
    }

    /// Add `quantity` of a product to the cart.
    ///
    /// Prescription products require the caller-supplied confirmation
    /// before anything changes. On success the line is added (or its
    /// quantity incremented) and the cart is persisted.
    ///
    /// # Errors
    ///
    /// [`CartError::ProductNotFound`], [`CartError::OutOfStock`], or
    /// [`CartError::PrescriptionDeclined`]; the cart is unchanged in
    /// every error case.
    pub fn add_item(
        &mut self,
        id: ProductId,
        quantity: u32,
        confirm: &dyn Confirmation,
    ) -> Result<(), CartError> {
        let product = self.catalog.get(id).ok_or(CartError::ProductNotFound(id))?;

        if !product.in_stock {
            return Err(CartError::OutOfStock(product.name.clone()));
        }

        if product.prescription {
            let prompt = format!(
                "{} is dispensed by prescription only. Do you have a prescription?",
                product.name
            );
            if !confirm.confirm(&prompt) {
                tracing::info!(id = %id, "Prescription confirmation declined");
                return Err(CartError::PrescriptionDeclined);
            }
        }

        self.store.upsert(id, quantity.max(1));
        self.store.save();
        tracing::info!(id = %id, quantity, name = %product.name, "Added to cart");
        Ok(())
    }

    /// Remove a product's line from the cart.
    ///
    /// Idempotent: removing an absent product is not an error.
    pub fn remove_item(&mut self, id: ProductId) {
        self.store.remove(id);
        self.store.save();
        tracing::info!(id = %id, "Removed from cart");
    }

    /// Set the quantity of a product's line.
    ///
    /// A quantity of 0 removes the line instead of storing a
    /// non-positive value.
    ///
    /// # Errors
    ///
    /// [`CartError::NotInCart`] if the quantity is positive but no
    /// line matches; the cart is unchanged.
    pub fn update_quantity(&mut self, id: ProductId, new_quantity: u32) -> Result<(), CartError> {
        if new_quantity == 0 {
            self.remove_item(id);
            return Ok(());
        }

        if !self.store.set_quantity(id, new_quantity) {
            return Err(CartError::NotInCart(id));
        }

        self.store.save();
        tracing::info!(id = %id, new_quantity, "Updated cart quantity");
        Ok(())
    }

    /// Empty the cart and erase its persisted record, after the
    /// caller confirms intent. Returns whether the cart was cleared.
    pub fn clear(&mut self, confirm: &dyn Confirmation) -> bool {
        if !confirm.confirm("Clear the entire cart?") {
            return false;
        }
        self.store.clear();
        tracing::info!("Cart cleared");
        true
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.store.total_item_count()
    }

    /// Total price of the cart: Σ unit price × quantity.
    ///
    /// A line whose product no longer resolves in the catalog
    /// contributes zero; stale persisted references must not poison
    /// the total.
    #[must_use]
    pub fn total_price(&self) -> Price {
        total_price_of(self.catalog, self.store.items())
    }
}

/// Total price of a set of cart lines against a catalog.
pub(crate) fn total_price_of(catalog: &Catalog, lines: &[CartLine]) -> Price {
    lines
        .iter()
        .filter_map(|line| {
            catalog
                .get(line.product_id)
                .map(|product| product.price.times(line.quantity))
        })
        .sum()
}
