//! The cart store: in-memory line items synchronized to persistent
//! storage.
//!
//! The store owns the only mutable copy of the cart. Every mutation
//! goes through [`crate::services::cart::CartService`], which persists
//! immediately afterwards; presentation code only ever reads
//! [`CartStore::items`] back.
//!
//! Persistence is deliberately fail-soft in both directions: missing
//! or malformed stored data resets to an empty cart, and a failed
//! write is logged while the in-memory state stays authoritative for
//! the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use apteka_core::ProductId;

use crate::storage::{Storage, keys};

/// One cart line: a product reference with a quantity.
///
/// Invariants: at most one line per product id, `quantity >= 1`.
/// The serialized shape (`productId`/`quantity`/`addedAt`) is the
/// stored `cart` record format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    /// When the line was first added; increments keep the original
    /// timestamp.
    pub added_at: DateTime<Utc>,
}

/// The cart: an ordered sequence of line items backed by a
/// [`Storage`] record.
#[derive(Debug)]
pub struct CartStore<S: Storage> {
    storage: S,
    lines: Vec<CartLine>,
}

impl<S: Storage> CartStore<S> {
    /// Open the cart, loading any persisted state.
    ///
    /// Missing or malformed stored data resets to an empty cart;
    /// this never fails, it only logs.
    pub fn open(storage: S) -> Self {
        let lines = match storage.get(keys::CART) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<CartLine>>(&text) {
                Ok(lines) => {
                    tracing::debug!(count = lines.len(), "Loaded cart from storage");
                    lines
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Malformed cart record, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Cannot read cart record, starting empty");
                Vec::new()
            }
        };

        Self { storage, lines }
    }

    /// Persist the current cart.
    ///
    /// A write failure is logged, not propagated: the in-memory cart
    /// remains authoritative for the session.
    pub fn save(&mut self) {
        match serde_json::to_string(&self.lines) {
            Ok(json) => {
                if let Err(e) = self.storage.set(keys::CART, &json) {
                    tracing::error!(error = %e, "Cannot persist cart");
                }
            }
            Err(e) => tracing::error!(error = %e, "Cannot serialize cart"),
        }
    }

    /// The current line items, in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Quantity of the given product in the cart, 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product_id == id)
            .map_or(0, |line| line.quantity)
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of a product: increments an existing line or
    /// appends a new one stamped with the current time.
    pub(crate) fn upsert(&mut self, id: ProductId, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.product_id == id) {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine {
                product_id: id,
                quantity,
                added_at: Utc::now(),
            });
        }
    }

    /// Delete the line for a product, if present.
    pub(crate) fn remove(&mut self, id: ProductId) {
        self.lines.retain(|line| line.product_id != id);
    }

    /// Set the quantity of an existing line. Returns false if no
    /// line matches.
    pub(crate) fn set_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == id)
            .map(|line| line.quantity = quantity)
            .is_some()
    }

    /// Empty the cart and erase the persisted record.
    pub(crate) fn clear(&mut self) {
        self.lines.clear();
        if let Err(e) = self.storage.remove(keys::CART) {
            tracing::error!(error = %e, "Cannot erase persisted cart");
        }
    }

    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    pub(crate) fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
