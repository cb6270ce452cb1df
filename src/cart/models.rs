//! Shopping Cart Domain Models
//!
//! The cart is a process-wide mapping from product id to a quantity of that
//! product, stored as an insertion-ordered sequence. Every product id is
//! either absent or present with quantity >= 1; zero-quantity entries are
//! removed, never kept.

use crate::catalog::Product;
use serde::Serialize;

/// One cart line: a product and how many of it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: u32,
}

/// Snapshot of the cart handed to callers. `item_count` counts distinct
/// entries, not total units; `subtotal` is recomputed at snapshot time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartEntry>,
    pub item_count: usize,
    pub subtotal: f64,
}

/// The shared mutable cart. All mutation goes through the methods below;
/// callers hold the state-level lock for the whole read-modify-write
/// (see [`crate::cart::state::AppState::cart`]).
#[derive(Debug, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Adds `quantity` units of `product`. An existing entry is merged by
    /// incrementing its quantity; a new product is appended. Returns the
    /// entry's resulting quantity.
    pub fn add(&mut self, product: &Product, quantity: u32) -> u32 {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == product.id) {
            entry.quantity += quantity;
            entry.quantity
        } else {
            self.entries.push(CartEntry {
                product: product.clone(),
                quantity,
            });
            quantity
        }
    }

    /// Removes up to `quantity` units of the given product. An omitted
    /// quantity, or one at least as large as the entry's, deletes the entry
    /// entirely. Returns the entry as it was before the mutation, or `None`
    /// when the product is not in the cart.
    pub fn remove(&mut self, product_id: &str, quantity: Option<u32>) -> Option<CartEntry> {
        let index = self.entries.iter().position(|e| e.product.id == product_id)?;
        let before = self.entries[index].clone();

        match quantity {
            Some(quantity) if quantity < before.quantity => {
                self.entries[index].quantity -= quantity;
            }
            _ => {
                self.entries.remove(index);
            }
        }

        Some(before)
    }

    /// Empties the cart and reports how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    /// Replaces the whole cart with the given entries (widget sync).
    pub fn replace(&mut self, entries: Vec<CartEntry>) {
        self.entries = entries;
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Sum of price x quantity over all entries, computed fresh.
    pub fn subtotal(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.product.price * f64::from(e.quantity))
            .sum()
    }

    /// Builds a snapshot view of the current contents.
    pub fn view(&self) -> CartView {
        CartView {
            items: self.entries.clone(),
            item_count: self.entries.len(),
            subtotal: self.subtotal(),
        }
    }
}
