//! Catalog Store
//!
//! Holds the authoritative, read-only list of products and answers point
//! lookups by id. The store is seeded once at process start from the bundled
//! JSON data and validated against the catalog invariants; after that it is
//! shared freely between threads without synchronization.

use super::models::Product;
use std::collections::HashSet;
use thiserror::Error;

/// Catalog seed data compiled into the binary.
pub const BUNDLED_CATALOG: &str = include_str!("../../assets/products.json");

/// Errors raised while loading and validating catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The seed data is not valid JSON for a product list.
    #[error("invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share the same id.
    #[error("duplicate product id \"{0}\"")]
    DuplicateId(String),

    /// A product carries a negative price.
    #[error("product \"{0}\" has a negative price")]
    NegativePrice(String),

    /// A product rating falls outside the 0..=5 scale.
    #[error("product \"{0}\" has a rating outside 0..=5")]
    RatingOutOfRange(String),
}

/// Immutable in-memory product collection.
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    /// Parses and validates a JSON product list.
    pub fn from_json(data: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(data)?;

        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if product.price < 0.0 {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }
            if let Some(rating) = product.rating {
                if !(0.0..=5.0).contains(&rating) {
                    return Err(CatalogError::RatingOutOfRange(product.id.clone()));
                }
            }
        }

        Ok(Self { products })
    }

    /// Loads the catalog compiled into the binary.
    ///
    /// The bundled data is covered by tests, so a failure here means a broken
    /// build rather than a runtime condition.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_CATALOG).expect("bundled catalog data is valid")
    }

    /// Point lookup by product id.
    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
