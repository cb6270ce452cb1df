//! Product Catalog Domain Module
//!
//! This module contains everything that is derived from the read-only
//! product catalog:
//! - Domain models (Product)
//! - The catalog store (seeding, point lookup)
//! - The query engine (filtering, sorting, limiting)
//! - Comparison analytics (best value, highest rated, lowest price)
//! - Recommendations (rating-ranked suggestion lists)

pub mod compare;
pub mod models;
pub mod query;
pub mod recommend;
pub mod store;

// Re-export commonly used types for convenience
pub use compare::{ComparisonInsight, PriceRange};
pub use models::Product;
pub use query::{ListFilter, SortKey};
pub use store::{CatalogError, CatalogStore};
