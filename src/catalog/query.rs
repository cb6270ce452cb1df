//! Catalog Query Engine
//!
//! Filtering, range filtering, sorting and limiting over the catalog store.
//! Queries never mutate the store; every call produces a fresh sequence of
//! cloned products.

use super::models::Product;
use super::store::CatalogStore;
use serde::{Deserialize, Serialize};

/// Recognized sort orders for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    RatingDesc,
    NameAsc,
}

/// Listing configuration. All options are conjunctive; absent options do
/// not constrain the result.
///
/// This struct doubles as the echoed `filters` payload of `list_products`,
/// so absent options are skipped during serialization.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    /// Exact category match, case-insensitive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Inclusive lower price bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,

    /// Inclusive upper price bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,

    /// Sort order applied after filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortKey>,

    /// Maximum number of products to return; absent or <= 0 means unlimited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl CatalogStore {
    /// Runs a listing query: filter, then sort, then limit.
    pub fn list(&self, filter: &ListFilter) -> Vec<Product> {
        let mut results: Vec<Product> = self
            .products()
            .iter()
            .filter(|p| matches_filter(p, filter))
            .cloned()
            .collect();

        if let Some(sort_by) = filter.sort_by {
            sort_products(&mut results, sort_by);
        }

        // Truncation happens last, on the sorted sequence.
        if let Some(limit) = filter.limit {
            if limit > 0 {
                results.truncate(limit as usize);
            }
        }

        results
    }
}

fn matches_filter(product: &Product, filter: &ListFilter) -> bool {
    if let Some(category) = &filter.category {
        if !product.category.eq_ignore_ascii_case(category) {
            return false;
        }
    }
    if let Some(min) = filter.min_price {
        if product.price < min {
            return false;
        }
    }
    if let Some(max) = filter.max_price {
        if product.price > max {
            return false;
        }
    }
    true
}

/// Sorts in place. All sorts are stable, so equal keys keep catalog order.
fn sort_products(products: &mut [Product], sort_by: SortKey) {
    match sort_by {
        SortKey::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::RatingDesc => {
            products.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()));
        }
        SortKey::NameAsc => {
            products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
    }
}
