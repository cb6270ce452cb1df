//! Product Recommendations
//!
//! Rating-ranked suggestion lists, seeded three ways: by a product (same
//! category first, backfilled from the rest of the catalog), by a category,
//! or by overall rating when no seed is given.

use super::models::Product;
use super::store::CatalogStore;

/// What a recommendation list was derived from. Rendered into the
/// `basedOn` payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationSeed {
    Product(String),
    Category(String),
    TopRated,
}

impl RecommendationSeed {
    pub fn label(&self) -> String {
        match self {
            Self::Product(id) => format!("product {id}"),
            Self::Category(category) => format!("category {category}"),
            Self::TopRated => "top rated".to_string(),
        }
    }
}

/// Picks up to `limit` recommended products.
///
/// Seeding by an unknown product id yields an empty list rather than an
/// error; the caller asked for "products like X" and there is no X.
pub fn recommend(
    store: &CatalogStore,
    product_id: Option<&str>,
    category: Option<&str>,
    limit: usize,
) -> (Vec<Product>, RecommendationSeed) {
    if let Some(id) = product_id {
        let seed = RecommendationSeed::Product(id.to_string());
        let Some(anchor) = store.find_by_id(id) else {
            return (Vec::new(), seed);
        };

        let mut picks = top_rated(store, |p| p.category == anchor.category && p.id != anchor.id);
        picks.truncate(limit);

        // Backfill with top-rated products from other categories when the
        // anchor's own category runs short.
        if picks.len() < limit {
            let backfill = top_rated(store, |p| {
                p.id != anchor.id && !picks.iter().any(|r| r.id == p.id)
            });
            picks.extend(backfill.into_iter().take(limit - picks.len()));
        }

        (picks, seed)
    } else if let Some(category) = category {
        let mut picks = top_rated(store, |p| p.category.eq_ignore_ascii_case(category));
        picks.truncate(limit);
        (picks, RecommendationSeed::Category(category.to_string()))
    } else {
        let mut picks = top_rated(store, |_| true);
        picks.truncate(limit);
        (picks, RecommendationSeed::TopRated)
    }
}

/// Matching products sorted by rating, highest first. The sort is stable,
/// so rating ties keep catalog order.
fn top_rated(store: &CatalogStore, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
    let mut picks: Vec<Product> = store.products().iter().filter(|p| keep(p)).cloned().collect();
    picks.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()));
    picks
}
