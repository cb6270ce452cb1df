//! Product Catalog Domain Models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single purchasable product.
///
/// Products are created once at process start from the bundled catalog data
/// and never mutated afterwards; every other component works with references
/// or clones of these records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique identifier, stable for the lifetime of the store
    pub id: String,

    /// Display name of the product
    pub name: String,

    /// Full marketing description
    pub description: String,

    /// Price in USD. Non-negative; rounding only matters for display.
    pub price: f64,

    /// Category label (e.g. "Travel", "Outdoor", "Lifestyle")
    pub category: String,

    /// Image URL used by the widgets
    pub image: String,

    /// Primary color, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Primary material, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    /// Rating out of 5. Absent for unrated products; ranking treats
    /// a missing rating as 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Selling points, in display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pros: Option<Vec<String>>,

    /// Drawbacks, in display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cons: Option<Vec<String>>,

    /// Spec-sheet entries, keyed by spec name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<BTreeMap<String, String>>,
}

impl Product {
    /// Rating with the missing-rating default applied.
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}
