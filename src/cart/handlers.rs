//! REST API handlers for the cart widget
//!
//! The widget keeps a local copy of the cart and pushes it back wholesale
//! (`/cart/sync`) rather than replaying individual mutations; checkout
//! (`/cart/checkout`) drains the cart and reports a receipt line. Both
//! endpoints validate against the catalog before touching state.

use super::models::CartEntry;
use super::state::SharedState;
use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart/sync", post(sync_cart))
        .route("/cart/checkout", post(checkout))
}

/// One line of the widget's pushed cart state.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncEntry {
    pub product_id: String,

    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Input for POST /cart/sync
#[derive(Debug, Deserialize)]
pub struct SyncCartInput {
    pub items: Vec<SyncEntry>,
}

/// Response for POST /cart/sync
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub status: String,
    pub item_count: usize,
    pub subtotal: f64,
}

/// Response for POST /cart/checkout
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub status: String,
    pub cleared_count: usize,
    pub total: f64,
}

/// Endpoint: POST /cart/sync
/// Replaces the backend cart with the widget's state exactly.
async fn sync_cart(
    State(state): State<SharedState>,
    Json(payload): Json<SyncCartInput>,
) -> impl IntoResponse {
    // Resolve and validate every pushed line before mutating anything.
    let mut entries = Vec::with_capacity(payload.items.len());
    for item in &payload.items {
        if item.quantity < 1 {
            return reject(&item.product_id, "quantity must be at least 1");
        }
        let Some(product) = state.catalog.find_by_id(&item.product_id) else {
            return reject(&item.product_id, "Product not found");
        };
        entries.push(CartEntry {
            product: product.clone(),
            quantity: item.quantity,
        });
    }

    let mut cart = state.cart();
    cart.replace(entries);
    let view = cart.view();
    drop(cart);

    tracing::debug!(item_count = view.item_count, "cart synced from widget");

    Json(SyncResponse {
        status: "updated".to_string(),
        item_count: view.item_count,
        subtotal: view.subtotal,
    })
    .into_response()
}

/// Endpoint: POST /cart/checkout
/// Drains the cart and reports a receipt line.
async fn checkout(State(state): State<SharedState>) -> impl IntoResponse {
    let mut cart = state.cart();
    let total = cart.subtotal();
    let receipt = receipt_line(cart.entries());
    let cleared_count = cart.clear();
    drop(cart);

    if cleared_count > 0 {
        tracing::info!(%receipt, total, "checkout");
    }

    Json(CheckoutResponse {
        status: "checked_out".to_string(),
        cleared_count,
        total,
    })
}

fn reject(product_id: &str, message: &str) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": message, "productId": product_id })),
    )
        .into_response()
}

/// Produces a human-readable one-line summary for a list of cart entries.
///
/// Example output: `"2x Urban Commuter Backpack, 1x Minimalist Daypack"`.
fn receipt_line(entries: &[CartEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{}x {}", e.quantity, e.product.name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::models::Cart;
    use crate::catalog::Product;

    #[test]
    fn receipt_line_formats_quantities_and_names() {
        let mut cart = Cart::default();
        let product = Product {
            id: "X".into(),
            name: "Test Pack".into(),
            description: String::new(),
            price: 10.0,
            category: "Test".into(),
            image: String::new(),
            color: None,
            material: None,
            rating: None,
            pros: None,
            cons: None,
            specs: None,
        };
        cart.add(&product, 2);
        assert_eq!(receipt_line(cart.entries()), "2x Test Pack");
    }
}
