//! MCP Protocol Models and Constants
//!
//! Data structures and constants for the Model Context Protocol surface:
//! the JSON-RPC envelope, the per-tool input contracts, and the error
//! taxonomy of the dispatch layer.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// MCP Constants
// =============================================================================

/// Tool name: list/filter/sort the catalog
pub const LIST_PRODUCTS_TOOL: &str = "list_products";
/// Tool name: fetch one product by id
pub const GET_PRODUCT_DETAILS_TOOL: &str = "get_product_details";
/// Tool name: compare 2-4 products
pub const COMPARE_PRODUCTS_TOOL: &str = "compare_products";
/// Tool name: read the cart
pub const GET_CART_TOOL: &str = "get_cart";
/// Tool name: add a product to the cart
pub const ADD_TO_CART_TOOL: &str = "add_to_cart";
/// Tool name: remove a product from the cart
pub const REMOVE_FROM_CART_TOOL: &str = "remove_from_cart";
/// Tool name: empty the cart
pub const CLEAR_CART_TOOL: &str = "clear_cart";
/// Tool name: rating-ranked suggestions
pub const GET_RECOMMENDATIONS_TOOL: &str = "get_recommendations";

/// MIME type for the widget templates
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";
/// Server identifier
pub const SERVER_NAME: &str = "storefront-tools-rust";
/// Protocol version for MCP
pub const PROTOCOL_VERSION: &str = "2024-11-05";

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    pub params: Option<Value>,

    /// Request identifier
    pub id: Option<Value>,
}

// =============================================================================
// Tool Input Contracts
// =============================================================================

// `list_products` takes [`crate::catalog::ListFilter`] directly.

fn default_quantity() -> u32 {
    1
}

fn default_recommendation_limit() -> u32 {
    3
}

/// Input for the get_product_details tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductDetailsInput {
    /// The unique ID of the product to retrieve
    pub product_id: String,
}

/// Input for the compare_products tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareProductsInput {
    /// 2-4 product IDs to compare
    pub product_ids: Vec<String>,
}

/// Input for the add_to_cart tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartInput {
    /// The ID of the product to add
    pub product_id: String,

    /// Quantity to add (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Input for the remove_from_cart tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartInput {
    /// The ID of the product to remove
    pub product_id: String,

    /// Quantity to remove; omitted removes the entry entirely
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Input for the get_recommendations tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRecommendationsInput {
    /// Seed product: recommend similar products
    #[serde(default)]
    pub product_id: Option<String>,

    /// Seed category: recommend its top-rated products
    #[serde(default)]
    pub category: Option<String>,

    /// Number of recommendations, 1-5 (defaults to 3)
    #[serde(default = "default_recommendation_limit")]
    pub limit: u32,
}

/// Params for the resources/read method
#[derive(Debug, Deserialize)]
pub struct ResourcesReadParams {
    /// `ui://` URI of the widget template to read
    pub uri: String,
}

// =============================================================================
// Error Taxonomy
// =============================================================================

/// Everything that can go wrong while dispatching a tool call.
///
/// The first two variants are rejections: the input never made it past
/// validation, no state was touched, and the caller gets a JSON-RPC
/// `-32602` error. The remaining variants are domain outcomes reported
/// inside a well-formed result envelope with an `error` payload field.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Malformed or out-of-range input, rejected before dispatch.
    #[error("Invalid arguments: {0}")]
    Validation(String),

    /// The requested tool does not exist.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A product id did not resolve against the catalog.
    #[error("Product with ID \"{0}\" not found")]
    NotFound(String),

    /// A removal targeted a product that is not in the cart.
    #[error("Product with ID \"{0}\" is not in the cart")]
    NotInCart(String),

    /// Fewer than two comparison ids resolved.
    #[error("Not enough valid products found. Please provide at least 2 valid product IDs.")]
    InsufficientProducts {
        requested: Vec<String>,
        found: usize,
    },
}

impl ToolError {
    /// True for errors that reject the call outright instead of producing
    /// a result envelope.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnknownTool(_))
    }
}
