//! MCP (Model Context Protocol) route handlers
//!
//! Implements the JSON-RPC surface and the named-operation dispatch for the
//! storefront tools. `handle_tool_call` is exported publicly to make it
//! accessible for tests.

use super::{helpers::*, models::*};
use crate::cart::state::{AppState, SharedState};
use crate::catalog::{ComparisonInsight, ListFilter, Product};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_mcp).get(handle_mcp_sse))
        .route("/mcp", post(handle_mcp).get(handle_mcp_sse)) // Standard endpoint
        .route("/mcp/", post(handle_mcp).get(handle_mcp_sse)) // Trailing slash safety
}

/// Handle SSE (Server-Sent Events) handshake for GET requests
async fn handle_mcp_sse() -> impl IntoResponse {
    (
        [("content-type", "text/event-stream")],
        "event: endpoint\ndata: /mcp\n\n",
    )
}

/// Endpoint: POST /mcp
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    // Parse JSON-RPC Request (POST)
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            tracing::warn!(error = %e.body_text(), "JSON parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, -32700, "Parse error")),
            )
                .into_response();
        }
    };

    let id = req.id.unwrap_or(Value::Null);
    let method_name = req.method.as_str();
    let params = req.params.unwrap_or(Value::Null);

    tracing::debug!(method = method_name, id = ?id, "mcp call");

    // Dispatch Method
    let response_body = match method_name {
        "initialize" => rpc_success(id, handle_initialize()),
        "notifications/initialized" => rpc_success(id, json!({})),
        "tools/list" => rpc_success(id, handle_tools_list()),
        "resources/list" => rpc_success(id, handle_resources_list()),
        "resources/read" => match handle_resources_read(&state, params).await {
            Ok(result) => rpc_success(id, result),
            Err(err) => rpc_error(id, -32602, err.to_string()),
        },
        "tools/call" => {
            let tool_name = params.get("name").and_then(|n| n.as_str()).unwrap_or("");
            let args = params.get("arguments").cloned().unwrap_or(Value::Null);

            match handle_tool_call(&state, tool_name, args) {
                Ok(result) => rpc_success(id, result),
                // Rejections: nothing was dispatched, no state was touched.
                Err(err) if err.is_rejection() => rpc_error(id, -32602, err.to_string()),
                // Domain outcomes: a well-formed envelope with an error payload.
                Err(err) => rpc_success(id, error_envelope(&err, widget_for_tool(tool_name))),
            }
        }
        "ping" => rpc_success(id, json!({})), // Optional but good for health checks
        _ => {
            tracing::warn!(method = method_name, "unknown method");
            rpc_error(id, -32601, "Method not found")
        }
    };

    Json(response_body).into_response()
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": true },
            "resources": { "listChanged": true, "subscribe": true }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

/// Handles `tools/list` request.
fn handle_tools_list() -> Value {
    json!({
        "tools": [
            {
                "name": LIST_PRODUCTS_TOOL,
                "title": "Product Catalog",
                "description": "List all products in the catalog with optional filtering by category, price range, and sorting",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Filter by category (e.g., 'Travel', 'Outdoor', 'Lifestyle', 'Commuter', 'Photography')"
                        },
                        "minPrice": { "type": "number", "description": "Minimum price filter in USD" },
                        "maxPrice": { "type": "number", "description": "Maximum price filter in USD" },
                        "sortBy": {
                            "type": "string",
                            "enum": ["price_asc", "price_desc", "rating_desc", "name_asc"],
                            "description": "Sort order: price_asc, price_desc, rating_desc, or name_asc"
                        },
                        "limit": { "type": "integer", "description": "Maximum number of products to return" }
                    },
                    "additionalProperties": false
                },
                "_meta": widget_meta(&PRODUCTS_WIDGET)
            },
            {
                "name": GET_PRODUCT_DETAILS_TOOL,
                "title": "Product Details",
                "description": "Get detailed information about a specific product including description, specs, pros, and cons",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "productId": { "type": "string", "description": "The unique ID of the product to retrieve" }
                    },
                    "required": ["productId"],
                    "additionalProperties": false
                },
                "_meta": widget_meta(&PRODUCT_DETAIL_WIDGET)
            },
            {
                "name": COMPARE_PRODUCTS_TOOL,
                "title": "Product Comparison",
                "description": "Compare multiple products side by side with detailed specs, pros, cons, and pricing analysis",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "productIds": {
                            "type": "array",
                            "items": { "type": "string" },
                            "minItems": 2,
                            "maxItems": 4,
                            "description": "Array of 2-4 product IDs to compare"
                        }
                    },
                    "required": ["productIds"],
                    "additionalProperties": false
                },
                "_meta": widget_meta(&COMPARE_WIDGET)
            },
            {
                "name": GET_CART_TOOL,
                "title": "Shopping Cart",
                "description": "Get the current shopping cart contents and total",
                "inputSchema": { "type": "object", "properties": {}, "additionalProperties": false },
                "_meta": widget_meta(&CART_WIDGET)
            },
            {
                "name": ADD_TO_CART_TOOL,
                "title": "Add to Cart",
                "description": "Add a product to the shopping cart",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "productId": { "type": "string", "description": "The ID of the product to add" },
                        "quantity": {
                            "type": "integer",
                            "minimum": 1,
                            "default": 1,
                            "description": "Quantity to add (default: 1)"
                        }
                    },
                    "required": ["productId"],
                    "additionalProperties": false
                },
                "_meta": widget_meta(&CART_WIDGET)
            },
            {
                "name": REMOVE_FROM_CART_TOOL,
                "title": "Remove from Cart",
                "description": "Remove a product from the shopping cart",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "productId": { "type": "string", "description": "The ID of the product to remove" },
                        "quantity": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "Quantity to remove (omit to remove all)"
                        }
                    },
                    "required": ["productId"],
                    "additionalProperties": false
                },
                "_meta": widget_meta(&CART_WIDGET)
            },
            {
                "name": CLEAR_CART_TOOL,
                "title": "Clear Cart",
                "description": "Remove all items from the shopping cart",
                "inputSchema": { "type": "object", "properties": {}, "additionalProperties": false },
                "_meta": widget_meta(&CART_WIDGET)
            },
            {
                "name": GET_RECOMMENDATIONS_TOOL,
                "title": "Product Recommendations",
                "description": "Get product recommendations based on a product ID or category preference",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "productId": { "type": "string", "description": "Get recommendations similar to this product" },
                        "category": { "type": "string", "description": "Get top products in this category" },
                        "limit": {
                            "type": "integer",
                            "minimum": 1,
                            "maximum": 5,
                            "default": 3,
                            "description": "Number of recommendations (1-5, default: 3)"
                        }
                    },
                    "additionalProperties": false
                },
                "_meta": widget_meta(&PRODUCTS_WIDGET)
            }
        ]
    })
}

/// Handles `resources/list` request.
fn handle_resources_list() -> Value {
    let resources: Vec<Value> = WIDGETS.iter().map(|w| resource_descriptor(w)).collect();
    json!({ "resources": resources })
}

/// Handles `resources/read` request.
async fn handle_resources_read(state: &AppState, params: Value) -> Result<Value, ToolError> {
    let params: ResourcesReadParams = parse_args(params)?;
    let widget = widget_by_uri(&params.uri)
        .ok_or_else(|| ToolError::Validation(format!("unknown resource: {}", params.uri)))?;

    // Widget HTML is built separately; an unbuilt asset reads as empty.
    let html = state
        .load_widget_html(widget.asset_name)
        .await
        .unwrap_or_default();

    Ok(json!({
        "contents": [{
            "uri": widget.template_uri,
            "mimeType": WIDGET_MIME_TYPE,
            "text": html,
            "_meta": resource_meta(widget)
        }]
    }))
}

/// Maps a tool to the widget template its results render with.
fn widget_for_tool(name: &str) -> &'static Widget {
    match name {
        GET_PRODUCT_DETAILS_TOOL => &PRODUCT_DETAIL_WIDGET,
        COMPARE_PRODUCTS_TOOL => &COMPARE_WIDGET,
        GET_CART_TOOL | ADD_TO_CART_TOOL | REMOVE_FROM_CART_TOOL | CLEAR_CART_TOOL => &CART_WIDGET,
        _ => &PRODUCTS_WIDGET,
    }
}

/// Deserializes tool arguments, treating absent arguments as an empty
/// object so tools with all-optional inputs accept a bare call.
fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = if args.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|err| ToolError::Validation(err.to_string()))
}

// =============================================================================
// Tool Handlers (Business Logic)
// =============================================================================

/// Handles `tools/call` request.
///
/// Every branch validates its input fully before touching the cart, so a
/// failed call never leaves partial state behind.
pub fn handle_tool_call(state: &AppState, name: &str, args: Value) -> Result<Value, ToolError> {
    match name {
        LIST_PRODUCTS_TOOL => handle_list_products(state, args),
        GET_PRODUCT_DETAILS_TOOL => handle_get_product_details(state, args),
        COMPARE_PRODUCTS_TOOL => handle_compare_products(state, args),
        GET_CART_TOOL => handle_get_cart(state),
        ADD_TO_CART_TOOL => handle_add_to_cart(state, args),
        REMOVE_FROM_CART_TOOL => handle_remove_from_cart(state, args),
        CLEAR_CART_TOOL => handle_clear_cart(state),
        GET_RECOMMENDATIONS_TOOL => handle_get_recommendations(state, args),
        _ => Err(ToolError::UnknownTool(name.to_string())),
    }
}

/// Handles the list_products tool functionality
fn handle_list_products(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let filter: ListFilter = parse_args(args)?;
    let products = state.catalog.list(&filter);
    let total = products.len();

    let mut text = format!("Found {total} products");
    if let Some(category) = &filter.category {
        text.push_str(&format!(" in category \"{category}\""));
    }
    if filter.min_price.is_some() || filter.max_price.is_some() {
        let min = format_usd(filter.min_price.unwrap_or(0.0));
        match filter.max_price {
            Some(max) => {
                text.push_str(&format!(" within price range {min} - {}", format_usd(max)));
            }
            None => text.push_str(&format!(" priced {min} and up")),
        }
    }

    Ok(envelope(
        text,
        json!({ "products": products, "total": total, "filters": filter }),
        &PRODUCTS_WIDGET,
    ))
}

/// Handles the get_product_details tool functionality
fn handle_get_product_details(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let input: GetProductDetailsInput = parse_args(args)?;
    let product = state
        .catalog
        .find_by_id(&input.product_id)
        .ok_or(ToolError::NotFound(input.product_id))?;

    let rating = product
        .rating
        .map_or_else(|| "N/A".to_string(), |r| r.to_string());
    let text = format!(
        "{} - {} ({}) - Rating: {}/5",
        product.name,
        format_usd(product.price),
        product.category,
        rating
    );

    Ok(envelope(
        text,
        json!({ "product": product }),
        &PRODUCT_DETAIL_WIDGET,
    ))
}

/// Handles the compare_products tool functionality
fn handle_compare_products(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let input: CompareProductsInput = parse_args(args)?;
    if !(2..=4).contains(&input.product_ids.len()) {
        return Err(ToolError::Validation(
            "productIds must contain between 2 and 4 product IDs".to_string(),
        ));
    }

    // Unresolvable ids are discarded, not fatal; the analytics guard below
    // decides whether enough survive.
    let selected: Vec<&Product> = input
        .product_ids
        .iter()
        .filter_map(|id| state.catalog.find_by_id(id))
        .collect();

    let Some(insight) = ComparisonInsight::from_products(&selected) else {
        return Err(ToolError::InsufficientProducts {
            found: selected.len(),
            requested: input.product_ids,
        });
    };

    let names: Vec<&str> = selected.iter().map(|p| p.name.as_str()).collect();
    let text = format!(
        "Comparing {} products: {}. Best Value: {}, Highest Rated: {}, Lowest Price: {}",
        selected.len(),
        names.join(", "),
        insight.best_value.name,
        insight.highest_rated.name,
        insight.lowest_price.name
    );

    Ok(envelope(
        text,
        json!({
            "products": selected,
            "insights": {
                "bestValue": {
                    "id": insight.best_value.id,
                    "name": insight.best_value.name,
                },
                "highestRated": {
                    "id": insight.highest_rated.id,
                    "name": insight.highest_rated.name,
                    "rating": insight.highest_rated.rating,
                },
                "lowestPrice": {
                    "id": insight.lowest_price.id,
                    "name": insight.lowest_price.name,
                    "price": insight.lowest_price.price,
                },
            },
            "priceRange": insight.price_range,
        }),
        &COMPARE_WIDGET,
    ))
}

/// Handles the get_cart tool functionality
fn handle_get_cart(state: &AppState) -> Result<Value, ToolError> {
    let view = state.cart().view();

    let text = if view.item_count > 0 {
        format!(
            "Cart has {} item(s) totaling {}",
            view.item_count,
            format_usd(view.subtotal)
        )
    } else {
        "Cart is empty".to_string()
    };

    Ok(envelope(text, json!(view), &CART_WIDGET))
}

/// Handles the add_to_cart tool functionality
fn handle_add_to_cart(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let input: AddToCartInput = parse_args(args)?;
    if input.quantity < 1 {
        return Err(ToolError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }

    let product = state
        .catalog
        .find_by_id(&input.product_id)
        .cloned()
        .ok_or(ToolError::NotFound(input.product_id))?;

    let mut cart = state.cart();
    cart.add(&product, input.quantity);
    let view = cart.view();
    drop(cart);

    let text = format!(
        "Added {}x \"{}\" to cart. Cart total: {}",
        input.quantity,
        product.name,
        format_usd(view.subtotal)
    );

    Ok(envelope(
        text,
        json!({ "addedProduct": product, "quantity": input.quantity, "cart": view }),
        &CART_WIDGET,
    ))
}

/// Handles the remove_from_cart tool functionality
fn handle_remove_from_cart(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let input: RemoveFromCartInput = parse_args(args)?;
    if input.quantity.is_some_and(|q| q < 1) {
        return Err(ToolError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }

    let mut cart = state.cart();
    let before = cart
        .remove(&input.product_id, input.quantity)
        .ok_or(ToolError::NotInCart(input.product_id))?;
    let view = cart.view();
    drop(cart);

    let removed_quantity = input.quantity.map_or(before.quantity, |q| q.min(before.quantity));
    let text = format!(
        "Removed \"{}\" from cart. Cart total: {}",
        before.product.name,
        format_usd(view.subtotal)
    );

    Ok(envelope(
        text,
        json!({
            "removedProduct": before.product,
            "removedQuantity": removed_quantity,
            "cart": view,
        }),
        &CART_WIDGET,
    ))
}

/// Handles the clear_cart tool functionality
fn handle_clear_cart(state: &AppState) -> Result<Value, ToolError> {
    let mut cart = state.cart();
    let cleared_count = cart.clear();
    let view = cart.view();
    drop(cart);

    let text = if cleared_count > 0 {
        format!("Cleared {cleared_count} item(s) from cart")
    } else {
        "Cart was already empty".to_string()
    };

    Ok(envelope(
        text,
        json!({ "clearedCount": cleared_count, "cart": view }),
        &CART_WIDGET,
    ))
}

/// Handles the get_recommendations tool functionality
fn handle_get_recommendations(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let input: GetRecommendationsInput = parse_args(args)?;
    if !(1..=5).contains(&input.limit) {
        return Err(ToolError::Validation(
            "limit must be between 1 and 5".to_string(),
        ));
    }

    let (recommendations, seed) = crate::catalog::recommend::recommend(
        &state.catalog,
        input.product_id.as_deref(),
        input.category.as_deref(),
        input.limit as usize,
    );

    let names: Vec<&str> = recommendations.iter().map(|p| p.name.as_str()).collect();
    let text = format!("Recommended products: {}", names.join(", "));

    Ok(envelope(
        text,
        json!({ "recommendations": recommendations, "basedOn": seed.label() }),
        &PRODUCTS_WIDGET,
    ))
}
