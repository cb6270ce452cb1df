//! MCP Protocol Helpers
//!
//! JSON-RPC envelope construction, the widget registry, and the
//! presentation metadata attached to every tool result.

use super::models::{ToolError, WIDGET_MIME_TYPE};
use serde_json::{json, Value};

// =============================================================================
// Widget Registry
// =============================================================================

/// One renderable view template. The server never inspects the HTML; it
/// only hands the template URI to the caller via `_meta` and serves the
/// asset on `resources/read`.
pub struct Widget {
    /// Resource display name
    pub title: &'static str,

    /// `ui://` URI the rendering layer keys on
    pub template_uri: &'static str,

    /// Base name of the HTML file under the assets directory
    pub asset_name: &'static str,

    /// Status line while the tool is running
    pub invoking: &'static str,

    /// Status line once the tool has finished
    pub invoked: &'static str,

    /// What the widget shows
    pub description: &'static str,
}

/// Catalog grid with filtering options.
pub const PRODUCTS_WIDGET: Widget = Widget {
    title: "Product Catalog",
    template_uri: "ui://widgets/products",
    asset_name: "products",
    invoking: "Loading products...",
    invoked: "Products loaded",
    description: "Displays the product catalog with filtering options",
};

/// Single-product detail view.
pub const PRODUCT_DETAIL_WIDGET: Widget = Widget {
    title: "Product Details",
    template_uri: "ui://widgets/product-detail",
    asset_name: "product-detail",
    invoking: "Loading product details...",
    invoked: "Product details loaded",
    description: "Displays detailed information about a specific product",
};

/// Side-by-side comparison table.
pub const COMPARE_WIDGET: Widget = Widget {
    title: "Product Comparison",
    template_uri: "ui://widgets/compare",
    asset_name: "compare",
    invoking: "Loading comparison...",
    invoked: "Comparison ready",
    description: "Compare multiple products side by side",
};

/// Cart contents and totals.
pub const CART_WIDGET: Widget = Widget {
    title: "Shopping Cart",
    template_uri: "ui://widgets/cart",
    asset_name: "cart",
    invoking: "Loading cart...",
    invoked: "Cart loaded",
    description: "Displays the shopping cart contents",
};

/// Every registered widget, in `resources/list` order.
pub const WIDGETS: [&Widget; 4] = [
    &PRODUCTS_WIDGET,
    &PRODUCT_DETAIL_WIDGET,
    &COMPARE_WIDGET,
    &CART_WIDGET,
];

/// Resolves a `ui://` URI back to its widget.
pub fn widget_by_uri(uri: &str) -> Option<&'static Widget> {
    WIDGETS.iter().copied().find(|w| w.template_uri == uri)
}

/// Constructs the `_meta` presentation binding for a tool result.
pub fn widget_meta(widget: &Widget) -> Value {
    json!({
        "openai/outputTemplate": widget.template_uri,
        "openai/toolInvocation/invoking": widget.invoking,
        "openai/toolInvocation/invoked": widget.invoked,
        "openai/widgetAccessible": false,
        "openai/resultCanProduceWidget": true,
    })
}

/// Constructs the `_meta` attached to a widget's resource listing.
pub fn resource_meta(widget: &Widget) -> Value {
    json!({
        "openai/widgetDescription": widget.description,
        "openai/widgetPrefersBorder": true,
    })
}

/// Describes one widget for `resources/list`.
pub fn resource_descriptor(widget: &Widget) -> Value {
    json!({
        "name": widget.title,
        "uri": widget.template_uri,
        "description": widget.description,
        "mimeType": WIDGET_MIME_TYPE,
        "_meta": resource_meta(widget),
    })
}

// =============================================================================
// Envelope Construction
// =============================================================================

/// Wraps a tool outcome in the uniform result envelope: one-line summary,
/// structured payload, widget binding.
pub fn envelope(text: impl Into<String>, structured: Value, widget: &Widget) -> Value {
    json!({
        "content": [{ "type": "text", "text": text.into() }],
        "structuredContent": structured,
        "_meta": widget_meta(widget),
    })
}

/// Builds the result envelope for a domain error: the summary is the error
/// display string and the payload carries an `error` field plus contextual
/// identifiers.
pub fn error_envelope(error: &ToolError, widget: &Widget) -> Value {
    let structured = match error {
        ToolError::NotFound(product_id) => json!({
            "error": "Product not found",
            "productId": product_id,
        }),
        ToolError::NotInCart(product_id) => json!({
            "error": "Product not in cart",
            "productId": product_id,
        }),
        ToolError::InsufficientProducts { requested, found } => json!({
            "error": "Insufficient valid products",
            "requestedIds": requested,
            "foundCount": found,
        }),
        // Rejections never reach envelope construction.
        other => json!({ "error": other.to_string() }),
    };

    envelope(error.to_string(), structured, widget)
}

/// Formats an amount the way every summary line shows money.
pub fn format_usd(amount: f64) -> String {
    format!("${amount:.2}")
}

// =============================================================================
// JSON-RPC Envelopes
// =============================================================================

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` – The request identifier that must be echoed back.
/// * `result` – The payload representing the successful outcome.
pub fn rpc_success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier (or `null` if unavailable).
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` – Human-readable description of the error.
pub fn rpc_error(id: Value, code: i32, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widgets_resolve_by_uri() {
        for widget in WIDGETS {
            let found = widget_by_uri(widget.template_uri).unwrap();
            assert_eq!(found.template_uri, widget.template_uri);
        }
        assert!(widget_by_uri("ui://widgets/ghost").is_none());
    }

    #[test]
    fn envelope_carries_summary_payload_and_binding() {
        let result = envelope("hello", serde_json::json!({ "a": 1 }), &CART_WIDGET);
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "hello");
        assert_eq!(result["structuredContent"]["a"], 1);
        assert_eq!(result["_meta"]["openai/outputTemplate"], "ui://widgets/cart");
    }

    #[test]
    fn error_envelope_carries_contextual_identifiers() {
        let err = ToolError::NotFound("42".into());
        let result = error_envelope(&err, &PRODUCT_DETAIL_WIDGET);
        assert_eq!(result["structuredContent"]["error"], "Product not found");
        assert_eq!(result["structuredContent"]["productId"], "42");
        assert_eq!(
            result["content"][0]["text"],
            "Product with ID \"42\" not found"
        );
    }

    #[test]
    fn usd_formatting_rounds_to_two_places() {
        assert_eq!(format_usd(89.99), "$89.99");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(179.989), "$179.99");
    }
}
