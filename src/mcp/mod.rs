//! Model Context Protocol (MCP) Module
//!
//! This module contains the whole MCP protocol implementation, including:
//! - Protocol models (JsonRpcRequest, tool input contracts, error taxonomy)
//! - RPC helpers (success/error responses, widget registry, result envelopes)
//! - MCP handlers (initialize, tools/list, tools/call, resources, etc.)

pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types and functions
pub use handlers::routes;
