//! Storefront Tools Library
//!
//! This library provides the core functionality for a demo storefront
//! tool-server with MCP (Model Context Protocol) support: a read-only
//! product catalog with query, comparison, and recommendation operations,
//! and a process-wide shopping cart mutated through named tool calls.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod mcp;

// Infrastructure
pub mod router;
