//! Shopping Cart Domain Module
//!
//! This module contains the mutable side of the server:
//! - Domain models (Cart, CartEntry, snapshot views)
//! - Application state management
//! - REST handlers used by the cart widget

pub mod handlers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Cart, CartEntry, CartView};
pub use state::{AppState, SharedState};
