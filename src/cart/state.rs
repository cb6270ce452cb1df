//! Application State Management
//!
//! Process-wide state: the immutable catalog, the single shared cart, and
//! the location of the widget HTML assets.

use super::models::Cart;
use crate::catalog::CatalogStore;
use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state.
pub struct AppState {
    /// Read-only product catalog, seeded at startup.
    pub catalog: CatalogStore,

    /// The process-wide cart. Axum handles requests concurrently, so every
    /// read-modify-write on the cart (including subtotal snapshots) must run
    /// under this lock.
    cart: Mutex<Cart>,

    /// Path to the directory containing HTML assets.
    pub assets_dir: PathBuf,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates state with the bundled catalog, an empty cart, and a located
    /// assets directory.
    pub fn new() -> Self {
        Self::with_catalog(CatalogStore::bundled())
    }

    /// Creates state around a specific catalog.
    pub fn with_catalog(catalog: CatalogStore) -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let assets_dir = Self::locate_assets_directory(&current_dir);

        tracing::info!(assets_dir = %assets_dir.display(), "using assets directory");

        Self {
            catalog,
            cart: Mutex::new(Cart::default()),
            assets_dir,
        }
    }

    /// Locks the cart for a read-modify-write.
    ///
    /// A poisoned lock is recovered rather than propagated: cart mutations
    /// are single-step, so a panic elsewhere cannot leave an entry half
    /// written, and no error is allowed to take the cart down.
    pub fn cart(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attempts to locate the assets directory using a multi-step strategy
    fn locate_assets_directory(current_dir: &Path) -> PathBuf {
        // Strategy to locate assets:
        // 1. ./assets
        // 2. ../assets (if running from a subdir)
        // 3. Fallback to "assets" relative path

        if current_dir.join("assets").exists() {
            return current_dir.join("assets");
        }

        if let Some(parent) = current_dir.parent() {
            if parent.join("assets").exists() {
                return parent.join("assets");
            }
        }

        PathBuf::from("assets") // Fallback
    }

    /// Reads the HTML for one widget template, e.g. `assets/cart.html`.
    ///
    /// When the primary file has not been built, versioned fallbacks such as
    /// `cart-123.html` are considered, newest (lexicographically last) first.
    pub async fn load_widget_html(&self, asset_name: &str) -> std::io::Result<String> {
        let primary_path = self.assets_dir.join(format!("{asset_name}.html"));
        if primary_path.exists() {
            return tokio::fs::read_to_string(primary_path).await;
        }

        let fallback_path = self.find_fallback_html_file(asset_name).await?;
        tokio::fs::read_to_string(fallback_path).await
    }

    /// Finds a versioned fallback HTML file for a widget.
    async fn find_fallback_html_file(&self, asset_name: &str) -> std::io::Result<PathBuf> {
        let mut entries = tokio::fs::read_dir(&self.assets_dir).await?;
        let prefix = format!("{asset_name}-");

        let mut fallbacks = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with(&prefix) && name.ends_with(".html") {
                    fallbacks.push(path);
                }
            }
        }

        // Use the lexicographically last fallback (likely the latest build)
        fallbacks.sort();
        fallbacks.pop().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no HTML asset for widget \"{asset_name}\""),
            )
        })
    }
}
