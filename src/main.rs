use std::net::SocketAddr;
use std::sync::Arc;
use storefront_tools_rust::cart::AppState;
use storefront_tools_rust::router::create_app_router;

#[tokio::main]
async fn main() {
    // Default to info-level logs for this crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_tools_rust=info,tower_http=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Initialize application state (catalog + empty cart)
    let state = Arc::new(AppState::new());
    tracing::info!(products = state.catalog.len(), "catalog loaded");

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Configure the server address
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("server running on http://{addr}");

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind server address");
    axum::serve(listener, app).await.expect("server error");
}
