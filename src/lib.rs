pub mod config;
pub mod handlers;
pub mod mcp;
pub mod models;
pub mod state;
pub mod store;
pub mod tools;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use state::AppState;

/// Build the application router with the given state.
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a network port.
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        // MCP (JSON-RPC 2.0)
        .route("/mcp", post(mcp::server::mcp_handler))
        // Health
        .route("/api/health", get(handlers::health))
        .route("/api/health/ready", get(handlers::readiness))
        // Oversized bodies surface as a buffering rejection inside the handler
        .layer(DefaultBodyLimit::max(max_body_bytes))
        // Shared state
        .with_state(state)
}
