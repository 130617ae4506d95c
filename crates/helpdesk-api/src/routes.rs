//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, compression, and a
//! request body limit.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use helpdesk_core::error::HelpdeskError;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The widget may be embedded in pages served from other origins, so
    // CORS is permissive. There is no auth surface to protect.
    Router::new()
        .route("/", get(handlers::widget))
        .route("/health", get(handlers::health))
        .route("/chat", post(handlers::chat))
        .layer(DefaultBodyLimit::max(64 * 1024)) // chat messages are small
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server on the given port.
///
/// Binds to 127.0.0.1 (localhost only).
pub async fn start_server(port: u16, state: AppState) -> Result<(), HelpdeskError> {
    let addr = format!("127.0.0.1:{}", port);

    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HelpdeskError::Api(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| HelpdeskError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
