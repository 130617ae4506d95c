//! Route handlers.

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// The embedded single-page chat widget.
const WIDGET_HTML: &str = include_str!("../assets/widget.html");

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message. Validated here rather than by serde so a missing
    /// field yields a 400 with our JSON body instead of a rejection.
    pub message: Option<String>,
    /// Conversation key; browsers that don't manage sessions share "default".
    #[serde(rename = "sessionId", default = "default_session_id")]
    pub session_id: String,
}

fn default_session_id() -> String {
    "default".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub customer_count: u64,
    pub session_count: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /chat - process one user message and return the reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = body
        .message
        .ok_or_else(|| ApiError::BadRequest("Field 'message' is required".to_string()))?;

    let response = state
        .chat
        .handle_message(&message, &body.session_id)
        .await?;

    Ok(Json(ChatResponse { response }))
}

/// GET /health - liveness plus basic counts.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let customer_count = state
        .customers
        .count()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        customer_count,
        session_count: state.chat.session_count(),
    }))
}

/// GET / - serve the embedded chat widget.
pub async fn widget() -> Html<&'static str> {
    Html(WIDGET_HTML)
}
