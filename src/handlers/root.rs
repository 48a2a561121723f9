// handlers/root.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

pub const LIVENESS_TEXT: &str = "Shoppin is running...";

/// GET / - plain text liveness string
pub async fn index() -> &'static str {
    LIVENESS_TEXT
}

/// GET /health - liveness plus a store ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable",
                    "database_error": e.to_string()
                })),
            )
        }
    }
}
