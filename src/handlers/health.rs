use axum::{extract::State, http::StatusCode};

use crate::middleware::{ApiResponse, Envelope};
use crate::state::AppState;

/// GET /health - liveness plus a storage round trip
pub async fn health(State(state): State<AppState>) -> ApiResponse {
    match state.store.ping().await {
        Ok(()) => ApiResponse::success(Envelope::message("ok")),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            ApiResponse::with_status(
                Envelope {
                    message: Some("degraded".to_string()),
                    error: Some("database unavailable".to_string()),
                    ..Envelope::default()
                },
                StatusCode::SERVICE_UNAVAILABLE,
            )
        }
    }
}
