use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::errors::AppError;
use crate::AppState;

/// GET /api/notifications/current: The event on screen, if any.
pub async fn current(State(state): State<AppState>) -> impl IntoResponse {
    let head = state.center.head().await;
    let depth = state.center.depth().await;
    Json(json!({
        "current": head,
        "queued": depth,
    }))
}

/// POST /api/notifications/:id/close: Manual dismissal of the head.
pub async fn close(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.center.close(id).await {
        return Err(AppError::NotFound(format!("notification {id} is not on screen")));
    }
    tracing::info!(id, "Notification dismissed");
    Ok((StatusCode::OK, Json(json!({ "success": true, "closed": id }))))
}

/// POST /api/audio/unlock: First user interaction; enables sound cues.
pub async fn unlock_audio(State(state): State<AppState>) -> impl IntoResponse {
    let first = state.center.unlock_audio().await;
    if first {
        tracing::info!("Audio unlocked");
    }
    Json(json!({ "unlocked": true, "first": first }))
}
