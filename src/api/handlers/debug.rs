use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::EventKind;
use crate::notify::inject_event;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct InjectRequest {
    pub kind: String,
    pub message: Option<String>,
    pub avatar_url: Option<String>,
}

/// POST /api/debug/events: Enqueue an event by hand for QA.
pub async fn inject(
    State(state): State<AppState>,
    Json(req): Json<InjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let kind = EventKind::from_api_str(&req.kind)
        .ok_or_else(|| AppError::BadRequest(format!("unknown event kind '{}'", req.kind)))?;

    let record = inject_event(&state.center, kind, req.message, req.avatar_url)
        .await
        .ok_or_else(|| anyhow::anyhow!("event was not enqueued"))?;

    Ok((StatusCode::CREATED, Json(record)))
}
