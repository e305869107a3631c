use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

/// Liveness plus a summary of the last refresh. A failing refresh is
/// reported as degraded, not unhealthy: the board keeps serving stale data.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = match &state.db {
        Some(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
        None => true,
    };

    let board = state.board.read().await;
    let status = match (db_ok, board.error()) {
        (false, _) => "unhealthy",
        (true, Some(_)) => "degraded",
        (true, None) => "healthy",
    };

    let body = Json(json!({
        "status": status,
        "loading": board.is_loading(),
        "last_update": board.last_update(),
        "sellers": board.snapshot().len(),
        "error": board.error(),
    }));

    if db_ok {
        (StatusCode::OK, body)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, body)
    }
}
