use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render))
        // Leaderboard
        .route("/api/leaderboard", get(handlers::leaderboard::current_page))
        .route("/api/leaderboard/all", get(handlers::leaderboard::all))
        .route("/api/leaderboard/page/next", post(handlers::leaderboard::next_page))
        .route("/api/leaderboard/page/prev", post(handlers::leaderboard::prev_page))
        // Notifications
        .route("/api/notifications/current", get(handlers::notifications::current))
        .route("/api/notifications/:id/close", post(handlers::notifications::close))
        .route("/api/audio/unlock", post(handlers::notifications::unlock_audio))
        // WebSocket
        .route("/ws", get(handlers::ws::handler));

    #[cfg(any(debug_assertions, feature = "test-hooks"))]
    let router = router.route("/api/debug/events", post(handlers::debug::inject));

    // Read-only display surface; any origin may embed it
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
