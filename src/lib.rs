pub mod api;
pub mod board;
pub mod config;
pub mod db;
pub mod errors;
pub mod ingestion;
pub mod metrics;
pub mod models;
pub mod notify;
pub mod ranking;
pub mod services;
pub mod source;

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::api::ws_types::WsMessage;
use crate::board::SharedBoard;
use crate::config::AppConfig;
use crate::notify::NotificationCenter;

#[derive(Clone)]
pub struct AppState {
    /// `None` when the board is fed by something other than Postgres.
    pub db: Option<sqlx::PgPool>,
    pub config: AppConfig,
    pub board: SharedBoard,
    pub center: Arc<NotificationCenter>,
    pub ws_tx: broadcast::Sender<WsMessage>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
