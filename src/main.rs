use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};

use salesboard::api::router::create_router;
use salesboard::api::ws_types::WsMessage;
use salesboard::board::Board;
use salesboard::config::AppConfig;
use salesboard::ingestion::{run_change_listener, RefreshContext};
use salesboard::models::ChangeNotification;
use salesboard::notify::NotificationCenter;
use salesboard::services::{run_page_rotation, run_presenter, run_refresh_scheduler};
use salesboard::source::PgDataSource;
use salesboard::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let metrics_handle = metrics::init_metrics()?;

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    if config.run_migrations {
        db::run_migrations(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (ws_tx, _) = broadcast::channel::<WsMessage>(256);

    let board = Board::new(config.page_size, config.year_total_offset).shared();
    let center = Arc::new(NotificationCenter::new());

    // --- Refresh pipeline: change listener → scheduler → board + queue ---
    let (change_tx, change_rx) = mpsc::channel::<ChangeNotification>(256);

    {
        let pool = pool.clone();
        let channel = config.notify_channel.clone();
        let shutdown = shutdown_rx.clone();
        tokio::spawn(async move {
            run_change_listener(pool, channel, change_tx, shutdown).await;
        });
    }

    let ctx = RefreshContext {
        source: Arc::new(PgDataSource::new(pool.clone())),
        board: board.clone(),
        center: center.clone(),
        settings: config.ranking_settings(),
        utc_offset: config.utc_offset,
        ws_tx: Some(ws_tx.clone()),
    };
    tokio::spawn(run_refresh_scheduler(
        ctx,
        change_rx,
        config.refresh_debounce,
        config.refresh_interval,
        shutdown_rx.clone(),
    ));

    // --- Display loops ---
    tokio::spawn(run_presenter(center.clone(), ws_tx.clone(), shutdown_rx.clone()));
    tokio::spawn(run_page_rotation(
        board.clone(),
        config.page_rotation,
        ws_tx.clone(),
        shutdown_rx.clone(),
    ));

    tracing::info!(
        rank = %config.rank_dimension,
        podium = %config.podium_dimension,
        goal = %config.goal_target,
        page_size = config.page_size,
        "Leaderboard services spawned"
    );

    let state = AppState {
        db: Some(pool),
        config,
        board,
        center,
        ws_tx,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            }
            tracing::info!("Shutdown requested");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
