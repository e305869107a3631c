use std::sync::Arc;
use std::time::Instant;

use chrono::{FixedOffset, Utc};
use metrics::{counter, gauge, histogram};
use tokio::sync::broadcast;

use crate::api::ws_types::{RankingUpdate, RefreshFailure, WsMessage};
use crate::board::SharedBoard;
use crate::notify::NotificationCenter;
use crate::ranking::{compute_ranking, PeriodWindows, RankingSettings};
use crate::source::DataSource;

/// Everything one refresh cycle touches.
#[derive(Clone)]
pub struct RefreshContext {
    pub source: Arc<dyn DataSource>,
    pub board: SharedBoard,
    pub center: Arc<NotificationCenter>,
    pub settings: RankingSettings,
    pub utc_offset: FixedOffset,
    pub ws_tx: Option<broadcast::Sender<WsMessage>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Updated { sellers: usize, events: usize },
    Failed(String),
}

/// Run Aggregator → Ranker → EventDetector once:
/// 1. Fetch roster and transactions from the earliest period boundary
/// 2. Aggregate and rank (pure, outside any lock)
/// 3. Diff against the held snapshot and swap it in under one write lock
/// 4. Enqueue detected events
///
/// A failed fetch leaves the board's ranking and snapshot untouched and only
/// sets the error banner; the next trigger retries.
pub async fn run_refresh_cycle(ctx: &RefreshContext) -> CycleOutcome {
    let start = Instant::now();
    let now = Utc::now();
    let windows = PeriodWindows::at(now, ctx.utc_offset);

    counter!("refresh_cycles_total").increment(1);

    let batch = match ctx.source.fetch(windows.earliest()).await {
        Ok(batch) => batch,
        Err(e) => {
            let message = format!("Could not load ranking: {e}");
            tracing::warn!(error = %e, "Refresh cycle failed, keeping previous ranking");
            counter!("refresh_failures_total").increment(1);

            ctx.board.write().await.apply_failure(message.clone());
            broadcast(ctx, WsMessage::RefreshFailed(RefreshFailure {
                error: message.clone(),
            }));

            histogram!("refresh_latency_seconds").record(start.elapsed().as_secs_f64());
            return CycleOutcome::Failed(message);
        }
    };

    let output = compute_ranking(&batch.roster, &batch.transactions, &windows, &ctx.settings);
    let sellers = output.snapshot.len();

    let (events, total_pages) = {
        let mut board = ctx.board.write().await;
        let events = board.apply_success(output, now);
        (events, board.paginator().total_pages())
    };

    let event_count = events.len();
    if event_count > 0 {
        counter!("events_detected_total").increment(event_count as u64);
    }
    ctx.center.push(events).await;

    gauge!("leaderboard_sellers").set(sellers as f64);
    histogram!("refresh_latency_seconds").record(start.elapsed().as_secs_f64());

    tracing::info!(
        sellers,
        transactions = batch.transactions.len(),
        events = event_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Ranking refreshed"
    );

    broadcast(ctx, WsMessage::RankingUpdate(RankingUpdate {
        last_update: now,
        sellers,
        total_pages,
    }));

    CycleOutcome::Updated {
        sellers,
        events: event_count,
    }
}

fn broadcast(ctx: &RefreshContext, msg: WsMessage) {
    if let Some(tx) = &ctx.ws_tx {
        // No subscribers is fine
        let _ = tx.send(msg);
    }
}
