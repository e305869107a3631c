use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::api::ws_types::{PageChange, WsMessage};
use crate::board::SharedBoard;

/// Advance the leaderboard page every `period`, wrapping to the first page.
/// Manual prev/next does not reset this timer.
pub async fn run_page_rotation(
    board: SharedBoard,
    period: Duration,
    ws_tx: broadcast::Sender<WsMessage>,
    mut shutdown: watch::Receiver<bool>,
) {
    tracing::info!(period_secs = period.as_secs(), "Page rotation started");

    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let change = {
                    let mut board = board.write().await;
                    let page = board.next_page();
                    PageChange {
                        page,
                        total_pages: board.paginator().total_pages(),
                    }
                };
                if change.total_pages > 1 {
                    tracing::debug!(page = change.page, total_pages = change.total_pages, "Page rotated");
                    let _ = ws_tx.send(WsMessage::PageChange(change));
                }
            }
            _ = shutdown.changed() => break,
        }
    }

    tracing::info!("Page rotation stopped");
}
