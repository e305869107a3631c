use std::time::Duration;

use metrics::counter;
use sqlx::postgres::PgListener;
use sqlx::PgPool;
use tokio::sync::{mpsc, watch};
use tokio::time::sleep;

use crate::models::ChangeNotification;

const BASE_RECONNECT_DELAY: Duration = Duration::from_secs(2);
const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(60);

/// Subscribe to the sales change channel and forward decoded notifications
/// to the scheduler. Reconnects with capped exponential backoff until
/// `shutdown` flips or the scheduler side of the channel is gone.
pub async fn run_change_listener(
    pool: PgPool,
    channel: String,
    tx: mpsc::Sender<ChangeNotification>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut attempt: u32 = 0;

    loop {
        tracing::info!(channel = %channel, "Subscribing to change notifications...");

        match subscribe(&pool, &channel).await {
            Ok(mut listener) => {
                tracing::info!(channel = %channel, "Change listener connected");
                attempt = 0;

                loop {
                    tokio::select! {
                        msg = listener.recv() => {
                            match msg {
                                Ok(notification) => {
                                    if !forward_payload(notification.payload(), &tx).await {
                                        tracing::warn!("Scheduler channel closed, stopping change listener");
                                        return;
                                    }
                                }
                                Err(e) => {
                                    tracing::error!(error = %e, "Change listener read error");
                                    break;
                                }
                            }
                        }
                        _ = shutdown.changed() => {
                            tracing::info!("Change listener shutting down");
                            return;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, channel = %channel, "Change listener connection failed");
            }
        }

        // Exponential backoff with cap
        let delay = BASE_RECONNECT_DELAY * 2u32.saturating_pow(attempt);
        let delay = delay.min(MAX_RECONNECT_DELAY);
        attempt = attempt.saturating_add(1);
        tracing::info!(delay_secs = delay.as_secs(), attempt, "Reconnecting change listener...");

        tokio::select! {
            _ = sleep(delay) => {}
            _ = shutdown.changed() => return,
        }
    }
}

async fn subscribe(pool: &PgPool, channel: &str) -> Result<PgListener, sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(channel).await?;
    Ok(listener)
}

/// Decode one payload and hand it on. Undecodable payloads are dropped.
/// Returns `false` once the receiving side is gone.
pub async fn forward_payload(payload: &str, tx: &mpsc::Sender<ChangeNotification>) -> bool {
    counter!("change_notifications_total").increment(1);

    match ChangeNotification::from_payload(payload) {
        Ok(notification) => {
            tracing::debug!(
                op = ?notification.op,
                status = %notification.status,
                seller = ?notification.seller_id,
                "Change notification received"
            );
            tx.send(notification).await.is_ok()
        }
        Err(e) => {
            counter!("change_notifications_discarded_total").increment(1);
            tracing::warn!(error = %e, raw = %payload, "Undecodable change notification");
            true
        }
    }
}
