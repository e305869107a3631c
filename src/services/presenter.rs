use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::time::{sleep_until, Instant};

use crate::api::ws_types::{AudioCueData, ClosedNotice, WsMessage};
use crate::models::EventRecord;
use crate::notify::NotificationCenter;

struct Showing {
    event: EventRecord,
    close_at: Instant,
}

/// Single consumer of the notification queue.
///
/// Shows one event at a time: on every head change the previous event is
/// announced as closed, the new head is broadcast along with its audio cue,
/// and an auto-close timer is armed for the kind's display duration. A
/// manual close (or any other head change) disarms that timer.
pub async fn run_presenter(
    center: Arc<NotificationCenter>,
    ws_tx: broadcast::Sender<WsMessage>,
    mut shutdown: watch::Receiver<bool>,
) {
    tracing::info!("Notification presenter started");

    let mut head_rx = center.subscribe();
    let mut showing: Option<Showing> = None;

    loop {
        let head = head_rx.borrow_and_update().clone();

        if head.as_ref().map(|e| e.id) != showing.as_ref().map(|s| s.event.id) {
            if let Some(prev) = showing.take() {
                let _ = ws_tx.send(WsMessage::NotificationClosed(ClosedNotice { id: prev.event.id }));
            }

            let cue = center.audio_cue_for(head.as_ref()).await;

            showing = head.map(|event| {
                tracing::info!(id = event.id, kind = %event.kind, "Showing notification");
                let _ = ws_tx.send(WsMessage::Notification(event.clone()));
                if let Some(cue) = cue {
                    let _ = ws_tx.send(WsMessage::AudioCue(AudioCueData {
                        event_id: event.id,
                        kind: event.kind,
                        cue,
                    }));
                }
                Showing {
                    close_at: Instant::now() + event.kind.display_duration(),
                    event,
                }
            });
        }

        let close_at = showing.as_ref().map(|s| s.close_at);

        tokio::select! {
            changed = head_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = sleep_until(close_at.unwrap_or_else(Instant::now)), if close_at.is_some() => {
                if let Some(s) = &showing {
                    tracing::debug!(id = s.event.id, "Auto-closing notification");
                    center.close(s.event.id).await;
                }
            }
            _ = shutdown.changed() => break,
        }
    }

    tracing::info!("Notification presenter stopped");
}
