use chrono::Utc;
use metrics::gauge;
use tokio::sync::{watch, Mutex};

use crate::models::{AudioCue, DetectedEvent, EventRecord};

use super::audio::AudioGate;
use super::queue::NotificationQueue;

struct Inner {
    queue: NotificationQueue,
    audio: AudioGate,
}

/// Shared front for the event queue. Producers push, the single consumer
/// watches the head and closes it when done.
pub struct NotificationCenter {
    inner: Mutex<Inner>,
    head_tx: watch::Sender<Option<EventRecord>>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        let (head_tx, _) = watch::channel(None);
        Self {
            inner: Mutex::new(Inner {
                queue: NotificationQueue::new(),
                audio: AudioGate::new(),
            }),
            head_tx,
        }
    }

    /// Enqueue a batch in order. One batch per refresh cycle keeps
    /// cross-cycle ordering intact.
    pub async fn push(&self, events: Vec<DetectedEvent>) -> Vec<EventRecord> {
        if events.is_empty() {
            return Vec::new();
        }

        let mut inner = self.inner.lock().await;
        let now = Utc::now();
        let records: Vec<EventRecord> = events
            .into_iter()
            .map(|e| inner.queue.enqueue(e, now))
            .collect();

        for r in &records {
            tracing::info!(id = r.id, kind = %r.kind, message = %r.message, "Event enqueued");
        }

        self.publish(&inner.queue);
        records
    }

    /// Consumer signal: the head `id` has been shown long enough or was
    /// dismissed. Returns whether anything was removed.
    pub async fn close(&self, id: u64) -> bool {
        let mut inner = self.inner.lock().await;
        let closed = inner.queue.close(id).is_some();
        if closed {
            tracing::debug!(id, remaining = inner.queue.len(), "Event closed");
            self.publish(&inner.queue);
        }
        closed
    }

    pub async fn head(&self) -> Option<EventRecord> {
        self.inner.lock().await.queue.head().cloned()
    }

    pub async fn depth(&self) -> usize {
        self.inner.lock().await.queue.len()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<EventRecord>> {
        self.head_tx.subscribe()
    }

    /// Record the first user interaction. Returns `true` the first time.
    pub async fn unlock_audio(&self) -> bool {
        self.inner.lock().await.audio.unlock()
    }

    pub async fn audio_unlocked(&self) -> bool {
        self.inner.lock().await.audio.is_unlocked()
    }

    /// Cue to play for `head`, at most once per head change.
    pub async fn audio_cue_for(&self, head: Option<&EventRecord>) -> Option<AudioCue> {
        self.inner.lock().await.audio.observe(head)
    }

    fn publish(&self, queue: &NotificationQueue) {
        gauge!("notification_queue_depth").set(queue.len() as f64);

        let head = queue.head();
        self.head_tx.send_if_modified(|current| {
            if current.as_ref().map(|e| e.id) == head.map(|e| e.id) {
                return false;
            }
            *current = head.cloned();
            true
        });
    }
}
