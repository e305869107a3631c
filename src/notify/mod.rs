pub mod audio;
pub mod center;
pub mod queue;

pub use audio::AudioGate;
pub use center::NotificationCenter;
pub use queue::NotificationQueue;

#[cfg(any(debug_assertions, feature = "test-hooks"))]
use crate::models::{DetectedEvent, EventKind, EventRecord};

/// Manual QA entry point: enqueue an event directly, bypassing detection.
/// Compiled out of release builds unless the `test-hooks` feature is on.
#[cfg(any(debug_assertions, feature = "test-hooks"))]
pub async fn inject_event(
    center: &NotificationCenter,
    kind: EventKind,
    message: Option<String>,
    avatar_url: Option<String>,
) -> Option<EventRecord> {
    let message = message.filter(|m| !m.trim().is_empty()).unwrap_or_else(|| {
        match kind {
            EventKind::NewPoint => "New deal closed!",
            _ => "Test message",
        }
        .to_string()
    });

    tracing::info!(kind = %kind, message = %message, "Injecting test event");

    center
        .push(vec![DetectedEvent {
            kind,
            message,
            avatar_url,
        }])
        .await
        .pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inject_uses_default_message() {
        let center = NotificationCenter::new();
        let record = inject_event(&center, EventKind::NewPoint, None, None).await.unwrap();
        assert_eq!(record.message, "New deal closed!");

        let record = inject_event(&center, EventKind::FirstPlace, Some("  ".into()), None)
            .await
            .unwrap();
        assert_eq!(record.message, "Test message");
        assert_eq!(center.depth().await, 2);
    }

    #[tokio::test]
    async fn test_inject_does_not_interrupt_head() {
        let center = NotificationCenter::new();
        let first = inject_event(&center, EventKind::Overtake, Some("Bob passed Ana!".into()), None)
            .await
            .unwrap();
        inject_event(&center, EventKind::FirstPlace, None, Some("/c.png".into())).await;
        assert_eq!(center.head().await.unwrap().id, first.id);
    }
}
