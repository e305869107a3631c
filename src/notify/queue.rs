use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::models::{DetectedEvent, EventRecord};

/// Strict FIFO of events with a single consumer-visible head.
///
/// Enqueue never disturbs the head; only the consumer removes it. The queue
/// knows nothing about display durations.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    events: VecDeque<EventRecord>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, event: DetectedEvent, at: DateTime<Utc>) -> EventRecord {
        self.next_id += 1;
        let record = EventRecord {
            id: self.next_id,
            kind: event.kind,
            message: event.message,
            avatar_url: event.avatar_url,
            created_at: at,
        };
        self.events.push_back(record.clone());
        record
    }

    pub fn head(&self) -> Option<&EventRecord> {
        self.events.front()
    }

    pub fn dequeue(&mut self) -> Option<EventRecord> {
        self.events.pop_front()
    }

    /// Remove the head only if it is event `id`. A close signal for anything
    /// else (already closed, or not yet shown) is ignored.
    pub fn close(&mut self, id: u64) -> Option<EventRecord> {
        if self.head().is_some_and(|h| h.id == id) {
            self.dequeue()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventKind;

    fn queue_with(names: &[&str]) -> NotificationQueue {
        let mut q = NotificationQueue::new();
        for name in names {
            q.enqueue(DetectedEvent::new_point(name, "/x.png"), Utc::now());
        }
        q
    }

    #[test]
    fn test_fifo_order() {
        let mut q = queue_with(&["Ana", "Bob", "Cid"]);
        assert_eq!(q.dequeue().unwrap().message, "Ana closed a new deal!");
        assert_eq!(q.dequeue().unwrap().message, "Bob closed a new deal!");
        assert_eq!(q.dequeue().unwrap().message, "Cid closed a new deal!");
        assert!(q.dequeue().is_none());
    }

    #[test]
    fn test_enqueue_does_not_change_head() {
        let mut q = queue_with(&["Ana"]);
        let head_id = q.head().unwrap().id;
        q.enqueue(DetectedEvent::first_place("Bob", "/b.png"), Utc::now());
        assert_eq!(q.head().unwrap().id, head_id);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_ids_are_creation_order() {
        let mut q = NotificationQueue::new();
        let a = q.enqueue(DetectedEvent::new_point("Ana", "/a.png"), Utc::now());
        let b = q.enqueue(DetectedEvent::podium_entry("Bob", "/b.png"), Utc::now());
        assert!(a.id < b.id);
        assert_eq!(b.kind, EventKind::PodiumEntry);
    }

    #[test]
    fn test_close_only_removes_matching_head() {
        let mut q = queue_with(&["Ana", "Bob"]);
        let second = q.events[1].id;
        assert!(q.close(second).is_none());
        assert_eq!(q.len(), 2);

        let head = q.head().unwrap().id;
        assert_eq!(q.close(head).unwrap().id, head);
        assert_eq!(q.head().unwrap().id, second);
        assert!(q.close(head).is_none());
    }
}
