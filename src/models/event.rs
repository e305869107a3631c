use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Placeholder used when the overtaken seller cannot be resolved.
pub const UNKNOWN_OPPONENT: &str = "an opponent";

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    FirstPlace,
    #[serde(alias = "podium")]
    PodiumEntry,
    Overtake,
    NewPoint,
}

impl EventKind {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "first-place" => Some(EventKind::FirstPlace),
            "podium-entry" | "podium" => Some(EventKind::PodiumEntry),
            "overtake" => Some(EventKind::Overtake),
            "new-point" => Some(EventKind::NewPoint),
            _ => None,
        }
    }

    /// Minimum time the consumer keeps an event of this kind on screen.
    pub fn display_duration(self) -> Duration {
        match self {
            EventKind::FirstPlace => Duration::from_secs(10),
            EventKind::PodiumEntry | EventKind::Overtake => Duration::from_secs(8),
            EventKind::NewPoint => Duration::from_secs(4),
        }
    }

    pub fn audio_cue(self) -> AudioCue {
        match self {
            EventKind::Overtake => AudioCue::Overtake,
            EventKind::FirstPlace | EventKind::PodiumEntry => AudioCue::Fanfare,
            EventKind::NewPoint => AudioCue::Chime,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::FirstPlace => write!(f, "first-place"),
            EventKind::PodiumEntry => write!(f, "podium-entry"),
            EventKind::Overtake => write!(f, "overtake"),
            EventKind::NewPoint => write!(f, "new-point"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    Overtake,
    Fanfare,
    Chime,
}

// ---------------------------------------------------------------------------
// DetectedEvent: an event before it is queued
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedEvent {
    pub kind: EventKind,
    pub message: String,
    pub avatar_url: Option<String>,
}

impl DetectedEvent {
    pub fn first_place(name: &str, avatar_url: &str) -> Self {
        Self {
            kind: EventKind::FirstPlace,
            message: format!("{name} took first place!"),
            avatar_url: Some(avatar_url.to_string()),
        }
    }

    pub fn podium_entry(name: &str, avatar_url: &str) -> Self {
        Self {
            kind: EventKind::PodiumEntry,
            message: format!("{name} entered the Top 3!"),
            avatar_url: Some(avatar_url.to_string()),
        }
    }

    pub fn overtake(name: &str, overtaken: Option<&str>, avatar_url: &str) -> Self {
        Self {
            kind: EventKind::Overtake,
            message: format!("{name} passed {}!", overtaken.unwrap_or(UNKNOWN_OPPONENT)),
            avatar_url: Some(avatar_url.to_string()),
        }
    }

    pub fn new_point(name: &str, avatar_url: &str) -> Self {
        Self {
            kind: EventKind::NewPoint,
            message: format!("{name} closed a new deal!"),
            avatar_url: Some(avatar_url.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// EventRecord: a queued event; never mutated after creation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Monotonic creation order assigned by the queue.
    pub id: u64,
    pub kind: EventKind,
    pub message: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
