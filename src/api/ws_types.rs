use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{AudioCue, EventKind, EventRecord};

/// Messages broadcast to all connected dashboard clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WsMessage {
    #[serde(rename = "ranking_update")]
    RankingUpdate(RankingUpdate),

    #[serde(rename = "refresh_failed")]
    RefreshFailed(RefreshFailure),

    #[serde(rename = "page_change")]
    PageChange(PageChange),

    #[serde(rename = "notification")]
    Notification(EventRecord),

    #[serde(rename = "notification_closed")]
    NotificationClosed(ClosedNotice),

    #[serde(rename = "audio_cue")]
    AudioCue(AudioCueData),
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingUpdate {
    pub last_update: DateTime<Utc>,
    pub sellers: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshFailure {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageChange {
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClosedNotice {
    pub id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudioCueData {
    pub event_id: u64,
    pub kind: EventKind,
    pub cue: AudioCue,
}
