use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use tokio::sync::broadcast;

use salesboard::api::ws_types::WsMessage;
use salesboard::board::Board;
use salesboard::ingestion::RefreshContext;
use salesboard::models::{Cents, DealStatus, RosterRow, SubjectId, TransactionRecord};
use salesboard::notify::NotificationCenter;
use salesboard::ranking::{PeriodWindows, RankingSettings};
use salesboard::source::{DataSource, SourceBatch, SourceError};

/// In-memory data source. Scripted responses are served in order; once the
/// script runs dry the last successful batch is repeated.
#[derive(Default)]
pub struct FakeSource {
    script: Mutex<VecDeque<Result<SourceBatch, String>>>,
    last: Mutex<SourceBatch>,
    fetches: AtomicUsize,
    delay: Mutex<Option<Duration>>,
}

#[allow(dead_code)]
impl FakeSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, batch: SourceBatch) {
        self.script.lock().unwrap().push_back(Ok(batch));
    }

    pub fn push_err(&self, message: &str) {
        self.script.lock().unwrap().push_back(Err(message.to_string()));
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for FakeSource {
    async fn fetch(&self, _since: DateTime<Utc>) -> Result<SourceBatch, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(batch)) => {
                *self.last.lock().unwrap() = batch.clone();
                Ok(batch)
            }
            Some(Err(message)) => Err(SourceError::Unavailable(message)),
            None => Ok(self.last.lock().unwrap().clone()),
        }
    }
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

/// Start of today: inside every period window and never in the future.
pub fn today() -> DateTime<Utc> {
    PeriodWindows::at(Utc::now(), utc()).day_start
}

/// One roster entry per seller and one won sale per score, all completed today.
/// Scores are whole currency units.
pub fn batch(scores: &[(&str, i64)]) -> SourceBatch {
    let roster = scores
        .iter()
        .map(|(id, _)| RosterRow {
            id: Some(id.to_string()),
            name: Some(capitalize(id)),
            avatar_url: Some(format!("/avatars/{id}.png")),
        })
        .collect();

    let transactions = scores
        .iter()
        .filter(|(_, score)| *score > 0)
        .map(|(id, score)| TransactionRecord {
            subject_id: SubjectId::from(*id),
            amount: Cents(score * 100),
            status: DealStatus::Won,
            completed_at: Some(today()),
        })
        .collect();

    SourceBatch { roster, transactions }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[allow(dead_code)]
pub struct Harness {
    pub ctx: RefreshContext,
    pub source: Arc<FakeSource>,
    pub ws_rx: broadcast::Receiver<WsMessage>,
}

pub fn harness(source: Arc<FakeSource>) -> Harness {
    let (ws_tx, ws_rx) = broadcast::channel(64);
    let ctx = RefreshContext {
        source: source.clone(),
        board: Board::new(14, Cents::ZERO).shared(),
        center: Arc::new(NotificationCenter::new()),
        settings: RankingSettings::default(),
        utc_offset: utc(),
        ws_tx: Some(ws_tx),
    };
    Harness { ctx, source, ws_rx }
}
