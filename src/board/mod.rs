pub mod paginator;

pub use paginator::Paginator;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::{Cents, DetectedEvent, PodiumEntry, SellerRecord};
use crate::ranking::{detect_events, PeriodTotals, RankingOutput, RankingSnapshot};

pub type SharedBoard = Arc<RwLock<Board>>;

/// Everything the display reads. Replaced wholesale on each successful
/// refresh; the held snapshot is the baseline for the next diff.
#[derive(Debug, Clone)]
pub struct Board {
    snapshot: Arc<RankingSnapshot>,
    podium: Vec<PodiumEntry>,
    totals: PeriodTotals,
    year_total_offset: Cents,
    last_update: Option<DateTime<Utc>>,
    error: Option<String>,
    loading: bool,
    paginator: Paginator,
}

impl Board {
    pub fn new(page_size: usize, year_total_offset: Cents) -> Self {
        Self {
            snapshot: Arc::new(RankingSnapshot::empty()),
            podium: Vec::new(),
            totals: PeriodTotals::default(),
            year_total_offset,
            last_update: None,
            error: None,
            loading: true,
            paginator: Paginator::new(page_size),
        }
    }

    pub fn shared(self) -> SharedBoard {
        Arc::new(RwLock::new(self))
    }

    /// Diff the new ranking against the held snapshot, then swap it in.
    /// Returns the events to enqueue, in queue order.
    pub fn apply_success(&mut self, output: RankingOutput, at: DateTime<Utc>) -> Vec<DetectedEvent> {
        let events = detect_events(&self.snapshot, &output.snapshot);

        self.paginator.set_len(output.snapshot.len());
        self.snapshot = Arc::new(output.snapshot);
        self.podium = output.podium;
        self.totals = output.totals;
        self.last_update = Some(at);
        self.error = None;
        self.loading = false;

        events
    }

    /// Keep the ranking and the held snapshot; surface the error.
    pub fn apply_failure(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    pub fn snapshot(&self) -> Arc<RankingSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn podium(&self) -> &[PodiumEntry] {
        &self.podium
    }

    /// Period totals with the configured offset applied to the yearly figure.
    pub fn totals(&self) -> PeriodTotals {
        PeriodTotals {
            year: self.totals.year + self.year_total_offset,
            ..self.totals
        }
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn current_page(&self) -> &[SellerRecord] {
        self.paginator.slice(self.snapshot.entries())
    }

    pub fn next_page(&mut self) -> usize {
        self.paginator.next()
    }

    pub fn prev_page(&mut self) -> usize {
        self.paginator.prev()
    }
}
