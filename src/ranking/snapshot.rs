use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{SellerRecord, SubjectId};

/// One complete ranked output of the pipeline. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct RankingSnapshot {
    entries: Vec<SellerRecord>,
    index: HashMap<SubjectId, usize>,
    computed_at: Option<DateTime<Utc>>,
}

impl RankingSnapshot {
    /// `ranked` must already be in rank order (output of the ranker).
    pub fn new(ranked: Vec<SellerRecord>, computed_at: DateTime<Utc>) -> Self {
        let index = ranked
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        Self {
            entries: ranked,
            index,
            computed_at: Some(computed_at),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[SellerRecord] {
        &self.entries
    }

    pub fn computed_at(&self) -> Option<DateTime<Utc>> {
        self.computed_at
    }

    pub fn leader(&self) -> Option<&SellerRecord> {
        self.entries.first()
    }

    pub fn top(&self, n: usize) -> &[SellerRecord] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn get(&self, id: &SubjectId) -> Option<&SellerRecord> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Whoever holds the 1-based `rank` in this snapshot.
    pub fn at_rank(&self, rank: u32) -> Option<&SellerRecord> {
        let i = (rank as usize).checked_sub(1)?;
        self.entries.get(i)
    }
}
