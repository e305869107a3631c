use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::seller::GOAL_REMAINING_LABEL;
use crate::models::{Cents, RosterRow, SellerRecord, Subject, SubjectId, TransactionRecord};

use super::period::PeriodWindows;

/// Board-wide totals over every qualifying transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub day: Cents,
    pub week: Cents,
    pub month: Cents,
    pub year: Cents,
    pub deals_month: u32,
}

#[derive(Debug, Clone, Copy, Default)]
struct Buckets {
    day: Cents,
    week: Cents,
    month: Cents,
    year: Cents,
    deals_month: u32,
}

impl Buckets {
    fn add(&mut self, amount: Cents, ts: DateTime<Utc>, windows: &PeriodWindows) {
        if ts >= windows.day_start {
            self.day += amount;
        }
        if ts >= windows.week_start {
            self.week += amount;
        }
        if ts >= windows.month_start {
            self.month += amount;
            self.deals_month += 1;
        }
        if ts >= windows.year_start {
            self.year += amount;
        }
    }
}

/// Validate raw roster rows: rows lacking an identity are skipped and
/// duplicate identities keep their first occurrence.
pub fn normalize_roster(rows: &[RosterRow], placeholder_avatar: &str) -> Vec<Subject> {
    let mut seen: HashSet<SubjectId> = HashSet::with_capacity(rows.len());
    let mut subjects = Vec::with_capacity(rows.len());

    for row in rows {
        let Some(subject) = Subject::from_row(row, placeholder_avatar) else {
            tracing::warn!(name = ?row.name, "Roster row without identity, skipping");
            continue;
        };
        if !seen.insert(subject.id.clone()) {
            tracing::warn!(id = %subject.id, "Duplicate roster identity, keeping first");
            continue;
        }
        subjects.push(subject);
    }

    subjects
}

/// Completion time of a transaction that counts toward scoring, if any.
fn qualifying_time(tx: &TransactionRecord, windows: &PeriodWindows) -> Option<DateTime<Utc>> {
    if !tx.status.is_won() || tx.amount.0 < 0 {
        return None;
    }
    tx.completed_at.filter(|ts| *ts <= windows.now)
}

/// Sum qualifying transactions per roster subject and period.
///
/// Every roster subject appears in the output, with zero totals when it has
/// no qualifying activity. Ranks are left at 0 for the ranker to assign.
pub fn aggregate(
    roster: &[Subject],
    transactions: &[TransactionRecord],
    windows: &PeriodWindows,
    goal_target: Cents,
) -> Vec<SellerRecord> {
    let mut buckets: HashMap<&SubjectId, Buckets> = HashMap::with_capacity(roster.len());

    for tx in transactions {
        if let Some(ts) = qualifying_time(tx, windows) {
            buckets
                .entry(&tx.subject_id)
                .or_default()
                .add(tx.amount, ts, windows);
        }
    }

    roster
        .iter()
        .map(|subject| {
            let b = buckets.get(&subject.id).copied().unwrap_or_default();
            SellerRecord {
                id: subject.id.clone(),
                name: subject.name.clone(),
                avatar_url: subject.avatar_url.clone(),
                score_day: b.day,
                score_week: b.week,
                score_month: b.month,
                score_year: b.year,
                deals_month: b.deals_month,
                rank: 0,
                goal_label: GOAL_REMAINING_LABEL.to_string(),
                goal_value: Cents::ZERO,
                goal_target,
            }
        })
        .collect()
}

/// Totals across all qualifying transactions, including sellers that are
/// not (or no longer) on the roster.
pub fn period_totals(transactions: &[TransactionRecord], windows: &PeriodWindows) -> PeriodTotals {
    let mut b = Buckets::default();
    for tx in transactions {
        if let Some(ts) = qualifying_time(tx, windows) {
            b.add(tx.amount, ts, windows);
        }
    }
    PeriodTotals {
        day: b.day,
        week: b.week,
        month: b.month,
        year: b.year,
        deals_month: b.deals_month,
    }
}
