pub mod aggregator;
pub mod detector;
pub mod period;
pub mod ranker;
pub mod snapshot;

pub use aggregator::{aggregate, normalize_roster, period_totals, PeriodTotals};
pub use detector::detect_events;
pub use period::PeriodWindows;
pub use ranker::{podium, rank_sellers};
pub use snapshot::RankingSnapshot;

use crate::models::{Cents, PodiumEntry, RosterRow, ScoreDimension, TransactionRecord};

/// Knobs for one aggregate-and-rank pass.
#[derive(Debug, Clone)]
pub struct RankingSettings {
    pub rank_dimension: ScoreDimension,
    pub podium_dimension: ScoreDimension,
    pub goal_target: Cents,
    pub placeholder_avatar: String,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            rank_dimension: ScoreDimension::Month,
            podium_dimension: ScoreDimension::Week,
            goal_target: Cents(4_000_000), // 40,000.00
            placeholder_avatar: "/placeholder.svg".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RankingOutput {
    pub snapshot: RankingSnapshot,
    pub podium: Vec<PodiumEntry>,
    pub totals: PeriodTotals,
}

/// Aggregator → Ranker over one fetched batch. Pure: identical inputs give
/// identical output.
pub fn compute_ranking(
    roster_rows: &[RosterRow],
    transactions: &[TransactionRecord],
    windows: &PeriodWindows,
    settings: &RankingSettings,
) -> RankingOutput {
    let roster = normalize_roster(roster_rows, &settings.placeholder_avatar);
    let records = aggregate(&roster, transactions, windows, settings.goal_target);
    let ranked = rank_sellers(records, settings.rank_dimension);
    let podium = podium(&ranked, settings.podium_dimension);
    let totals = period_totals(transactions, windows);

    RankingOutput {
        snapshot: RankingSnapshot::new(ranked, windows.now),
        podium,
        totals,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DealStatus, SubjectId};
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn test_compute_ranking_is_idempotent() {
        let windows = PeriodWindows::at(
            Utc.with_ymd_and_hms(2026, 10, 21, 12, 0, 0).unwrap(),
            FixedOffset::east_opt(0).unwrap(),
        );
        let rows: Vec<RosterRow> = ["cid", "ana", "bob"]
            .iter()
            .map(|id| RosterRow {
                id: Some(id.to_string()),
                name: Some(id.to_uppercase()),
                avatar_url: None,
            })
            .collect();
        let txs: Vec<TransactionRecord> = [("ana", 500), ("bob", 500), ("cid", 900)]
            .iter()
            .map(|(id, c)| TransactionRecord {
                subject_id: SubjectId::from(*id),
                amount: Cents(*c),
                status: DealStatus::Won,
                completed_at: Some(Utc.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap()),
            })
            .collect();

        let settings = RankingSettings::default();
        let first = compute_ranking(&rows, &txs, &windows, &settings);
        let second = compute_ranking(&rows, &txs, &windows, &settings);

        assert_eq!(first.snapshot.entries(), second.snapshot.entries());
        let ids: Vec<&str> = first.snapshot.entries().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["cid", "ana", "bob"]);
        assert_eq!(first.totals.month, Cents(1_900));
        assert_eq!(first.podium.len(), 3);
    }
}
