use std::cmp::Ordering;

use crate::models::seller::goal_label_for;
use crate::models::{PodiumEntry, ScoreDimension, SellerRecord};

pub const PODIUM_SIZE: usize = 3;

/// Descending score, then identity ascending so ties are reproducible
/// regardless of input order.
fn compare(a: &SellerRecord, b: &SellerRecord, dimension: ScoreDimension) -> Ordering {
    b.score(dimension)
        .cmp(&a.score(dimension))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort by `dimension` and assign dense ranks 1..N. The goal metric is
/// rebuilt to mirror the ranked dimension.
pub fn rank_sellers(mut records: Vec<SellerRecord>, dimension: ScoreDimension) -> Vec<SellerRecord> {
    records.sort_by(|a, b| compare(a, b, dimension));

    for (i, record) in records.iter_mut().enumerate() {
        record.rank = (i + 1) as u32;
        record.goal_value = record.score(dimension);
        record.goal_label = goal_label_for(record.goal_value, record.goal_target).to_string();
    }

    records
}

/// Top three by a secondary dimension. Leaves the primary ranking untouched.
pub fn podium(records: &[SellerRecord], dimension: ScoreDimension) -> Vec<PodiumEntry> {
    let mut ordered: Vec<&SellerRecord> = records.iter().collect();
    ordered.sort_by(|a, b| compare(a, b, dimension));

    ordered
        .into_iter()
        .take(PODIUM_SIZE)
        .enumerate()
        .map(|(i, r)| PodiumEntry {
            place: (i + 1) as u32,
            id: r.id.clone(),
            name: r.name.clone(),
            avatar_url: r.avatar_url.clone(),
            score: r.score(dimension),
        })
        .collect()
}
