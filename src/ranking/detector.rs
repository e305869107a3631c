use std::collections::HashSet;

use crate::models::{DetectedEvent, SubjectId};

use super::ranker::PODIUM_SIZE;
use super::snapshot::RankingSnapshot;

/// Diff two consecutive snapshots.
///
/// Returns at most two events, in queue order: the scoring event
/// (`new-point`) first, then the single highest-priority structural event
/// (`first-place` > `podium-entry` > `overtake`). An empty `previous`
/// snapshot has no baseline and yields nothing.
pub fn detect_events(previous: &RankingSnapshot, current: &RankingSnapshot) -> Vec<DetectedEvent> {
    if previous.is_empty() {
        return Vec::new();
    }

    let mut events = Vec::with_capacity(2);
    if let Some(event) = detect_new_point(previous, current) {
        events.push(event);
    }
    if let Some(event) = detect_structural(previous, current) {
        events.push(event);
    }
    events
}

/// Best-ranked seller whose monthly score grew. Sellers absent from the
/// previous snapshot do not qualify.
pub fn detect_new_point(previous: &RankingSnapshot, current: &RankingSnapshot) -> Option<DetectedEvent> {
    current
        .entries()
        .iter()
        .find(|seller| {
            previous
                .get(&seller.id)
                .is_some_and(|old| seller.score_month > old.score_month)
        })
        .map(|seller| DetectedEvent::new_point(&seller.name, &seller.avatar_url))
}

pub fn detect_structural(previous: &RankingSnapshot, current: &RankingSnapshot) -> Option<DetectedEvent> {
    detect_first_place(previous, current)
        .or_else(|| detect_podium_entry(previous, current))
        .or_else(|| detect_overtake(previous, current))
}

fn detect_first_place(previous: &RankingSnapshot, current: &RankingSnapshot) -> Option<DetectedEvent> {
    let new_leader = current.leader()?;
    let old_leader = previous.leader()?;
    (new_leader.id != old_leader.id)
        .then(|| DetectedEvent::first_place(&new_leader.name, &new_leader.avatar_url))
}

fn detect_podium_entry(previous: &RankingSnapshot, current: &RankingSnapshot) -> Option<DetectedEvent> {
    let old_podium: HashSet<&SubjectId> = previous.top(PODIUM_SIZE).iter().map(|s| &s.id).collect();

    current
        .top(PODIUM_SIZE)
        .iter()
        .find(|s| !old_podium.contains(&s.id))
        .map(|s| DetectedEvent::podium_entry(&s.name, &s.avatar_url))
}

/// First seller (in current rank order) whose rank improved. The overtaken
/// counterpart is whoever previously held that exact rank number.
fn detect_overtake(previous: &RankingSnapshot, current: &RankingSnapshot) -> Option<DetectedEvent> {
    let climber = current.entries().iter().find(|seller| {
        previous
            .get(&seller.id)
            .is_some_and(|old| seller.rank < old.rank)
    })?;

    let overtaken = previous.at_rank(climber.rank).map(|s| s.name.as_str());
    Some(DetectedEvent::overtake(&climber.name, overtaken, &climber.avatar_url))
}
