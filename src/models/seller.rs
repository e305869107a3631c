use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Cents, ScoreDimension, SubjectId};

pub const GOAL_REACHED_LABEL: &str = "Goal reached";
pub const GOAL_REMAINING_LABEL: &str = "Remaining";

/// Raw roster row as stored. Any column may be missing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RosterRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// A validated roster member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub avatar_url: String,
}

impl Subject {
    /// Rows without an identity are rejected; a missing name falls back to
    /// the identity and a missing avatar to `placeholder_avatar`.
    pub fn from_row(row: &RosterRow, placeholder_avatar: &str) -> Option<Self> {
        let id = SubjectId::parse(row.id.as_deref()?)?;

        let name = row
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string());

        let avatar_url = row
            .avatar_url
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(placeholder_avatar)
            .to_string();

        Some(Self { id, name, avatar_url })
    }
}

// ---------------------------------------------------------------------------
// SellerRecord: one ranking entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerRecord {
    pub id: SubjectId,
    pub name: String,
    pub avatar_url: String,
    pub score_day: Cents,
    pub score_week: Cents,
    pub score_month: Cents,
    pub score_year: Cents,
    /// Qualifying deals closed in the current month.
    pub deals_month: u32,
    /// Dense 1-based rank; 0 until the ranker assigns it.
    pub rank: u32,
    pub goal_label: String,
    pub goal_value: Cents,
    pub goal_target: Cents,
}

impl SellerRecord {
    pub fn score(&self, dimension: ScoreDimension) -> Cents {
        match dimension {
            ScoreDimension::Day => self.score_day,
            ScoreDimension::Week => self.score_week,
            ScoreDimension::Month => self.score_month,
            ScoreDimension::Year => self.score_year,
        }
    }

    /// Progress toward the goal in percent, one decimal place.
    /// A non-positive target reads as 0%.
    pub fn goal_percent(&self) -> Decimal {
        if self.goal_target.0 <= 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.goal_value.0) * Decimal::ONE_HUNDRED / Decimal::from(self.goal_target.0))
            .round_dp(1)
    }

    /// Width of the progress bar, capped at 100%.
    pub fn goal_bar_percent(&self) -> Decimal {
        self.goal_percent().min(Decimal::ONE_HUNDRED)
    }

    pub fn goal_tier(&self) -> GoalTier {
        GoalTier::for_percent(self.goal_percent())
    }
}

pub fn goal_label_for(value: Cents, target: Cents) -> &'static str {
    if target.0 > 0 && value >= target {
        GOAL_REACHED_LABEL
    } else {
        GOAL_REMAINING_LABEL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalTier {
    Below,
    Reached,
    Exceeded,
}

impl GoalTier {
    pub fn for_percent(percent: Decimal) -> Self {
        if percent < Decimal::ONE_HUNDRED {
            GoalTier::Below
        } else if percent < Decimal::from(150) {
            GoalTier::Reached
        } else {
            GoalTier::Exceeded
        }
    }
}

/// One slot of the secondary (podium) ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodiumEntry {
    pub place: u32,
    pub id: SubjectId,
    pub name: String,
    pub avatar_url: String,
    pub score: Cents,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: i64, target: i64) -> SellerRecord {
        SellerRecord {
            id: SubjectId::from("ana"),
            name: "Ana".into(),
            avatar_url: "/a.png".into(),
            score_day: Cents::ZERO,
            score_week: Cents::ZERO,
            score_month: Cents(value),
            score_year: Cents(value),
            deals_month: 1,
            rank: 1,
            goal_label: goal_label_for(Cents(value), Cents(target)).into(),
            goal_value: Cents(value),
            goal_target: Cents(target),
        }
    }

    #[test]
    fn test_from_row_skips_missing_identity() {
        let row = RosterRow {
            id: None,
            name: Some("Ghost".into()),
            avatar_url: None,
        };
        assert!(Subject::from_row(&row, "/placeholder.svg").is_none());

        let blank = RosterRow {
            id: Some("  ".into()),
            name: Some("Ghost".into()),
            avatar_url: None,
        };
        assert!(Subject::from_row(&blank, "/placeholder.svg").is_none());
    }

    #[test]
    fn test_from_row_fills_placeholders() {
        let row = RosterRow {
            id: Some("s-7".into()),
            name: None,
            avatar_url: Some("".into()),
        };
        let subject = Subject::from_row(&row, "/placeholder.svg").unwrap();
        assert_eq!(subject.name, "s-7");
        assert_eq!(subject.avatar_url, "/placeholder.svg");
    }

    #[test]
    fn test_goal_percent_zero_target() {
        let r = record(5_000, 0);
        assert_eq!(r.goal_percent(), Decimal::ZERO);
        assert_eq!(r.goal_tier(), GoalTier::Below);
        assert_eq!(r.goal_label, GOAL_REMAINING_LABEL);
    }

    #[test]
    fn test_goal_percent_and_tiers() {
        let half = record(2_000, 4_000);
        assert_eq!(half.goal_percent(), Decimal::from(50));
        assert_eq!(half.goal_tier(), GoalTier::Below);

        let reached = record(4_000, 4_000);
        assert_eq!(reached.goal_tier(), GoalTier::Reached);
        assert_eq!(reached.goal_label, GOAL_REACHED_LABEL);

        let exceeded = record(7_000, 4_000);
        assert_eq!(exceeded.goal_percent(), Decimal::new(1750, 1));
        assert_eq!(exceeded.goal_bar_percent(), Decimal::ONE_HUNDRED);
        assert_eq!(exceeded.goal_tier(), GoalTier::Exceeded);
    }
}
