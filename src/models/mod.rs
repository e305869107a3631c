pub mod event;
pub mod seller;
pub mod transaction;

pub use event::{AudioCue, DetectedEvent, EventKind, EventRecord};
pub use seller::{GoalTier, PodiumEntry, RosterRow, SellerRecord, Subject};
pub use transaction::{ChangeNotification, ChangeOp, DealStatus, TransactionRecord};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// ---------------------------------------------------------------------------
// SubjectId: stable key every diff is matched on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Returns `None` for blank identities so malformed rows can be skipped.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Cents: integer minor units, converted to currency only for display
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    /// Convert a currency amount to cents, rounding half away from zero.
    /// Negative or out-of-range amounts yield `None`.
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return None;
        }
        let minor = amount
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        minor.to_i64().map(Cents)
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Cents) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, |acc, c| acc + c)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

// ---------------------------------------------------------------------------
// ScoreDimension
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreDimension {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl ScoreDimension {
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Some(ScoreDimension::Day),
            "week" | "weekly" => Some(ScoreDimension::Week),
            "month" | "monthly" => Some(ScoreDimension::Month),
            "year" | "yearly" => Some(ScoreDimension::Year),
            _ => None,
        }
    }
}

impl fmt::Display for ScoreDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreDimension::Day => write!(f, "day"),
            ScoreDimension::Week => write!(f, "week"),
            ScoreDimension::Month => write!(f, "month"),
            ScoreDimension::Year => write!(f, "year"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_from_decimal_rounds() {
        assert_eq!(Cents::from_decimal(Decimal::new(12345, 3)), Some(Cents(1235)));
        assert_eq!(Cents::from_decimal(Decimal::from(40)), Some(Cents(4000)));
        assert_eq!(Cents::from_decimal(Decimal::ZERO), Some(Cents::ZERO));
    }

    #[test]
    fn test_cents_rejects_negative() {
        assert_eq!(Cents::from_decimal(Decimal::new(-1, 2)), None);
    }

    #[test]
    fn test_cents_rejects_overflow() {
        assert_eq!(Cents::from_decimal(Decimal::MAX), None);
        let huge = Decimal::from_str_exact("1000000000000000000000000000").unwrap();
        assert_eq!(Cents::from_decimal(huge), None);
        // fits a Decimal after scaling but not an i64
        assert_eq!(Cents::from_decimal(Decimal::from(i64::MAX)), None);
    }

    #[test]
    fn test_cents_display() {
        assert_eq!(Cents(150_000).to_string(), "1500.00");
        assert_eq!(Cents(5).to_string(), "0.05");
    }

    #[test]
    fn test_subject_id_parse_blank() {
        assert!(SubjectId::parse("   ").is_none());
        assert_eq!(SubjectId::parse(" ana ").unwrap().as_str(), "ana");
    }

    #[test]
    fn test_dimension_from_config() {
        assert_eq!(ScoreDimension::from_config_str("Weekly"), Some(ScoreDimension::Week));
        assert_eq!(ScoreDimension::from_config_str("month"), Some(ScoreDimension::Month));
        assert_eq!(ScoreDimension::from_config_str("quarter"), None);
    }
}
