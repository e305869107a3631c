use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::{Cents, SubjectId};

// ---------------------------------------------------------------------------
// DealStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DealStatus {
    Won,
    Open,
    Lost,
    Other(String),
}

impl DealStatus {
    pub fn from_db_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "won" => DealStatus::Won,
            "open" => DealStatus::Open,
            "lost" => DealStatus::Lost,
            other => DealStatus::Other(other.to_string()),
        }
    }

    pub fn is_won(&self) -> bool {
        matches!(self, DealStatus::Won)
    }
}

impl From<String> for DealStatus {
    fn from(s: String) -> Self {
        DealStatus::from_db_str(&s)
    }
}

impl From<DealStatus> for String {
    fn from(status: DealStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealStatus::Won => write!(f, "won"),
            DealStatus::Open => write!(f, "open"),
            DealStatus::Lost => write!(f, "lost"),
            DealStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionRecord
// ---------------------------------------------------------------------------

/// A closed (or closing) deal attributed to one seller.
/// A record without a completion timestamp never lands in any period bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub subject_id: SubjectId,
    pub amount: Cents,
    pub status: DealStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// ChangeNotification: push payload from the sales table trigger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNotification {
    pub op: ChangeOp,
    pub status: DealStatus,
    #[serde(default)]
    pub old_status: Option<DealStatus>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub seller_id: Option<String>,
}

impl ChangeNotification {
    pub fn from_payload(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

/// Accepts RFC 3339, Postgres text timestamps and epoch seconds/millis.
/// Anything unparseable becomes `None` instead of failing the payload.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_timestamp))
}

pub fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::Number(n) => from_epoch(n.as_i64()?),
        serde_json::Value::String(s) => {
            if let Ok(secs) = s.parse::<i64>() {
                return from_epoch(secs);
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
                return Some(dt.with_timezone(&Utc));
            }
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        }
        _ => None,
    }
}

fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
    // If >1e12, it's milliseconds
    if value > 1_000_000_000_000 {
        DateTime::from_timestamp(value / 1000, ((value % 1000) * 1_000_000) as u32)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}
