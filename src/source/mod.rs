pub mod postgres;

pub use postgres::PgDataSource;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{RosterRow, TransactionRecord};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("query failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("could not decode row: {0}")]
    Decode(String),

    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

impl From<anyhow::Error> for SourceError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sqlx::Error>() {
            Ok(e @ (sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. })) => {
                SourceError::Decode(e.to_string())
            }
            Ok(
                e @ (sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)),
            ) => SourceError::Unavailable(e.to_string()),
            Ok(e) => SourceError::Database(e),
            Err(other) => SourceError::Unavailable(format!("{other:#}")),
        }
    }
}

/// Roster plus qualifying transactions for one refresh cycle.
#[derive(Debug, Clone, Default)]
pub struct SourceBatch {
    pub roster: Vec<RosterRow>,
    pub transactions: Vec<TransactionRecord>,
}

/// Read side of the backend. Injected into the scheduler so tests can
/// substitute an in-memory fake.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Roster and won transactions completed at or after `since`.
    async fn fetch(&self, since: DateTime<Utc>) -> Result<SourceBatch, SourceError>;
}
