use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::db::sale_repo::{self, SaleRow};
use crate::db::seller_repo;
use crate::models::{Cents, DealStatus, SubjectId, TransactionRecord};

use super::{DataSource, SourceBatch, SourceError};

#[derive(Debug, Clone)]
pub struct PgDataSource {
    pool: PgPool,
}

impl PgDataSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataSource for PgDataSource {
    async fn fetch(&self, since: DateTime<Utc>) -> Result<SourceBatch, SourceError> {
        let (roster, sales) = tokio::try_join!(
            seller_repo::get_roster(&self.pool),
            sale_repo::get_won_sales_since(&self.pool, since),
        )?;

        let transactions: Vec<TransactionRecord> =
            sales.iter().filter_map(convert_sale_row).collect();

        if transactions.len() < sales.len() {
            tracing::warn!(
                dropped = sales.len() - transactions.len(),
                "Skipped malformed sale rows"
            );
        }

        Ok(SourceBatch {
            roster,
            transactions,
        })
    }
}

/// Rows without a seller or with a negative / unrepresentable amount are
/// dropped. A missing status is not treated as won.
pub fn convert_sale_row(row: &SaleRow) -> Option<TransactionRecord> {
    let subject_id = SubjectId::parse(row.seller_id.as_deref()?)?;
    let amount = Cents::from_decimal(row.amount?)?;
    let status = row
        .status
        .as_deref()
        .map(DealStatus::from_db_str)
        .unwrap_or(DealStatus::Other(String::new()));

    Some(TransactionRecord {
        subject_id,
        amount,
        status,
        completed_at: row.completed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn row(seller: Option<&str>, amount: Option<Decimal>, status: Option<&str>) -> SaleRow {
        SaleRow {
            seller_id: seller.map(str::to_string),
            amount,
            status: status.map(str::to_string),
            completed_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_convert_valid_row() {
        let tx = convert_sale_row(&row(Some("ana"), Some(Decimal::new(125050, 2)), Some("won"))).unwrap();
        assert_eq!(tx.subject_id.as_str(), "ana");
        assert_eq!(tx.amount, Cents(125_050));
        assert!(tx.status.is_won());
    }

    #[test]
    fn test_convert_rejects_malformed_rows() {
        assert!(convert_sale_row(&row(None, Some(Decimal::ONE), Some("won"))).is_none());
        assert!(convert_sale_row(&row(Some(""), Some(Decimal::ONE), Some("won"))).is_none());
        assert!(convert_sale_row(&row(Some("ana"), None, Some("won"))).is_none());
        assert!(convert_sale_row(&row(Some("ana"), Some(Decimal::NEGATIVE_ONE), Some("won"))).is_none());
    }

    #[test]
    fn test_convert_drops_oversized_amount() {
        let huge = Decimal::from_str_exact("900000000000000000000000000").unwrap();
        assert!(convert_sale_row(&row(Some("ana"), Some(huge), Some("won"))).is_none());
        assert!(convert_sale_row(&row(Some("ana"), Some(Decimal::MAX), Some("won"))).is_none());
    }

    #[test]
    fn test_convert_missing_status_not_won() {
        let tx = convert_sale_row(&row(Some("ana"), Some(Decimal::ONE), None)).unwrap();
        assert!(!tx.status.is_won());
    }
}
