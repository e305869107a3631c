use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SaleRow {
    pub seller_id: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Won sales completed at or after `since`.
pub async fn get_won_sales_since(
    pool: &PgPool,
    since: DateTime<Utc>,
) -> anyhow::Result<Vec<SaleRow>> {
    let rows = sqlx::query_as::<_, SaleRow>(
        r#"
        SELECT seller_id, amount, status, completed_at
        FROM sales
        WHERE lower(status) = 'won' AND completed_at >= $1
        ORDER BY completed_at ASC
        "#,
    )
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

