use sqlx::PgPool;

use crate::models::RosterRow;

/// Fetch the full seller roster. Rows are returned as stored; validation
/// happens in the aggregator.
pub async fn get_roster(pool: &PgPool) -> anyhow::Result<Vec<RosterRow>> {
    let rows = sqlx::query_as::<_, RosterRow>(
        "SELECT id, name, avatar_url FROM sellers ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

