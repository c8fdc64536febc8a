//! PostgreSQL value source over the `leads` table.

use crate::{Field, RawValue, SourceError, ValueSource};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use std::time::Duration;
use tracing::{debug, info};

pub async fn connect(database_url: &str) -> Result<PgPool, SourceError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Round-trips `SELECT NOW()` to prove the connection works.
pub async fn server_time(pool: &PgPool) -> Result<DateTime<Utc>, SourceError> {
    let now: DateTime<Utc> = sqlx::query_scalar("SELECT NOW()").fetch_one(pool).await?;
    Ok(now)
}

/// Distinct non-null values of `field`, each with the ordered ids of the leads using it.
/// Values are cast to text so non-string columns still reach the classifier as strings.
pub fn distinct_values_query(field: Field) -> String {
    let col = field.column();
    format!(
        "SELECT {col}::text AS value, \
         ARRAY_REMOVE(ARRAY_AGG(lead_id::text ORDER BY lead_id), NULL) AS lead_ids \
         FROM leads \
         WHERE {col} IS NOT NULL \
         GROUP BY {col} \
         ORDER BY {col}"
    )
}

#[derive(Debug, Clone)]
pub struct PostgresSource {
    pool: PgPool,
    field: Field,
}

impl PostgresSource {
    pub fn new(pool: PgPool, field: Field) -> Self {
        Self { pool, field }
    }
}

#[async_trait::async_trait]
impl ValueSource for PostgresSource {
    async fn fetch_values(&self) -> Result<Vec<RawValue>, SourceError> {
        let sql = distinct_values_query(self.field);
        debug!(%sql, "fetching distinct values");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let value: String = row.try_get("value")?;
            let lead_ids: Option<Vec<String>> = row.try_get("lead_ids")?;
            out.push(RawValue {
                value,
                lead_ids: lead_ids.unwrap_or_default(),
            });
        }
        info!(field = %self.field, rows = out.len(), "loaded distinct values from leads");
        Ok(out)
    }

    fn describe(&self) -> String {
        format!("postgres:leads.{}", self.field)
    }
}
