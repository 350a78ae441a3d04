//! SQLite analytics event store.

use chrono::{DateTime, Utc};
use folio_core::repository::analytics::AnalyticsRepository;
use folio_types::analytics::AnalyticsEvent;
use folio_types::error::RepositoryError;

use super::pool::DatabasePool;
use super::{format_datetime, query_error};

#[derive(Clone)]
pub struct SqliteAnalyticsRepository {
    pool: DatabasePool,
}

impl SqliteAnalyticsRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl AnalyticsRepository for SqliteAnalyticsRepository {
    async fn record(&self, event: &AnalyticsEvent) -> Result<(), RepositoryError> {
        let metadata = serde_json::to_string(&event.metadata)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO analytics_events (id, event_type, user_id, session_id, metadata,
                   ip_address, user_agent, referrer, timestamp)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(event.id.to_string())
        .bind(event.event_type.as_str())
        .bind(event.user_id.map(|id| id.to_string()))
        .bind(&event.session_id)
        .bind(metadata)
        .bind(&event.ip_address)
        .bind(&event.user_agent)
        .bind(&event.referrer)
        .bind(format_datetime(&event.timestamp))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(())
    }

    async fn count_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM analytics_events WHERE timestamp < ?")
            .bind(format_datetime(&cutoff))
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_error)?;

        Ok(count as u64)
    }

    async fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM analytics_events WHERE timestamp < ?")
            .bind(format_datetime(&cutoff))
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected())
    }
}
