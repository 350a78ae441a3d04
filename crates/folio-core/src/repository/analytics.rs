//! Analytics event repository trait definition.

use chrono::{DateTime, Utc};
use folio_types::analytics::AnalyticsEvent;
use folio_types::error::RepositoryError;

/// Append-only store of analytics events.
pub trait AnalyticsRepository: Send + Sync {
    /// Persist one event.
    fn record(
        &self,
        event: &AnalyticsEvent,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Count events with a timestamp strictly before `cutoff`.
    fn count_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Delete events with a timestamp strictly before `cutoff`. Returns the
    /// number of deleted rows.
    fn delete_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
