//! Analytics event recording.

use folio_types::analytics::{AnalyticsEvent, EventType};
use folio_types::error::AnalyticsError;
use tracing::debug;

use crate::repository::analytics::AnalyticsRepository;

/// Validates and stores client-reported analytics events.
pub struct AnalyticsService<A: AnalyticsRepository> {
    repo: A,
}

impl<A: AnalyticsRepository> AnalyticsService<A> {
    pub fn new(repo: A) -> Self {
        Self { repo }
    }

    /// Parse an event name against the accepted vocabulary.
    pub fn event_type(name: &str) -> Result<EventType, AnalyticsError> {
        name.parse()
            .map_err(|_| AnalyticsError::UnknownEventType(name.to_string()))
    }

    /// Store an event. Returns it as stored.
    pub async fn record(&self, event: AnalyticsEvent) -> Result<AnalyticsEvent, AnalyticsError> {
        self.repo.record(&event).await?;
        debug!(event_type = %event.event_type, event_id = %event.id, "analytics event recorded");
        Ok(event)
    }
}
