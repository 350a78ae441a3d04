//! Periodic data cleanup: old analytics events and stale anonymous sessions.

use chrono::{DateTime, Duration, Utc};
use folio_types::error::CleanupError;
use serde::Serialize;
use tracing::info;

use crate::chat::repository::ChatRepository;
use crate::repository::analytics::AnalyticsRepository;

/// Default retention window in days.
pub const DEFAULT_RETENTION_DAYS: u32 = 90;

/// What a cleanup run removed (or would remove, for a dry run).
#[derive(Debug, Clone, Serialize)]
pub struct CleanupReport {
    pub cutoff: DateTime<Utc>,
    pub dry_run: bool,
    pub analytics_events: u64,
    pub chat_sessions: u64,
}

pub struct DataCleanupService<C: ChatRepository, A: AnalyticsRepository> {
    chat_repo: C,
    analytics_repo: A,
}

impl<C: ChatRepository, A: AnalyticsRepository> DataCleanupService<C, A> {
    pub fn new(chat_repo: C, analytics_repo: A) -> Self {
        Self {
            chat_repo,
            analytics_repo,
        }
    }

    /// Remove analytics events and anonymous chat sessions older than `days`.
    ///
    /// Sessions owned by a user are never removed. A window reaching past the
    /// earliest representable timestamp is rejected.
    pub async fn cleanup(&self, days: u32, dry_run: bool) -> Result<CleanupReport, CleanupError> {
        let cutoff = Duration::try_days(i64::from(days))
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .ok_or(CleanupError::RetentionOutOfRange(days))?;

        let (analytics_events, chat_sessions) = if dry_run {
            (
                self.analytics_repo.count_before(cutoff).await?,
                self.chat_repo.count_anonymous_sessions_before(cutoff).await?,
            )
        } else {
            (
                self.analytics_repo.delete_before(cutoff).await?,
                self.chat_repo.delete_anonymous_sessions_before(cutoff).await?,
            )
        };

        info!(
            %cutoff,
            dry_run,
            analytics_events,
            chat_sessions,
            "data cleanup finished"
        );
        Ok(CleanupReport {
            cutoff,
            dry_run,
            analytics_events,
            chat_sessions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryAnalyticsRepository, InMemoryChatRepository};
    use folio_types::analytics::{AnalyticsEvent, EventType};
    use folio_types::chat::{Audience, ChatSession, Tone};
    use uuid::Uuid;

    async fn seeded() -> (InMemoryChatRepository, InMemoryAnalyticsRepository) {
        let old = Utc::now() - Duration::days(120);

        let mut old_event = AnalyticsEvent::new(EventType::chat_query(), serde_json::json!({}));
        old_event.timestamp = old;
        let analytics = InMemoryAnalyticsRepository::new()
            .with_event(old_event)
            .with_event(AnalyticsEvent::new(EventType::chat_query(), serde_json::json!({})));

        let chat = InMemoryChatRepository::new();
        let mut stale = ChatSession::new(None, "k".to_string(), Audience::General, Tone::Professional);
        stale.created_at = old;
        let mut owned = ChatSession::new(Some(Uuid::now_v7()), "k".to_string(), Audience::General, Tone::Professional);
        owned.created_at = old;
        let fresh = ChatSession::new(None, "k".to_string(), Audience::General, Tone::Professional);
        for session in [&stale, &owned, &fresh] {
            chat.create_session(session).await.unwrap();
        }
        (chat, analytics)
    }

    #[tokio::test]
    async fn test_dry_run_counts_without_deleting() {
        let (chat, analytics) = seeded().await;
        let svc = DataCleanupService::new(chat.clone(), analytics.clone());

        let report = svc.cleanup(DEFAULT_RETENTION_DAYS, true).await.unwrap();
        assert!(report.dry_run);
        assert_eq!(report.analytics_events, 1);
        assert_eq!(report.chat_sessions, 1);
        assert_eq!(analytics.events().len(), 2);
        assert_eq!(chat.sessions().len(), 3);
    }

    #[tokio::test]
    async fn test_cleanup_deletes_old_anonymous_data() {
        let (chat, analytics) = seeded().await;
        let svc = DataCleanupService::new(chat.clone(), analytics.clone());

        let report = svc.cleanup(DEFAULT_RETENTION_DAYS, false).await.unwrap();
        assert_eq!(report.analytics_events, 1);
        assert_eq!(report.chat_sessions, 1);
        assert_eq!(analytics.events().len(), 1);
        assert_eq!(chat.sessions().len(), 2);
    }

    #[tokio::test]
    async fn test_oversized_window_is_rejected() {
        let (chat, analytics) = seeded().await;
        let svc = DataCleanupService::new(chat.clone(), analytics.clone());

        let err = svc.cleanup(200_000_000, true).await.unwrap_err();
        assert!(matches!(err, CleanupError::RetentionOutOfRange(200_000_000)));

        let err = svc.cleanup(u32::MAX, false).await.unwrap_err();
        assert!(matches!(err, CleanupError::RetentionOutOfRange(_)));
        assert_eq!(analytics.events().len(), 2);
        assert_eq!(chat.sessions().len(), 3);
    }
}
