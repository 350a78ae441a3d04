//! ChatRepository trait definition.
//!
//! Sessions, messages and session feedback. Follows the same RPITIT pattern
//! as the other repository ports.

use chrono::{DateTime, Utc};
use folio_types::chat::{ChatFeedback, ChatMessage, ChatSession};
use folio_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat session and message persistence.
///
/// Implementations live in folio-infra (`SqliteChatRepository`).
pub trait ChatRepository: Send + Sync {
    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    /// Create a new chat session.
    fn create_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// Get a chat session by its unique ID.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Overwrite the mutable fields of a session (counters, rating, activity).
    fn update_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// The user's active session with the most recent activity, if any.
    fn find_active_session_for_user(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// All sessions owned by a user, most recent activity first.
    fn list_sessions_for_user(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Sessions with the given key and no owning user, most recent activity first.
    fn list_anonymous_sessions(
        &self,
        session_key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Count anonymous sessions created strictly before `cutoff`.
    fn count_anonymous_sessions_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Delete anonymous sessions (and their messages) created strictly
    /// before `cutoff`. Returns the number of deleted sessions.
    fn delete_anonymous_sessions_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    // -----------------------------------------------------------------------
    // Messages
    // -----------------------------------------------------------------------

    /// Save a new message within a session.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a message by its unique ID.
    fn get_message(
        &self,
        message_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatMessage>, RepositoryError>> + Send;

    /// The `limit` most recent messages of a session, newest first.
    fn recent_messages(
        &self,
        session_id: &Uuid,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Every message of a session in chronological order.
    fn get_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Set the rating and comment of a message. `NotFound` if it does not exist.
    fn update_message_feedback(
        &self,
        message_id: &Uuid,
        rating: u8,
        comment: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Mean rating over the rated messages of a session.
    fn average_message_rating(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<f64>, RepositoryError>> + Send;

    /// Delete every message of a session. Returns the number of deleted rows.
    fn clear_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    // -----------------------------------------------------------------------
    // Feedback
    // -----------------------------------------------------------------------

    /// Store overall feedback for a session.
    fn save_feedback(
        &self,
        feedback: &ChatFeedback,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
