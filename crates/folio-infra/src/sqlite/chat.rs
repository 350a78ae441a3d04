//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `folio-core`: raw queries, private Row
//! structs, reads on the reader pool and writes on the writer pool.

use chrono::{DateTime, Utc};
use folio_core::chat::repository::ChatRepository;
use folio_types::chat::{Audience, ChatFeedback, ChatMessage, ChatSession, Source, Tone};
use folio_types::error::RepositoryError;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

/// SQLite-backed implementation of `ChatRepository`.
#[derive(Clone)]
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatSessionRow {
    id: String,
    user_id: Option<String>,
    session_key: String,
    audience: String,
    tone: String,
    is_active: bool,
    message_count: i64,
    total_tokens_used: i64,
    average_rating: Option<f64>,
    created_at: String,
    last_activity: String,
}

impl ChatSessionRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            session_key: row.try_get("session_key")?,
            audience: row.try_get("audience")?,
            tone: row.try_get("tone")?,
            is_active: row.try_get("is_active")?,
            message_count: row.try_get("message_count")?,
            total_tokens_used: row.try_get("total_tokens_used")?,
            average_rating: row.try_get("average_rating")?,
            created_at: row.try_get("created_at")?,
            last_activity: row.try_get("last_activity")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        let audience: Audience = self
            .audience
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let tone: Tone = self
            .tone
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(ChatSession {
            id: parse_uuid(&self.id, "session id")?,
            user_id: self
                .user_id
                .as_deref()
                .map(|id| parse_uuid(id, "user_id"))
                .transpose()?,
            session_key: self.session_key,
            audience,
            tone,
            is_active: self.is_active,
            message_count: self.message_count as u32,
            total_tokens_used: self.total_tokens_used as u64,
            average_rating: self.average_rating,
            created_at: parse_datetime(&self.created_at)?,
            last_activity: parse_datetime(&self.last_activity)?,
        })
    }
}

struct ChatMessageRow {
    id: String,
    session_id: String,
    is_from_user: bool,
    content: String,
    response_time_ms: Option<i64>,
    tokens_used: i64,
    model_used: String,
    context_data: String,
    sources: String,
    rating: Option<i64>,
    feedback_comment: String,
    created_at: String,
}

impl ChatMessageRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            is_from_user: row.try_get("is_from_user")?,
            content: row.try_get("content")?,
            response_time_ms: row.try_get("response_time_ms")?,
            tokens_used: row.try_get("tokens_used")?,
            model_used: row.try_get("model_used")?,
            context_data: row.try_get("context_data")?,
            sources: row.try_get("sources")?,
            rating: row.try_get("rating")?,
            feedback_comment: row.try_get("feedback_comment")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let context_data: serde_json::Value = serde_json::from_str(&self.context_data)
            .map_err(|e| RepositoryError::Query(format!("invalid context_data: {e}")))?;
        let sources: Vec<Source> = serde_json::from_str(&self.sources)
            .map_err(|e| RepositoryError::Query(format!("invalid sources: {e}")))?;

        Ok(ChatMessage {
            id: parse_uuid(&self.id, "message id")?,
            session_id: parse_uuid(&self.session_id, "session_id")?,
            is_from_user: self.is_from_user,
            content: self.content,
            response_time_ms: self.response_time_ms.map(|v| v as u64),
            tokens_used: self.tokens_used as u32,
            model_used: self.model_used,
            context_data,
            sources,
            rating: self.rating.map(|v| v as u8),
            feedback_comment: self.feedback_comment,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn parse_uuid(s: &str, what: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(s).map_err(|e| RepositoryError::Query(format!("invalid {what}: {e}")))
}

fn rows_to_sessions(rows: &[SqliteRow]) -> Result<Vec<ChatSession>, RepositoryError> {
    rows.iter()
        .map(|row| {
            ChatSessionRow::from_row(row)
                .map_err(query_error)?
                .into_session()
        })
        .collect()
}

fn rows_to_messages(rows: &[SqliteRow]) -> Result<Vec<ChatMessage>, RepositoryError> {
    rows.iter()
        .map(|row| {
            ChatMessageRow::from_row(row)
                .map_err(query_error)?
                .into_message()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_session(&self, session: &ChatSession) -> Result<ChatSession, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chat_sessions (id, user_id, session_key, audience, tone, is_active,
                   message_count, total_tokens_used, average_rating, created_at, last_activity)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(session.id.to_string())
        .bind(session.user_id.map(|id| id.to_string()))
        .bind(&session.session_key)
        .bind(session.audience.to_string())
        .bind(session.tone.to_string())
        .bind(session.is_active)
        .bind(i64::from(session.message_count))
        .bind(session.total_tokens_used as i64)
        .bind(session.average_rating)
        .bind(format_datetime(&session.created_at))
        .bind(format_datetime(&session.last_activity))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(session.clone())
    }

    async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_sessions WHERE id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.map(|row| {
            ChatSessionRow::from_row(&row)
                .map_err(query_error)?
                .into_session()
        })
        .transpose()
    }

    async fn update_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE chat_sessions
               SET audience = ?, tone = ?, is_active = ?, message_count = ?,
                   total_tokens_used = ?, average_rating = ?, last_activity = ?
               WHERE id = ?"#,
        )
        .bind(session.audience.to_string())
        .bind(session.tone.to_string())
        .bind(session.is_active)
        .bind(i64::from(session.message_count))
        .bind(session.total_tokens_used as i64)
        .bind(session.average_rating)
        .bind(format_datetime(&session.last_activity))
        .bind(session.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_active_session_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT * FROM chat_sessions
               WHERE user_id = ? AND is_active = 1
               ORDER BY last_activity DESC
               LIMIT 1"#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_error)?;

        row.map(|row| {
            ChatSessionRow::from_row(&row)
                .map_err(query_error)?
                .into_session()
        })
        .transpose()
    }

    async fn list_sessions_for_user(&self, user_id: &Uuid) -> Result<Vec<ChatSession>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM chat_sessions WHERE user_id = ? ORDER BY last_activity DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows_to_sessions(&rows)
    }

    async fn list_anonymous_sessions(&self, session_key: &str) -> Result<Vec<ChatSession>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT * FROM chat_sessions
               WHERE session_key = ? AND user_id IS NULL
               ORDER BY last_activity DESC"#,
        )
        .bind(session_key)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows_to_sessions(&rows)
    }

    async fn count_anonymous_sessions_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM chat_sessions WHERE user_id IS NULL AND created_at < ?",
        )
        .bind(format_datetime(&cutoff))
        .fetch_one(&self.pool.reader)
        .await
        .map_err(query_error)?;

        Ok(count as u64)
    }

    async fn delete_anonymous_sessions_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        // Messages and feedback go with the session via ON DELETE CASCADE.
        let result =
            sqlx::query("DELETE FROM chat_sessions WHERE user_id IS NULL AND created_at < ?")
                .bind(format_datetime(&cutoff))
                .execute(&self.pool.writer)
                .await
                .map_err(query_error)?;

        Ok(result.rows_affected())
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        let context_data = serde_json::to_string(&message.context_data)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let sources = serde_json::to_string(&message.sources)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO chat_messages (id, session_id, is_from_user, content, response_time_ms,
                   tokens_used, model_used, context_data, sources, rating, feedback_comment, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(message.session_id.to_string())
        .bind(message.is_from_user)
        .bind(&message.content)
        .bind(message.response_time_ms.map(|v| v as i64))
        .bind(i64::from(message.tokens_used))
        .bind(&message.model_used)
        .bind(context_data)
        .bind(sources)
        .bind(message.rating.map(i64::from))
        .bind(&message.feedback_comment)
        .bind(format_datetime(&message.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(())
    }

    async fn get_message(&self, message_id: &Uuid) -> Result<Option<ChatMessage>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_messages WHERE id = ?")
            .bind(message_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.map(|row| {
            ChatMessageRow::from_row(&row)
                .map_err(query_error)?
                .into_message()
        })
        .transpose()
    }

    async fn recent_messages(
        &self,
        session_id: &Uuid,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        // Ids are UUIDv7, so they break ties between equal timestamps.
        let rows = sqlx::query(
            r#"SELECT * FROM chat_messages
               WHERE session_id = ?
               ORDER BY created_at DESC, id DESC
               LIMIT ?"#,
        )
        .bind(session_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows_to_messages(&rows)
    }

    async fn get_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM chat_messages WHERE session_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows_to_messages(&rows)
    }

    async fn update_message_feedback(
        &self,
        message_id: &Uuid,
        rating: u8,
        comment: &str,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE chat_messages SET rating = ?, feedback_comment = ? WHERE id = ?")
                .bind(i64::from(rating))
                .bind(comment)
                .bind(message_id.to_string())
                .execute(&self.pool.writer)
                .await
                .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn average_message_rating(&self, session_id: &Uuid) -> Result<Option<f64>, RepositoryError> {
        let avg: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(rating) FROM chat_messages WHERE session_id = ? AND rating IS NOT NULL",
        )
        .bind(session_id.to_string())
        .fetch_one(&self.pool.reader)
        .await
        .map_err(query_error)?;

        Ok(avg)
    }

    async fn clear_messages(&self, session_id: &Uuid) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE session_id = ?")
            .bind(session_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected())
    }

    async fn save_feedback(&self, feedback: &ChatFeedback) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chat_feedback (id, session_id, user_id, overall_rating, helpfulness,
                   accuracy, what_worked_well, what_could_improve, suggestions, would_recommend, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(feedback.id.to_string())
        .bind(feedback.session_id.to_string())
        .bind(feedback.user_id.map(|id| id.to_string()))
        .bind(i64::from(feedback.overall_rating))
        .bind(i64::from(feedback.helpfulness))
        .bind(i64::from(feedback.accuracy))
        .bind(&feedback.what_worked_well)
        .bind(&feedback.what_could_improve)
        .bind(&feedback.suggestions)
        .bind(feedback.would_recommend)
        .bind(format_datetime(&feedback.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(())
    }
}
