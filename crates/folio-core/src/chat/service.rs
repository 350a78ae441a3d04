//! Chat service orchestrating sessions, replies, history and feedback.
//!
//! `ChatService::query` is the entry point for a visitor question: it
//! resolves the session, persists both sides of the exchange and keeps the
//! session counters current. Generation failures never reach the caller;
//! they are answered with a canned reply flagged `error: true`.

use std::time::Instant;

use chrono::Utc;
use folio_types::analytics::{AnalyticsEvent, EventType};
use folio_types::chat::{
    ChatFeedback, ChatMessage, ChatQuery, ChatReply, ChatSession, ChatTranscript,
    MessageFeedbackRequest, Requester, SessionFeedbackRequest,
};
use folio_types::error::ChatError;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use super::ai::{ChatAiService, GeneratedReply, GenerationRequest};
use super::history::load_history;
use super::repository::ChatRepository;
use crate::repository::analytics::AnalyticsRepository;
use crate::repository::portfolio::PortfolioRepository;

pub const FALLBACK_REPLY: &str = "I apologize, but I'm having trouble processing your request right now. Please try again in a moment.";

/// Longest accepted query, in characters.
pub const MAX_QUERY_CHARS: usize = 2000;

/// Longest accepted message feedback comment, in characters.
pub const MAX_COMMENT_CHARS: usize = 500;

/// Orchestrates the chat subsystem.
///
/// Generic over its repositories so folio-core never depends on folio-infra.
pub struct ChatService<C: ChatRepository, P: PortfolioRepository, A: AnalyticsRepository> {
    chat_repo: C,
    ai: ChatAiService<P>,
    analytics: A,
}

impl<C: ChatRepository, P: PortfolioRepository, A: AnalyticsRepository> ChatService<C, P, A> {
    pub fn new(chat_repo: C, ai: ChatAiService<P>, analytics: A) -> Self {
        Self {
            chat_repo,
            ai,
            analytics,
        }
    }

    /// Access the chat repository.
    pub fn chat_repo(&self) -> &C {
        &self.chat_repo
    }

    // --- Query ---

    /// Answer a visitor question.
    pub async fn query(&self, request: ChatQuery, requester: &Requester) -> Result<ChatReply, ChatError> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(ChatError::Validation("query must not be empty".to_string()));
        }
        if query.chars().count() > MAX_QUERY_CHARS {
            return Err(ChatError::Validation(format!(
                "query must be at most {MAX_QUERY_CHARS} characters"
            )));
        }

        let mut session = self.resolve_session(&request, requester).await?;

        // History is read before the query is stored so the query is sent once.
        let history = load_history(
            &self.chat_repo,
            &session.id,
            self.ai.settings().history_limit,
        )
        .await;

        self.chat_repo
            .save_message(&ChatMessage::from_user(session.id, query.to_string()))
            .await?;

        let started = Instant::now();
        let generated = match history {
            Ok(history) => {
                self.ai
                    .generate(GenerationRequest {
                        query,
                        history,
                        chat_context: &request.context,
                        audience: request.audience,
                        tone: request.tone,
                        depth: request.depth,
                    })
                    .await
            }
            Err(e) => Err(e),
        };
        let response_time_ms = started.elapsed().as_millis() as u64;

        let generated = match generated {
            Ok(generated) => generated,
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "reply generation failed, sending fallback");
                return self.fallback(session, response_time_ms).await;
            }
        };

        let GeneratedReply {
            response,
            sources,
            tokens_used,
            model_used,
            ..
        } = generated;

        let mut reply_message = ChatMessage::from_user(session.id, response.clone());
        reply_message.is_from_user = false;
        reply_message.response_time_ms = Some(response_time_ms);
        reply_message.tokens_used = tokens_used;
        reply_message.model_used = model_used;
        reply_message.context_data = request.context.clone();
        reply_message.sources = sources.clone();
        self.chat_repo.save_message(&reply_message).await?;

        session.message_count += 2;
        session.total_tokens_used += u64::from(tokens_used);
        session.last_activity = Utc::now();
        self.chat_repo.update_session(&session).await?;

        self.track(
            requester,
            EventType::chat_query(),
            json!({
                "chat_session_id": session.id.to_string(),
                "query_length": query.chars().count(),
                "response_time_ms": response_time_ms,
                "audience": request.audience,
                "tone": request.tone,
                "depth": request.depth,
                "tokens_used": tokens_used,
            }),
        )
        .await;

        info!(
            session_id = %session.id,
            response_time_ms,
            tokens_used,
            sources = sources.len(),
            "chat query answered"
        );

        Ok(ChatReply {
            session_id: session.id,
            message_id: reply_message.id,
            response,
            sources,
            response_time_ms,
            message_count: session.message_count,
            error: false,
        })
    }

    /// Pick the session a query belongs to, creating one when needed.
    ///
    /// Authenticated users always continue their most recent active session
    /// and the client-supplied id is ignored. Anonymous callers may only
    /// continue sessions that have no owner.
    async fn resolve_session(
        &self,
        request: &ChatQuery,
        requester: &Requester,
    ) -> Result<ChatSession, ChatError> {
        if let Some(user_id) = requester.user_id {
            if let Some(session) = self.chat_repo.find_active_session_for_user(&user_id).await? {
                return Ok(session);
            }
        } else if let Some(session_id) = request.session_id {
            if let Some(session) = self.chat_repo.get_session(&session_id).await? {
                if session.user_id.is_none() {
                    return Ok(session);
                }
            }
        }

        let session_key = requester
            .session_key
            .clone()
            .unwrap_or_else(|| Uuid::now_v7().to_string());
        let session = ChatSession::new(requester.user_id, session_key, request.audience, request.tone);
        info!(session_id = %session.id, authenticated = requester.user_id.is_some(), "chat session created");
        Ok(self.chat_repo.create_session(&session).await?)
    }

    async fn fallback(&self, mut session: ChatSession, response_time_ms: u64) -> Result<ChatReply, ChatError> {
        let mut message = ChatMessage::from_user(session.id, FALLBACK_REPLY.to_string());
        message.is_from_user = false;
        message.response_time_ms = Some(response_time_ms);
        self.chat_repo.save_message(&message).await?;

        session.message_count += 2;
        session.last_activity = Utc::now();
        self.chat_repo.update_session(&session).await?;

        Ok(ChatReply {
            session_id: session.id,
            message_id: message.id,
            response: FALLBACK_REPLY.to_string(),
            sources: Vec::new(),
            response_time_ms,
            message_count: session.message_count,
            error: true,
        })
    }

    // --- History ---

    /// All sessions visible to the requester, newest activity first, each
    /// with its messages in chronological order.
    pub async fn history(&self, requester: &Requester) -> Result<Vec<ChatTranscript>, ChatError> {
        let sessions = match (&requester.user_id, &requester.session_key) {
            (Some(user_id), _) => self.chat_repo.list_sessions_for_user(user_id).await?,
            (None, Some(key)) => self.chat_repo.list_anonymous_sessions(key).await?,
            (None, None) => Vec::new(),
        };

        let mut transcripts = Vec::with_capacity(sessions.len());
        for session in sessions {
            let messages = self.chat_repo.get_messages(&session.id).await?;
            transcripts.push(ChatTranscript { session, messages });
        }
        Ok(transcripts)
    }

    /// One session with its messages, if the requester may see it.
    pub async fn session_detail(
        &self,
        session_id: &Uuid,
        requester: &Requester,
    ) -> Result<ChatTranscript, ChatError> {
        let session = self
            .chat_repo
            .get_session(session_id)
            .await?
            .filter(|s| can_view(s, requester))
            .ok_or(ChatError::SessionNotFound)?;
        let messages = self.chat_repo.get_messages(&session.id).await?;
        Ok(ChatTranscript { session, messages })
    }

    /// Delete every message of a session and reset its counters.
    pub async fn clear_session(
        &self,
        session_id: &Uuid,
        requester: &Requester,
    ) -> Result<ChatSession, ChatError> {
        let mut session = self
            .chat_repo
            .get_session(session_id)
            .await?
            .filter(|s| can_modify(s, requester))
            .ok_or(ChatError::SessionNotFound)?;

        let deleted = self.chat_repo.clear_messages(&session.id).await?;
        session.message_count = 0;
        session.total_tokens_used = 0;
        session.average_rating = None;
        self.chat_repo.update_session(&session).await?;

        self.track(
            requester,
            EventType::chat_session_cleared(),
            json!({
                "chat_session_id": session.id.to_string(),
                "cleared_at": Utc::now().to_rfc3339(),
            }),
        )
        .await;

        info!(session_id = %session.id, deleted, "chat session cleared");
        Ok(session)
    }

    // --- Feedback ---

    /// Rate a single message and refresh the session's average rating.
    pub async fn message_feedback(
        &self,
        feedback: &MessageFeedbackRequest,
        requester: &Requester,
    ) -> Result<(), ChatError> {
        validate_rating("rating", feedback.rating)?;
        if feedback.comment.chars().count() > MAX_COMMENT_CHARS {
            return Err(ChatError::Validation(format!(
                "comment must be at most {MAX_COMMENT_CHARS} characters"
            )));
        }

        let message = self
            .chat_repo
            .get_message(&feedback.message_id)
            .await?
            .ok_or(ChatError::MessageNotFound)?;

        self.chat_repo
            .update_message_feedback(&message.id, feedback.rating, &feedback.comment)
            .await?;

        if let Some(mut session) = self.chat_repo.get_session(&message.session_id).await? {
            session.average_rating = self.chat_repo.average_message_rating(&session.id).await?;
            self.chat_repo.update_session(&session).await?;
        }

        self.track(
            requester,
            EventType::chat_feedback(),
            json!({
                "message_id": message.id.to_string(),
                "rating": feedback.rating,
                "has_comment": !feedback.comment.is_empty(),
            }),
        )
        .await;
        Ok(())
    }

    /// Store overall feedback for a session.
    pub async fn session_feedback(
        &self,
        feedback: &SessionFeedbackRequest,
        requester: &Requester,
    ) -> Result<ChatFeedback, ChatError> {
        let session_id = feedback
            .session_id
            .ok_or_else(|| ChatError::Validation("session_id is required".to_string()))?;
        let session = self
            .chat_repo
            .get_session(&session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        validate_rating("overall_rating", feedback.overall_rating)?;
        validate_rating("helpfulness", feedback.helpfulness)?;
        validate_rating("accuracy", feedback.accuracy)?;

        let record = ChatFeedback {
            id: Uuid::now_v7(),
            session_id: session.id,
            user_id: requester.user_id,
            overall_rating: feedback.overall_rating,
            helpfulness: feedback.helpfulness,
            accuracy: feedback.accuracy,
            what_worked_well: feedback.what_worked_well.clone(),
            what_could_improve: feedback.what_could_improve.clone(),
            suggestions: feedback.suggestions.clone(),
            would_recommend: feedback.would_recommend,
            created_at: Utc::now(),
        };
        self.chat_repo.save_feedback(&record).await?;

        self.track(
            requester,
            EventType::chat_session_feedback(),
            json!({
                "chat_session_id": session.id.to_string(),
                "overall_rating": record.overall_rating,
                "helpfulness": record.helpfulness,
                "accuracy": record.accuracy,
                "would_recommend": record.would_recommend,
            }),
        )
        .await;
        Ok(record)
    }

    /// Record an analytics event; failures are logged and swallowed.
    async fn track(&self, requester: &Requester, event_type: EventType, metadata: serde_json::Value) {
        let mut event = AnalyticsEvent::new(event_type, metadata);
        event.user_id = requester.user_id;
        event.session_id = requester.session_key.clone().unwrap_or_default();

        if let Err(e) = self.analytics.record(&event).await {
            warn!(event_type = %event.event_type, error = %e, "failed to record analytics event");
        }
    }
}

fn can_view(session: &ChatSession, requester: &Requester) -> bool {
    match (&requester.user_id, &requester.session_key) {
        (Some(user_id), _) => session.user_id.as_ref() == Some(user_id),
        (None, Some(key)) => &session.session_key == key,
        (None, None) => false,
    }
}

fn can_modify(session: &ChatSession, requester: &Requester) -> bool {
    match (&requester.user_id, &requester.session_key) {
        (Some(user_id), _) => session.user_id.as_ref() == Some(user_id),
        (None, Some(key)) => session.user_id.is_none() && &session.session_key == key,
        (None, None) => false,
    }
}

fn validate_rating(field: &str, rating: u8) -> Result<(), ChatError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(ChatError::Validation(format!("{field} must be between 1 and 5")))
    }
}
