//! Chat HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/chat/query                - Ask the portfolio assistant
//! - GET  /api/v1/chat/history              - Caller's sessions with messages
//! - GET  /api/v1/chat/session/{id}         - One session with messages
//! - POST /api/v1/chat/session/{id}/clear   - Delete a session's messages
//! - POST /api/v1/chat/feedback/message     - Rate one assistant message
//! - POST /api/v1/chat/feedback/session     - Overall session feedback

use axum::extract::{Path, State};
use serde_json::json;
use uuid::Uuid;

use folio_types::chat::{
    ChatFeedback, ChatQuery, ChatReply, ChatSession, ChatTranscript, MessageFeedbackRequest,
    SessionFeedbackRequest,
};

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::http::extractors::json::ApiJson;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

fn parse_session_id(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid session id: {s}")))
}

fn session_href(id: &Uuid) -> String {
    format!("/api/v1/chat/session/{id}")
}

/// POST /api/v1/chat/query
///
/// Generation failures still answer 200 with `error: true` in the payload.
pub async fn query(
    State(state): State<AppState>,
    Identity(requester): Identity,
    ApiJson(request): ApiJson<ChatQuery>,
) -> Result<ApiResponse<ChatReply>, AppError> {
    let timer = RequestTimer::start();
    let reply = state.chat_service.query(request, &requester).await?;
    let session = session_href(&reply.session_id);
    Ok(timer.respond(reply).with_link("session", &session))
}

/// GET /api/v1/chat/history
pub async fn history(
    State(state): State<AppState>,
    Identity(requester): Identity,
) -> Result<ApiResponse<Vec<ChatTranscript>>, AppError> {
    let timer = RequestTimer::start();
    let transcripts = state.chat_service.history(&requester).await?;
    Ok(timer.respond(transcripts).with_link("self", "/api/v1/chat/history"))
}

/// GET /api/v1/chat/session/{id}
pub async fn session_detail(
    State(state): State<AppState>,
    Identity(requester): Identity,
    Path(id): Path<String>,
) -> Result<ApiResponse<ChatTranscript>, AppError> {
    let timer = RequestTimer::start();
    let session_id = parse_session_id(&id)?;
    let transcript = state
        .chat_service
        .session_detail(&session_id, &requester)
        .await?;
    Ok(timer
        .respond(transcript)
        .with_link("self", &session_href(&session_id)))
}

/// POST /api/v1/chat/session/{id}/clear
pub async fn clear_session(
    State(state): State<AppState>,
    Identity(requester): Identity,
    Path(id): Path<String>,
) -> Result<ApiResponse<ChatSession>, AppError> {
    let timer = RequestTimer::start();
    let session_id = parse_session_id(&id)?;
    let session = state
        .chat_service
        .clear_session(&session_id, &requester)
        .await?;
    Ok(timer.respond(session))
}

/// POST /api/v1/chat/feedback/message
pub async fn message_feedback(
    State(state): State<AppState>,
    Identity(requester): Identity,
    ApiJson(feedback): ApiJson<MessageFeedbackRequest>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let timer = RequestTimer::start();
    state
        .chat_service
        .message_feedback(&feedback, &requester)
        .await?;
    Ok(timer.respond(json!({
        "message_id": feedback.message_id,
        "rating": feedback.rating,
    })))
}

/// POST /api/v1/chat/feedback/session
pub async fn session_feedback(
    State(state): State<AppState>,
    Identity(requester): Identity,
    ApiJson(feedback): ApiJson<SessionFeedbackRequest>,
) -> Result<ApiResponse<ChatFeedback>, AppError> {
    let timer = RequestTimer::start();
    let stored = state
        .chat_service
        .session_feedback(&feedback, &requester)
        .await?;
    Ok(timer.respond(stored))
}
