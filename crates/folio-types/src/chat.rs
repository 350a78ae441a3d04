//! Chat session, message, feedback, and source types for Folio.
//!
//! These types model conversations between site visitors and the portfolio
//! assistant: sessions, messages, cited sources, and the personalization
//! inputs (audience, tone, depth) that shape the system prompt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::llm::MessageRole;

/// Who the visitor says they are. Selects the audience paragraph of the prompt.
///
/// Maps to the CHECK constraint on `chat_sessions.audience`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    General,
    Recruiter,
    Developer,
    Founder,
    Client,
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Audience::General => write!(f, "general"),
            Audience::Recruiter => write!(f, "recruiter"),
            Audience::Developer => write!(f, "developer"),
            Audience::Founder => write!(f, "founder"),
            Audience::Client => write!(f, "client"),
        }
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" => Ok(Audience::General),
            "recruiter" => Ok(Audience::Recruiter),
            "developer" => Ok(Audience::Developer),
            "founder" => Ok(Audience::Founder),
            "client" => Ok(Audience::Client),
            other => Err(format!("invalid audience: '{other}'")),
        }
    }
}

/// Voice the assistant answers in.
///
/// Maps to the CHECK constraint on `chat_sessions.tone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    Technical,
    Casual,
    OwnerVoice,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Professional => write!(f, "professional"),
            Tone::Technical => write!(f, "technical"),
            Tone::Casual => write!(f, "casual"),
            Tone::OwnerVoice => write!(f, "owner_voice"),
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "professional" => Ok(Tone::Professional),
            "technical" => Ok(Tone::Technical),
            "casual" => Ok(Tone::Casual),
            "owner_voice" => Ok(Tone::OwnerVoice),
            other => Err(format!("invalid tone: '{other}'")),
        }
    }
}

/// Requested answer length. Not persisted on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Short,
    #[default]
    Medium,
    Long,
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depth::Short => write!(f, "short"),
            Depth::Medium => write!(f, "medium"),
            Depth::Long => write!(f, "long"),
        }
    }
}

/// A conversation between one visitor and the assistant.
///
/// Owned by a user when the visitor was authenticated, otherwise identified
/// by the anonymous `session_key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub session_key: String,
    pub audience: Audience,
    pub tone: Tone,
    pub is_active: bool,
    pub message_count: u32,
    pub total_tokens_used: u64,
    pub average_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl ChatSession {
    /// A fresh active session with zeroed counters.
    pub fn new(user_id: Option<Uuid>, session_key: String, audience: Audience, tone: Tone) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            session_key,
            audience,
            tone,
            is_active: true,
            message_count: 0,
            total_tokens_used: 0,
            average_rating: None,
            created_at: now,
            last_activity: now,
        }
    }
}

/// A single message within a chat session.
///
/// Immutable once written except for `rating` and `feedback_comment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub is_from_user: bool,
    pub content: String,
    /// Wall-clock generation time (assistant messages only).
    pub response_time_ms: Option<u64>,
    pub tokens_used: u32,
    /// Model that produced the reply; `none` or `error` for canned replies.
    pub model_used: String,
    /// Client-supplied context object sent with the query.
    pub context_data: serde_json::Value,
    pub sources: Vec<Source>,
    pub rating: Option<u8>,
    pub feedback_comment: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// A visitor message with no generation metadata.
    pub fn from_user(session_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id,
            is_from_user: true,
            content,
            response_time_ms: None,
            tokens_used: 0,
            model_used: String::new(),
            context_data: serde_json::Value::Object(serde_json::Map::new()),
            sources: Vec::new(),
            rating: None,
            feedback_comment: String::new(),
            created_at: Utc::now(),
        }
    }

    /// LLM conversation role for this message.
    pub fn role(&self) -> MessageRole {
        if self.is_from_user {
            MessageRole::User
        } else {
            MessageRole::Assistant
        }
    }
}

/// Kind of record a cited source points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Project,
    Gig,
}

/// A project or gig the assistant linked to in its reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub title: String,
    pub url: String,
    pub description: String,
}

/// Overall feedback a visitor leaves for a whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatFeedback {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_id: Option<Uuid>,
    pub overall_rating: u8,
    pub helpfulness: u8,
    pub accuracy: u8,
    pub what_worked_well: String,
    pub what_could_improve: String,
    pub suggestions: String,
    pub would_recommend: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// The caller of a chat operation.
///
/// `user_id` is set when a valid bearer token was presented; `session_key`
/// carries the anonymous visitor identifier from the `X-Session-Key` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requester {
    pub user_id: Option<Uuid>,
    pub session_key: Option<String>,
}

impl Requester {
    pub fn anonymous(session_key: Option<String>) -> Self {
        Self {
            user_id: None,
            session_key,
        }
    }

    pub fn user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            session_key: None,
        }
    }
}

/// Incoming chat query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatQuery {
    pub query: String,
    #[serde(default)]
    pub session_id: Option<Uuid>,
    /// Free-form context; `project_id` focuses the prompt on one project.
    #[serde(default = "empty_object")]
    pub context: serde_json::Value,
    #[serde(default)]
    pub audience: Audience,
    #[serde(default)]
    pub depth: Depth,
    #[serde(default)]
    pub tone: Tone,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Result of a chat query as returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub session_id: Uuid,
    pub message_id: Uuid,
    pub response: String,
    pub sources: Vec<Source>,
    pub response_time_ms: u64,
    pub message_count: u32,
    /// Set when the reply is the canned fallback for an internal failure.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

/// A session with its messages in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTranscript {
    #[serde(flatten)]
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}

/// Rating for a single assistant message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageFeedbackRequest {
    pub message_id: Uuid,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

/// Overall feedback for a whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFeedbackRequest {
    /// Required; kept optional so a missing id surfaces as a validation error.
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub overall_rating: u8,
    pub helpfulness: u8,
    pub accuracy: u8,
    #[serde(default)]
    pub what_worked_well: String,
    #[serde(default)]
    pub what_could_improve: String,
    #[serde(default)]
    pub suggestions: String,
    #[serde(default)]
    pub would_recommend: Option<bool>,
}
