//! Analytics event types.
//!
//! Event types form a closed vocabulary shared with the frontend. Besides
//! the fixed names, any `chat_opened_from_<place>` name is accepted so new
//! chat entry points don't need a backend release.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Every accepted event name except the `chat_opened_from_*` family.
pub const KNOWN_EVENT_TYPES: &[&str] = &[
    "page_view",
    "api_request",
    "project_view",
    "casestudy_view",
    "gig_view",
    "gig_click",
    "skill_explore",
    "chat_query",
    "chat_feedback",
    "chat_session_feedback",
    "chat_session_cleared",
    "hire_request",
    "hire_form_start",
    "hire_form_step",
    "hire_form_submit",
    "user_registration",
    "user_login",
    "user_logout",
    "portal_visit",
    "portal_name_entered",
    "portal_skipped",
    "consent_given",
    "link_click",
    "navigation_link_click",
    "quick_action_clicked",
    "resume_download",
    "file_download",
    "search",
    "form_submit",
    "error",
];

const CHAT_OPENED_PREFIX: &str = "chat_opened_from_";

/// A validated analytics event name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventType(String);

impl EventType {
    pub fn chat_query() -> Self {
        Self("chat_query".to_string())
    }

    pub fn chat_feedback() -> Self {
        Self("chat_feedback".to_string())
    }

    pub fn chat_session_feedback() -> Self {
        Self("chat_session_feedback".to_string())
    }

    pub fn chat_session_cleared() -> Self {
        Self("chat_session_cleared".to_string())
    }

    pub fn hire_request() -> Self {
        Self("hire_request".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let known = KNOWN_EVENT_TYPES.contains(&s);
        let chat_opened = s
            .strip_prefix(CHAT_OPENED_PREFIX)
            .is_some_and(|place| {
                !place.is_empty()
                    && place
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            });

        if known || chat_opened {
            Ok(Self(s.to_string()))
        } else {
            Err(format!("unknown event type: '{s}'"))
        }
    }
}

impl TryFrom<String> for EventType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.0
    }
}

/// A recorded analytics event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub event_type: EventType,
    pub user_id: Option<Uuid>,
    /// Anonymous visitor key, empty when unknown.
    pub session_id: String,
    pub metadata: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub referrer: String,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// An event stamped now with no request context attached.
    pub fn new(event_type: EventType, metadata: serde_json::Value) -> Self {
        Self {
            id: Uuid::now_v7(),
            event_type,
            user_id: None,
            session_id: String::new(),
            metadata,
            ip_address: None,
            user_agent: String::new(),
            referrer: String::new(),
            timestamp: Utc::now(),
        }
    }
}
