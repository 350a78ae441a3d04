//! POST /api/v1/analytics/event

use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_types::analytics::AnalyticsEvent;

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::http::extractors::client::ClientInfo;
use crate::http::extractors::json::ApiJson;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::{AppState, ConcreteAnalyticsService};

#[derive(Debug, Deserialize)]
pub struct RecordEventRequest {
    pub event_type: String,
    /// Client-side session identifier; defaults to the `X-Session-Key`.
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct RecordedEvent {
    pub id: Uuid,
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
}

pub async fn record_event(
    State(state): State<AppState>,
    Identity(requester): Identity,
    client: ClientInfo,
    ApiJson(request): ApiJson<RecordEventRequest>,
) -> Result<(StatusCode, ApiResponse<RecordedEvent>), AppError> {
    let timer = RequestTimer::start();
    let event_type = ConcreteAnalyticsService::event_type(&request.event_type)?;

    let mut event = AnalyticsEvent::new(
        event_type,
        request
            .metadata
            .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
    );
    event.user_id = requester.user_id;
    event.session_id = request
        .session_id
        .or(requester.session_key)
        .unwrap_or_default();
    event.ip_address = client.ip_address;
    event.user_agent = client.user_agent;
    event.referrer = client.referrer;

    let stored = state.analytics_service.record(event).await?;
    Ok((
        StatusCode::CREATED,
        timer.respond(RecordedEvent {
            id: stored.id,
            event_type: stored.event_type.to_string(),
            timestamp: stored.timestamp,
        }),
    ))
}
