//! POST /api/v1/gigs/{slug}/hire

use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use folio_types::hire::{HireStatus, NewHireRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::http::extractors::json::ApiJson;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubmittedHireRequest {
    pub id: Uuid,
    pub gig: String,
    pub status: HireStatus,
    pub created_at: DateTime<Utc>,
}

pub async fn submit_hire_request(
    State(state): State<AppState>,
    Identity(requester): Identity,
    Path(slug): Path<String>,
    ApiJson(form): ApiJson<NewHireRequest>,
) -> Result<(StatusCode, ApiResponse<SubmittedHireRequest>), AppError> {
    let timer = RequestTimer::start();
    let stored = state.hire_service.submit(&slug, form, &requester).await?;

    let response = timer
        .respond(SubmittedHireRequest {
            id: stored.id,
            gig: slug.clone(),
            status: stored.status,
            created_at: stored.created_at,
        })
        .with_link("gig", &format!("/api/v1/gigs/{slug}"));
    Ok((StatusCode::CREATED, response))
}
