//! Hire request intake.

use chrono::Utc;
use folio_types::analytics::{AnalyticsEvent, EventType};
use folio_types::chat::Requester;
use folio_types::error::{HireError, RepositoryError};
use folio_types::hire::{HireRequest, HireStatus, NewHireRequest};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::repository::analytics::AnalyticsRepository;
use crate::repository::hire::HireRequestRepository;
use crate::repository::portfolio::PortfolioRepository;
use crate::service::account::is_email_address;

const MAX_NAME_LEN: usize = 255;
const MAX_PHONE_LEN: usize = 20;
const MAX_SOURCE_LEN: usize = 100;

/// Validates hire forms and stores them as leads against a gig.
pub struct HireService<P: PortfolioRepository, H: HireRequestRepository, A: AnalyticsRepository> {
    portfolio: P,
    hires: H,
    analytics: A,
}

impl<P: PortfolioRepository, H: HireRequestRepository, A: AnalyticsRepository> HireService<P, H, A> {
    pub fn new(portfolio: P, hires: H, analytics: A) -> Self {
        Self {
            portfolio,
            hires,
            analytics,
        }
    }

    /// Store a hire request for the gig `gig_slug`.
    ///
    /// A `hire_request` analytics event is recorded after the lead is saved;
    /// failing to record it does not fail the submission.
    pub async fn submit(
        &self,
        gig_slug: &str,
        form: NewHireRequest,
        requester: &Requester,
    ) -> Result<HireRequest, HireError> {
        let form = validate(form)?;
        let gig = self
            .portfolio
            .get_gig(gig_slug)
            .await?
            .ok_or_else(|| HireError::GigNotFound(gig_slug.to_string()))?;

        let request = HireRequest {
            id: Uuid::now_v7(),
            gig_id: gig.id,
            user_id: requester.user_id,
            name: form.name,
            email: form.email,
            company: form.company,
            phone: form.phone,
            project_title: form.project_title,
            message: form.message,
            proposed_budget: form.proposed_budget,
            budget_details: form.budget_details,
            timeline: form.timeline,
            timeline_details: form.timeline_details,
            preferred_communication: form.preferred_communication,
            meeting_requested: form.meeting_requested,
            meeting_availability: form.meeting_availability,
            source: form.source,
            status: HireStatus::New,
            created_at: Utc::now(),
        };
        self.hires.create(&request).await.map_err(|e| match e {
            RepositoryError::NotFound => HireError::GigNotFound(gig.slug.clone()),
            other => HireError::Repository(other),
        })?;
        info!(hire_request_id = %request.id, gig = %gig.slug, "hire request received");

        let mut event = AnalyticsEvent::new(
            EventType::hire_request(),
            json!({
                "hire_request_id": request.id,
                "gig_id": gig.id,
                "gig_slug": gig.slug,
                "budget_range": request.proposed_budget,
                "timeline": request.timeline,
            }),
        );
        event.user_id = requester.user_id;
        event.session_id = requester.session_key.clone().unwrap_or_default();
        if let Err(e) = self.analytics.record(&event).await {
            warn!(hire_request_id = %request.id, error = %e, "failed to record hire request event");
        }

        Ok(request)
    }
}

/// Trim the free-text fields and enforce the form's required parts.
fn validate(mut form: NewHireRequest) -> Result<NewHireRequest, HireError> {
    form.name = form.name.trim().to_string();
    form.email = form.email.trim().to_string();
    form.company = form.company.trim().to_string();
    form.phone = form.phone.trim().to_string();
    form.project_title = form.project_title.trim().to_string();
    form.message = form.message.trim().to_string();
    form.source = form.source.trim().to_string();
    form.preferred_communication = form
        .preferred_communication
        .into_iter()
        .map(|channel| channel.trim().to_lowercase())
        .filter(|channel| !channel.is_empty())
        .collect();

    if !form.terms_accepted {
        return Err(HireError::Invalid("you must accept the terms of service".into()));
    }
    if !form.privacy_accepted {
        return Err(HireError::Invalid("you must accept the privacy policy".into()));
    }
    if form.name.is_empty() {
        return Err(HireError::Invalid("name is required".into()));
    }
    if !is_email_address(&form.email) {
        return Err(HireError::Invalid(format!("'{}' is not an email address", form.email)));
    }
    if form.message.is_empty() {
        return Err(HireError::Invalid("message is required".into()));
    }
    for (field, value, max) in [
        ("name", &form.name, MAX_NAME_LEN),
        ("company", &form.company, MAX_NAME_LEN),
        ("project_title", &form.project_title, MAX_NAME_LEN),
        ("phone", &form.phone, MAX_PHONE_LEN),
        ("source", &form.source, MAX_SOURCE_LEN),
    ] {
        if value.chars().count() > max {
            return Err(HireError::Invalid(format!("{field} must be at most {max} characters")));
        }
    }
    Ok(form)
}
