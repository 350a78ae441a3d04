//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`, plus `/health` at the root.
//! Middleware: CORS, request tracing.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Chat
        .route("/chat/query", post(handlers::chat::query))
        .route("/chat/history", get(handlers::chat::history))
        .route("/chat/session/{id}", get(handlers::chat::session_detail))
        .route("/chat/session/{id}/clear", post(handlers::chat::clear_session))
        .route("/chat/feedback/message", post(handlers::chat::message_feedback))
        .route("/chat/feedback/session", post(handlers::chat::session_feedback))
        // Catalog
        .route("/projects", get(handlers::portfolio::list_projects))
        .route("/projects/{slug}", get(handlers::portfolio::get_project))
        .route("/skills", get(handlers::portfolio::list_skills))
        .route("/skills/{slug}/projects", get(handlers::portfolio::skill_projects))
        .route("/gigs", get(handlers::portfolio::list_gigs))
        .route("/gigs/{slug}", get(handlers::portfolio::get_gig))
        .route("/gigs/{slug}/hire", post(handlers::hire::submit_hire_request))
        .route("/site", get(handlers::portfolio::get_site))
        // Analytics
        .route("/analytics/event", post(handlers::analytics::record_event));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - liveness plus a database round trip (no auth required).
async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, axum::Json<serde_json::Value>) {
    let (status, overall, database) = match state.db_pool.ping().await {
        Ok(()) => (StatusCode::OK, "ok", "ok"),
        Err(e) => {
            warn!(error = %e, "health check database ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };
    (
        status,
        axum::Json(serde_json::json!({
            "status": overall,
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
        })),
    )
}
