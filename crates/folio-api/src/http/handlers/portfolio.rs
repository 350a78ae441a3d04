//! Portfolio catalog HTTP handlers. All read-only and unauthenticated.

use axum::extract::{Path, State};
use serde::Deserialize;

use folio_core::repository::portfolio::ProjectFilter;
use folio_types::catalog::{
    Gig, GigStatus, Project, ProjectDetail, SiteConfiguration, SkillUsage,
};

use crate::http::error::AppError;
use crate::http::extractors::json::ApiQuery;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProjectListQuery {
    pub featured: Option<bool>,
    /// Skill slug.
    pub skill: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GigListQuery {
    pub status: Option<String>,
}

/// GET /api/v1/projects?featured=&skill=&limit=
pub async fn list_projects(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProjectListQuery>,
) -> Result<ApiResponse<Vec<Project>>, AppError> {
    let timer = RequestTimer::start();
    let filter = ProjectFilter {
        featured: query.featured,
        skill_slug: query.skill,
        limit: query.limit,
    };
    let projects = state.portfolio_service.list_projects(&filter).await?;
    Ok(timer.respond(projects).with_link("self", "/api/v1/projects"))
}

/// GET /api/v1/projects/{slug}
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ApiResponse<ProjectDetail>, AppError> {
    let timer = RequestTimer::start();
    let detail = state.portfolio_service.project_detail(&slug).await?;
    Ok(timer
        .respond(detail)
        .with_link("self", &format!("/api/v1/projects/{slug}")))
}

/// GET /api/v1/skills
pub async fn list_skills(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<SkillUsage>>, AppError> {
    let timer = RequestTimer::start();
    let skills = state.portfolio_service.list_skills().await?;
    Ok(timer.respond(skills))
}

/// GET /api/v1/skills/{slug}/projects
pub async fn skill_projects(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ApiResponse<Vec<Project>>, AppError> {
    let timer = RequestTimer::start();
    let projects = state.portfolio_service.skill_projects(&slug).await?;
    Ok(timer.respond(projects))
}

/// GET /api/v1/gigs?status=
pub async fn list_gigs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<GigListQuery>,
) -> Result<ApiResponse<Vec<Gig>>, AppError> {
    let timer = RequestTimer::start();
    let status = query
        .status
        .as_deref()
        .map(str::parse::<GigStatus>)
        .transpose()
        .map_err(AppError::Validation)?;
    let gigs = state.portfolio_service.list_gigs(status).await?;
    Ok(timer.respond(gigs))
}

/// GET /api/v1/gigs/{slug}
pub async fn get_gig(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ApiResponse<Gig>, AppError> {
    let timer = RequestTimer::start();
    let gig = state.portfolio_service.gig(&slug).await?;
    Ok(timer.respond(gig))
}

/// GET /api/v1/site
pub async fn get_site(
    State(state): State<AppState>,
) -> Result<ApiResponse<SiteConfiguration>, AppError> {
    let timer = RequestTimer::start();
    let site = state.portfolio_service.site_configuration().await?;
    Ok(timer.respond(site))
}
