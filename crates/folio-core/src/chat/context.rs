//! Portfolio context builder.
//!
//! Gathers a bounded slice of the public catalog into a plain serializable
//! structure that the prompt assembler embeds as JSON. Nothing is cached:
//! the context is rebuilt for every query.

use chrono::NaiveDate;
use folio_types::catalog::{GigStatus, ProjectRole, SiteConfiguration, SkillCategory};
use folio_types::error::ChatError;
use serde::Serialize;

use crate::repository::portfolio::{PortfolioRepository, ProjectFilter};

/// Everything the assistant is allowed to know about the portfolio.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioContext {
    pub site_info: SiteInfo,
    pub projects: Vec<ProjectSummary>,
    pub skills: Vec<SkillSummary>,
    pub gigs: Vec<GigSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused_project: Option<FocusedProject>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    pub email: String,
    pub location: String,
    pub about_short: String,
    pub about_medium: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub id: i64,
    pub title: String,
    pub short_tagline: String,
    pub description_short: String,
    pub role: ProjectRole,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub skills: Vec<String>,
    pub repo_url: String,
    pub live_demo_url: String,
    pub metrics: serde_json::Value,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillSummary {
    pub name: String,
    pub category: SkillCategory,
    pub proficiency_level: u8,
    pub description: String,
    pub project_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GigSummary {
    pub id: i64,
    pub title: String,
    pub short_description: String,
    pub price_display: String,
    pub delivery_display: String,
    pub url: String,
}

/// The project a visitor is currently looking at.
#[derive(Debug, Clone, Serialize)]
pub struct FocusedProject {
    pub id: i64,
    pub title: String,
    pub description_long: String,
    pub role: ProjectRole,
    pub skills: Vec<String>,
    pub metrics: serde_json::Value,
    /// True when any case study exists, published or not.
    pub has_case_study: bool,
    /// Present only for published case studies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_study: Option<CaseStudySummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseStudySummary {
    pub problem_statement: String,
    pub approach: String,
    pub results: String,
}

/// Builds a [`PortfolioContext`] from the catalog.
pub struct ContextBuilder<'a, P: PortfolioRepository> {
    portfolio: &'a P,
    site: &'a SiteConfiguration,
    project_limit: u32,
}

impl<'a, P: PortfolioRepository> ContextBuilder<'a, P> {
    pub fn new(portfolio: &'a P, site: &'a SiteConfiguration, project_limit: u32) -> Self {
        Self {
            portfolio,
            site,
            project_limit,
        }
    }

    /// Build the context for one query.
    ///
    /// `chat_context` is the free-form object sent with the query; only its
    /// `project_id` key is read.
    pub async fn build(&self, chat_context: &serde_json::Value) -> Result<PortfolioContext, ChatError> {
        let filter = ProjectFilter {
            limit: Some(self.project_limit),
            ..ProjectFilter::default()
        };
        let projects = self
            .portfolio
            .list_public_projects(&filter)
            .await?
            .into_iter()
            .map(|p| ProjectSummary {
                url: p.url(),
                id: p.id,
                title: p.title,
                short_tagline: p.short_tagline,
                description_short: p.description_short,
                role: p.role,
                start_date: p.start_date,
                end_date: p.end_date,
                skills: p.skills,
                repo_url: p.repo_url,
                live_demo_url: p.live_demo_url,
                metrics: p.metrics,
            })
            .collect();

        let skills = self
            .portfolio
            .list_skills()
            .await?
            .into_iter()
            .filter(|usage| usage.public_project_count > 0)
            .map(|usage| SkillSummary {
                name: usage.skill.name,
                category: usage.skill.category,
                proficiency_level: usage.skill.proficiency_level,
                description: usage.skill.description,
                project_count: usage.public_project_count,
            })
            .collect();

        let gigs = self
            .portfolio
            .list_gigs(&[GigStatus::Open])
            .await?
            .into_iter()
            .map(|g| GigSummary {
                price_display: g.price_display(),
                delivery_display: g.delivery_display(),
                url: g.url(),
                id: g.id,
                title: g.title,
                short_description: g.short_description,
            })
            .collect();

        let focused_project = match project_id(chat_context) {
            Some(id) => self.focused_project(id).await?,
            None => None,
        };

        Ok(PortfolioContext {
            site_info: SiteInfo {
                name: self.site.site_name.clone(),
                tagline: self.site.site_tagline.clone(),
                email: self.site.email.clone(),
                location: self.site.location.clone(),
                about_short: self.site.about_short.clone(),
                about_medium: self.site.about_medium.clone(),
            },
            projects,
            skills,
            gigs,
            focused_project,
        })
    }

    async fn focused_project(&self, id: i64) -> Result<Option<FocusedProject>, ChatError> {
        let Some(project) = self.portfolio.get_public_project_by_id(id).await? else {
            return Ok(None);
        };
        let case_study = self.portfolio.get_case_study(project.id).await?;

        Ok(Some(FocusedProject {
            id: project.id,
            title: project.title,
            description_long: project.description_long,
            role: project.role,
            skills: project.skills,
            metrics: project.metrics,
            has_case_study: case_study.is_some(),
            case_study: case_study
                .filter(|cs| cs.is_published)
                .map(|cs| CaseStudySummary {
                    problem_statement: cs.problem_statement,
                    approach: cs.approach,
                    results: cs.results,
                }),
        }))
    }
}

/// `project_id` from the chat context, as a number or a numeric string.
fn project_id(chat_context: &serde_json::Value) -> Option<i64> {
    match chat_context.get("project_id")? {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
