//! Portfolio catalog repository trait definition.
//!
//! Read side serves the public API and the chat context builder; write side
//! is used by the catalog import.

use folio_types::catalog::{
    CaseStudy, Gig, GigStatus, KnowledgeBaseEntry, Project, SiteConfiguration, Skill, SkillUsage,
};
use folio_types::error::RepositoryError;
use folio_types::import::{NewCaseStudy, NewGig, NewKnowledgeEntry, NewProject, NewSkill};

/// Filter criteria for listing public projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Only featured (`Some(true)`) or only non-featured (`Some(false)`) projects.
    pub featured: Option<bool>,
    /// Only projects tagged with the skill of this slug.
    pub skill_slug: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u32>,
}

/// Repository trait for the portfolio catalog.
///
/// Every `*_public_*` method only ever returns projects whose visibility is
/// `public`. Implementations live in folio-infra (`SqlitePortfolioRepository`).
pub trait PortfolioRepository: Send + Sync {
    // -----------------------------------------------------------------------
    // Site configuration
    // -----------------------------------------------------------------------

    /// Get the single site configuration row, if one was ever saved.
    fn get_site_configuration(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<SiteConfiguration>, RepositoryError>> + Send;

    /// Insert or replace the site configuration row.
    fn save_site_configuration(
        &self,
        site: &SiteConfiguration,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    /// List public projects: featured first, then `order`, then newest start date.
    fn list_public_projects(
        &self,
        filter: &ProjectFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Project>, RepositoryError>> + Send;

    /// Get a public project by slug.
    fn get_public_project(
        &self,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Option<Project>, RepositoryError>> + Send;

    /// Get a public project by numeric id.
    fn get_public_project_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Project>, RepositoryError>> + Send;

    /// Get the case study attached to a project, published or not.
    fn get_case_study(
        &self,
        project_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<CaseStudy>, RepositoryError>> + Send;

    // -----------------------------------------------------------------------
    // Skills
    // -----------------------------------------------------------------------

    /// List every skill with its public project count, ordered by category,
    /// `order`, then name.
    fn list_skills(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<SkillUsage>, RepositoryError>> + Send;

    /// Get a skill by slug.
    fn get_skill(
        &self,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    // -----------------------------------------------------------------------
    // Gigs
    // -----------------------------------------------------------------------

    /// List gigs whose status is in `statuses` (all gigs when empty),
    /// featured first, then `order`, then title.
    fn list_gigs(
        &self,
        statuses: &[GigStatus],
    ) -> impl std::future::Future<Output = Result<Vec<Gig>, RepositoryError>> + Send;

    /// Get a gig by slug, whatever its status.
    fn get_gig(
        &self,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Option<Gig>, RepositoryError>> + Send;

    // -----------------------------------------------------------------------
    // Import
    // -----------------------------------------------------------------------

    /// Insert or update a skill, matched by name.
    fn upsert_skill(
        &self,
        skill: &NewSkill,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Skill, RepositoryError>> + Send;

    /// Insert or update a project, matched by slug.
    ///
    /// The project's skill links are replaced by `project.skills`; names that
    /// match no skill are created with default attributes.
    fn upsert_project(
        &self,
        project: &NewProject,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Project, RepositoryError>> + Send;

    /// Insert or update the case study of a project.
    fn upsert_case_study(
        &self,
        project_id: i64,
        case_study: &NewCaseStudy,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert or update a gig, matched by slug.
    fn upsert_gig(
        &self,
        gig: &NewGig,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Gig, RepositoryError>> + Send;

    /// Insert or update a knowledge-base entry, matched by title.
    fn upsert_knowledge_entry(
        &self,
        entry: &NewKnowledgeEntry,
    ) -> impl std::future::Future<Output = Result<KnowledgeBaseEntry, RepositoryError>> + Send;

    /// List knowledge-base entries, highest priority first.
    fn list_knowledge_entries(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<KnowledgeBaseEntry>, RepositoryError>> + Send;
}
