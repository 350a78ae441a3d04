//! Portfolio catalog service.
//!
//! Read API over projects, skills and gigs, plus the catalog import used by
//! `folio import`.

use folio_types::catalog::{
    Gig, GigStatus, Project, ProjectDetail, SiteConfiguration, SkillUsage, slugify,
};
use folio_types::error::CatalogError;
use folio_types::import::CatalogFile;
use serde::Serialize;
use tracing::{debug, info};

use crate::repository::portfolio::{PortfolioRepository, ProjectFilter};

/// Statuses listed when no explicit status filter is given.
const LISTED_GIG_STATUSES: &[GigStatus] = &[GigStatus::Open, GigStatus::Limited];

/// Counts of records written by one import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub site_updated: bool,
    pub skills: usize,
    pub projects: usize,
    pub case_studies: usize,
    pub gigs: usize,
    pub knowledge_entries: usize,
}

/// Service over the portfolio catalog.
pub struct PortfolioService<P: PortfolioRepository> {
    repo: P,
}

impl<P: PortfolioRepository> PortfolioService<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    /// Stored site configuration, or the defaults when none was imported yet.
    pub async fn site_configuration(&self) -> Result<SiteConfiguration, CatalogError> {
        match self.repo.get_site_configuration().await? {
            Some(site) => Ok(site),
            None => {
                debug!("no site configuration stored, using defaults");
                Ok(SiteConfiguration::default())
            }
        }
    }

    pub async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, CatalogError> {
        Ok(self.repo.list_public_projects(filter).await?)
    }

    /// A public project with its case study, when that case study is published.
    pub async fn project_detail(&self, slug: &str) -> Result<ProjectDetail, CatalogError> {
        let project = self
            .repo
            .get_public_project(slug)
            .await?
            .ok_or_else(|| CatalogError::NotFound {
                kind: "project",
                slug: slug.to_string(),
            })?;
        let case_study = self
            .repo
            .get_case_study(project.id)
            .await?
            .filter(|cs| cs.is_published);
        Ok(ProjectDetail {
            project,
            case_study,
        })
    }

    pub async fn list_skills(&self) -> Result<Vec<SkillUsage>, CatalogError> {
        Ok(self.repo.list_skills().await?)
    }

    /// Public projects tagged with a skill.
    pub async fn skill_projects(&self, slug: &str) -> Result<Vec<Project>, CatalogError> {
        if self.repo.get_skill(slug).await?.is_none() {
            return Err(CatalogError::NotFound {
                kind: "skill",
                slug: slug.to_string(),
            });
        }
        let filter = ProjectFilter {
            skill_slug: Some(slug.to_string()),
            ..ProjectFilter::default()
        };
        Ok(self.repo.list_public_projects(&filter).await?)
    }

    /// Gigs with the given status, or every open and limited gig.
    pub async fn list_gigs(&self, status: Option<GigStatus>) -> Result<Vec<Gig>, CatalogError> {
        let gigs = match status {
            Some(status) => self.repo.list_gigs(&[status]).await?,
            None => self.repo.list_gigs(LISTED_GIG_STATUSES).await?,
        };
        Ok(gigs)
    }

    pub async fn gig(&self, slug: &str) -> Result<Gig, CatalogError> {
        self.repo
            .get_gig(slug)
            .await?
            .ok_or_else(|| CatalogError::NotFound {
                kind: "gig",
                slug: slug.to_string(),
            })
    }

    /// Upsert every section of an import file.
    ///
    /// Sections are applied in dependency order: site, skills, projects (with
    /// their case studies), gigs, knowledge base. Validation happens up front
    /// so a bad entry aborts before anything is written.
    pub async fn import(&self, file: &CatalogFile) -> Result<ImportSummary, CatalogError> {
        let skill_slugs = file
            .skills
            .iter()
            .map(|s| resolve_slug(s.slug.as_deref(), &s.name))
            .collect::<Result<Vec<_>, _>>()?;
        let project_slugs = file
            .projects
            .iter()
            .map(|p| resolve_slug(p.slug.as_deref(), &p.title))
            .collect::<Result<Vec<_>, _>>()?;
        let gig_slugs = file
            .gigs
            .iter()
            .map(|g| resolve_slug(g.slug.as_deref(), &g.title))
            .collect::<Result<Vec<_>, _>>()?;

        for skill in &file.skills {
            if !(1..=5).contains(&skill.proficiency_level) {
                return Err(CatalogError::Invalid(format!(
                    "skill '{}': proficiency_level must be between 1 and 5",
                    skill.name
                )));
            }
        }
        for gig in &file.gigs {
            if gig.price_max.is_some_and(|max| max < gig.price_min) {
                return Err(CatalogError::Invalid(format!(
                    "gig '{}': price_max is below price_min",
                    gig.title
                )));
            }
        }
        if file.knowledge.iter().any(|k| k.title.trim().is_empty()) {
            return Err(CatalogError::Invalid(
                "knowledge entry title must not be empty".to_string(),
            ));
        }

        let mut summary = ImportSummary::default();

        if let Some(site) = &file.site {
            self.repo.save_site_configuration(site).await?;
            summary.site_updated = true;
        }

        for (skill, slug) in file.skills.iter().zip(&skill_slugs) {
            self.repo.upsert_skill(skill, slug).await?;
            summary.skills += 1;
        }

        for (project, slug) in file.projects.iter().zip(&project_slugs) {
            let stored = self.repo.upsert_project(project, slug).await?;
            summary.projects += 1;
            if let Some(case_study) = &project.case_study {
                self.repo.upsert_case_study(stored.id, case_study).await?;
                summary.case_studies += 1;
            }
        }

        for (gig, slug) in file.gigs.iter().zip(&gig_slugs) {
            self.repo.upsert_gig(gig, slug).await?;
            summary.gigs += 1;
        }

        for entry in &file.knowledge {
            self.repo.upsert_knowledge_entry(entry).await?;
            summary.knowledge_entries += 1;
        }

        info!(
            skills = summary.skills,
            projects = summary.projects,
            gigs = summary.gigs,
            knowledge = summary.knowledge_entries,
            "catalog imported"
        );
        Ok(summary)
    }
}

/// Explicit slug if given, else one derived from the title.
fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, CatalogError> {
    if title.trim().is_empty() {
        return Err(CatalogError::Invalid("title must not be empty".to_string()));
    }
    let slug = match explicit {
        Some(slug) => slugify(slug),
        None => slugify(title),
    };
    if slug.is_empty() {
        return Err(CatalogError::Invalid(format!(
            "'{title}' does not produce a usable slug"
        )));
    }
    Ok(slug)
}
