//! SQLite portfolio catalog repository.
//!
//! Projects carry their skill names, loaded with a second query over
//! `project_skills` and ordered the way skills are displayed. Upserts key on
//! the natural identifier of each record: skill name, project slug, gig slug,
//! knowledge entry title.

use std::collections::HashMap;

use chrono::Utc;
use folio_core::repository::portfolio::{PortfolioRepository, ProjectFilter};
use folio_types::catalog::{
    CaseStudy, Gig, GigStatus, KnowledgeBaseEntry, Project, SiteConfiguration, Skill, SkillUsage,
    Visibility, slugify,
};
use folio_types::error::RepositoryError;
use folio_types::import::{NewCaseStudy, NewGig, NewKnowledgeEntry, NewProject, NewSkill};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use super::pool::DatabasePool;
use super::{format_datetime, parse_date, parse_datetime, query_error};

const SKILL_DISPLAY_ORDER: &str = "s.category ASC, s.sort_order ASC, s.name ASC";

#[derive(Clone)]
pub struct SqlitePortfolioRepository {
    pool: DatabasePool,
}

impl SqlitePortfolioRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Fill `skills` on each project from the link table.
    async fn attach_skills(&self, projects: &mut [Project]) -> Result<(), RepositoryError> {
        if projects.is_empty() {
            return Ok(());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT ps.project_id, s.name FROM project_skills ps \
             JOIN skills s ON s.id = ps.skill_id WHERE ps.project_id IN (",
        );
        let mut ids = qb.separated(", ");
        for project in projects.iter() {
            ids.push_bind(project.id);
        }
        qb.push(") ORDER BY ");
        qb.push(SKILL_DISPLAY_ORDER);

        let rows = qb
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let mut by_project: HashMap<i64, Vec<String>> = HashMap::new();
        for row in &rows {
            let project_id: i64 = row.try_get("project_id").map_err(query_error)?;
            let name: String = row.try_get("name").map_err(query_error)?;
            by_project.entry(project_id).or_default().push(name);
        }
        for project in projects.iter_mut() {
            project.skills = by_project.remove(&project.id).unwrap_or_default();
        }
        Ok(())
    }

    async fn fetch_projects(&self, rows: Vec<SqliteRow>) -> Result<Vec<Project>, RepositoryError> {
        let mut projects = rows
            .iter()
            .map(|row| ProjectRow::from_row(row).map_err(query_error)?.into_project())
            .collect::<Result<Vec<_>, _>>()?;
        self.attach_skills(&mut projects).await?;
        Ok(projects)
    }

    async fn fetch_one_project(&self, row: Option<SqliteRow>) -> Result<Option<Project>, RepositoryError> {
        match row {
            Some(row) => Ok(self.fetch_projects(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Private Row types
// ---------------------------------------------------------------------------

struct SkillRow {
    id: i64,
    name: String,
    slug: String,
    description: String,
    category: String,
    proficiency_level: i64,
    is_featured: bool,
    sort_order: i64,
}

impl SkillRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            proficiency_level: row.try_get("proficiency_level")?,
            is_featured: row.try_get("is_featured")?,
            sort_order: row.try_get("sort_order")?,
        })
    }

    fn into_skill(self) -> Result<Skill, RepositoryError> {
        Ok(Skill {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            category: self.category.parse().map_err(RepositoryError::Query)?,
            proficiency_level: self.proficiency_level as u8,
            is_featured: self.is_featured,
            order: self.sort_order as i32,
        })
    }
}

struct ProjectRow {
    id: i64,
    title: String,
    slug: String,
    short_tagline: String,
    description_short: String,
    description_long: String,
    role: String,
    start_date: String,
    end_date: Option<String>,
    repo_url: String,
    live_demo_url: String,
    metrics: String,
    visibility: String,
    is_featured: bool,
    sort_order: i64,
    created_at: String,
    updated_at: String,
}

impl ProjectRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            short_tagline: row.try_get("short_tagline")?,
            description_short: row.try_get("description_short")?,
            description_long: row.try_get("description_long")?,
            role: row.try_get("role")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            repo_url: row.try_get("repo_url")?,
            live_demo_url: row.try_get("live_demo_url")?,
            metrics: row.try_get("metrics")?,
            visibility: row.try_get("visibility")?,
            is_featured: row.try_get("is_featured")?,
            sort_order: row.try_get("sort_order")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_project(self) -> Result<Project, RepositoryError> {
        let metrics = serde_json::from_str(&self.metrics)
            .map_err(|e| RepositoryError::Query(format!("invalid metrics: {e}")))?;

        Ok(Project {
            id: self.id,
            title: self.title,
            slug: self.slug,
            short_tagline: self.short_tagline,
            description_short: self.description_short,
            description_long: self.description_long,
            role: self.role.parse().map_err(RepositoryError::Query)?,
            start_date: parse_date(&self.start_date)?,
            end_date: self.end_date.as_deref().map(parse_date).transpose()?,
            repo_url: self.repo_url,
            live_demo_url: self.live_demo_url,
            metrics,
            skills: Vec::new(),
            visibility: self.visibility.parse().map_err(RepositoryError::Query)?,
            is_featured: self.is_featured,
            order: self.sort_order as i32,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

struct GigRow {
    id: i64,
    title: String,
    slug: String,
    short_description: String,
    long_description: String,
    price_min: f64,
    price_max: Option<f64>,
    price_type: String,
    delivery_time_min: i64,
    delivery_time_max: Option<i64>,
    delivery_time_unit: String,
    status: String,
    is_featured: bool,
    sort_order: i64,
    created_at: String,
    updated_at: String,
}

impl GigRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            short_description: row.try_get("short_description")?,
            long_description: row.try_get("long_description")?,
            price_min: row.try_get("price_min")?,
            price_max: row.try_get("price_max")?,
            price_type: row.try_get("price_type")?,
            delivery_time_min: row.try_get("delivery_time_min")?,
            delivery_time_max: row.try_get("delivery_time_max")?,
            delivery_time_unit: row.try_get("delivery_time_unit")?,
            status: row.try_get("status")?,
            is_featured: row.try_get("is_featured")?,
            sort_order: row.try_get("sort_order")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_gig(self) -> Result<Gig, RepositoryError> {
        Ok(Gig {
            id: self.id,
            title: self.title,
            slug: self.slug,
            short_description: self.short_description,
            long_description: self.long_description,
            price_min: self.price_min,
            price_max: self.price_max,
            price_type: self.price_type.parse().map_err(RepositoryError::Query)?,
            delivery_time_min: self.delivery_time_min as u32,
            delivery_time_max: self.delivery_time_max.map(|v| v as u32),
            delivery_time_unit: self
                .delivery_time_unit
                .parse()
                .map_err(RepositoryError::Query)?,
            status: self.status.parse().map_err(RepositoryError::Query)?,
            is_featured: self.is_featured,
            order: self.sort_order as i32,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn case_study_from_row(row: &SqliteRow) -> Result<CaseStudy, sqlx::Error> {
    let reading_time: i64 = row.try_get("reading_time")?;
    Ok(CaseStudy {
        project_id: row.try_get("project_id")?,
        problem_statement: row.try_get("problem_statement")?,
        approach: row.try_get("approach")?,
        results: row.try_get("results")?,
        is_published: row.try_get("is_published")?,
        reading_time: reading_time as u32,
    })
}

fn site_from_row(row: &SqliteRow) -> Result<SiteConfiguration, sqlx::Error> {
    Ok(SiteConfiguration {
        site_name: row.try_get("site_name")?,
        site_tagline: row.try_get("site_tagline")?,
        owner_name: row.try_get("owner_name")?,
        email: row.try_get("email")?,
        location: row.try_get("location")?,
        about_short: row.try_get("about_short")?,
        about_medium: row.try_get("about_medium")?,
        chatbot_persona_professional: row.try_get("chatbot_persona_professional")?,
        chatbot_persona_technical: row.try_get("chatbot_persona_technical")?,
        chatbot_persona_casual: row.try_get("chatbot_persona_casual")?,
    })
}

fn knowledge_from_row(row: &SqliteRow) -> Result<KnowledgeBaseEntry, RepositoryError> {
    let get_str = |col: &str| row.try_get::<String, _>(col).map_err(query_error);
    let tags = serde_json::from_str(&get_str("tags")?)
        .map_err(|e| RepositoryError::Query(format!("invalid tags: {e}")))?;
    let related_urls = serde_json::from_str(&get_str("related_urls")?)
        .map_err(|e| RepositoryError::Query(format!("invalid related_urls: {e}")))?;
    let priority: i64 = row.try_get("priority").map_err(query_error)?;

    Ok(KnowledgeBaseEntry {
        id: row.try_get("id").map_err(query_error)?,
        title: get_str("title")?,
        content: get_str("content")?,
        tags,
        content_type: get_str("content_type")?
            .parse()
            .map_err(RepositoryError::Query)?,
        related_urls,
        priority: priority as i32,
        is_active: row.try_get("is_active").map_err(query_error)?,
    })
}

fn to_json(value: &impl serde::Serialize) -> Result<String, RepositoryError> {
    serde_json::to_string(value).map_err(|e| RepositoryError::Query(e.to_string()))
}

/// Unique-constraint failures become `Conflict` so callers can report them.
fn write_error(e: sqlx::Error) -> RepositoryError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => RepositoryError::Conflict(db.message().to_string()),
        _ => query_error(e),
    }
}

// ---------------------------------------------------------------------------
// PortfolioRepository implementation
// ---------------------------------------------------------------------------

impl PortfolioRepository for SqlitePortfolioRepository {
    async fn get_site_configuration(&self) -> Result<Option<SiteConfiguration>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM site_configuration WHERE id = 1")
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.map(|row| site_from_row(&row).map_err(query_error))
            .transpose()
    }

    async fn save_site_configuration(&self, site: &SiteConfiguration) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO site_configuration (id, site_name, site_tagline, owner_name, email,
                   location, about_short, about_medium, chatbot_persona_professional,
                   chatbot_persona_technical, chatbot_persona_casual, updated_at)
               VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   site_name = excluded.site_name,
                   site_tagline = excluded.site_tagline,
                   owner_name = excluded.owner_name,
                   email = excluded.email,
                   location = excluded.location,
                   about_short = excluded.about_short,
                   about_medium = excluded.about_medium,
                   chatbot_persona_professional = excluded.chatbot_persona_professional,
                   chatbot_persona_technical = excluded.chatbot_persona_technical,
                   chatbot_persona_casual = excluded.chatbot_persona_casual,
                   updated_at = excluded.updated_at"#,
        )
        .bind(&site.site_name)
        .bind(&site.site_tagline)
        .bind(&site.owner_name)
        .bind(&site.email)
        .bind(&site.location)
        .bind(&site.about_short)
        .bind(&site.about_medium)
        .bind(&site.chatbot_persona_professional)
        .bind(&site.chatbot_persona_technical)
        .bind(&site.chatbot_persona_casual)
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(())
    }

    async fn list_public_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, RepositoryError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM projects WHERE visibility = ");
        qb.push_bind(Visibility::Public.to_string());

        if let Some(featured) = filter.featured {
            qb.push(" AND is_featured = ").push_bind(featured);
        }
        if let Some(skill_slug) = &filter.skill_slug {
            qb.push(
                " AND id IN (SELECT ps.project_id FROM project_skills ps \
                 JOIN skills s ON s.id = ps.skill_id WHERE s.slug = ",
            )
            .push_bind(skill_slug.clone())
            .push(")");
        }
        qb.push(" ORDER BY is_featured DESC, sort_order ASC, start_date DESC");
        if let Some(limit) = filter.limit {
            qb.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let rows = qb
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;
        self.fetch_projects(rows).await
    }

    async fn get_public_project(&self, slug: &str) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM projects WHERE slug = ? AND visibility = 'public'")
            .bind(slug)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;
        self.fetch_one_project(row).await
    }

    async fn get_public_project_by_id(&self, id: i64) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM projects WHERE id = ? AND visibility = 'public'")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;
        self.fetch_one_project(row).await
    }

    async fn get_case_study(&self, project_id: i64) -> Result<Option<CaseStudy>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM case_studies WHERE project_id = ?")
            .bind(project_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.map(|row| case_study_from_row(&row).map_err(query_error))
            .transpose()
    }

    async fn list_skills(&self) -> Result<Vec<SkillUsage>, RepositoryError> {
        let sql = format!(
            r#"SELECT s.*,
                   (SELECT COUNT(*) FROM project_skills ps
                    JOIN projects p ON p.id = ps.project_id
                    WHERE ps.skill_id = s.id AND p.visibility = 'public') AS public_project_count
               FROM skills s
               ORDER BY {SKILL_DISPLAY_ORDER}"#
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter()
            .map(|row| {
                let count: i64 = row.try_get("public_project_count").map_err(query_error)?;
                Ok(SkillUsage {
                    skill: SkillRow::from_row(row).map_err(query_error)?.into_skill()?,
                    public_project_count: count as u32,
                })
            })
            .collect()
    }

    async fn get_skill(&self, slug: &str) -> Result<Option<Skill>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM skills WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.map(|row| SkillRow::from_row(&row).map_err(query_error)?.into_skill())
            .transpose()
    }

    async fn list_gigs(&self, statuses: &[GigStatus]) -> Result<Vec<Gig>, RepositoryError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM gigs");
        if !statuses.is_empty() {
            qb.push(" WHERE status IN (");
            let mut list = qb.separated(", ");
            for status in statuses {
                list.push_bind(status.to_string());
            }
            qb.push(")");
        }
        qb.push(" ORDER BY is_featured DESC, sort_order ASC, title ASC");

        let rows = qb
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter()
            .map(|row| GigRow::from_row(row).map_err(query_error)?.into_gig())
            .collect()
    }

    async fn get_gig(&self, slug: &str) -> Result<Option<Gig>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM gigs WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.map(|row| GigRow::from_row(&row).map_err(query_error)?.into_gig())
            .transpose()
    }

    async fn upsert_skill(&self, skill: &NewSkill, slug: &str) -> Result<Skill, RepositoryError> {
        let row = sqlx::query(
            r#"INSERT INTO skills (name, slug, description, category, proficiency_level, is_featured, sort_order)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(name) DO UPDATE SET
                   slug = excluded.slug,
                   description = excluded.description,
                   category = excluded.category,
                   proficiency_level = excluded.proficiency_level,
                   is_featured = excluded.is_featured,
                   sort_order = excluded.sort_order
               RETURNING *"#,
        )
        .bind(&skill.name)
        .bind(slug)
        .bind(&skill.description)
        .bind(skill.category.to_string())
        .bind(i64::from(skill.proficiency_level))
        .bind(skill.is_featured)
        .bind(i64::from(skill.order))
        .fetch_one(&self.pool.writer)
        .await
        .map_err(write_error)?;

        SkillRow::from_row(&row).map_err(query_error)?.into_skill()
    }

    async fn upsert_project(&self, project: &NewProject, slug: &str) -> Result<Project, RepositoryError> {
        let now = format_datetime(&Utc::now());
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let project_id: i64 = sqlx::query_scalar(
            r#"INSERT INTO projects (title, slug, short_tagline, description_short, description_long,
                   role, start_date, end_date, repo_url, live_demo_url, metrics, visibility,
                   is_featured, sort_order, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(slug) DO UPDATE SET
                   title = excluded.title,
                   short_tagline = excluded.short_tagline,
                   description_short = excluded.description_short,
                   description_long = excluded.description_long,
                   role = excluded.role,
                   start_date = excluded.start_date,
                   end_date = excluded.end_date,
                   repo_url = excluded.repo_url,
                   live_demo_url = excluded.live_demo_url,
                   metrics = excluded.metrics,
                   visibility = excluded.visibility,
                   is_featured = excluded.is_featured,
                   sort_order = excluded.sort_order,
                   updated_at = excluded.updated_at
               RETURNING id"#,
        )
        .bind(&project.title)
        .bind(slug)
        .bind(&project.short_tagline)
        .bind(&project.description_short)
        .bind(&project.description_long)
        .bind(project.role.to_string())
        .bind(project.start_date.to_string())
        .bind(project.end_date.map(|d| d.to_string()))
        .bind(&project.repo_url)
        .bind(&project.live_demo_url)
        .bind(to_json(&project.metrics)?)
        .bind(project.visibility.to_string())
        .bind(project.is_featured)
        .bind(i64::from(project.order))
        .bind(&now)
        .bind(&now)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_error)?;

        sqlx::query("DELETE FROM project_skills WHERE project_id = ?")
            .bind(project_id)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        for name in &project.skills {
            // Skills named only by a project get default attributes.
            sqlx::query("INSERT INTO skills (name, slug) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
                .bind(name)
                .bind(slugify(name))
                .execute(&mut *tx)
                .await
                .map_err(write_error)?;

            sqlx::query(
                r#"INSERT OR IGNORE INTO project_skills (project_id, skill_id)
                   SELECT ?, id FROM skills WHERE name = ?"#,
            )
            .bind(project_id)
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;
        }

        let row = sqlx::query("SELECT * FROM projects WHERE id = ?")
            .bind(project_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(query_error)?;
        let mut stored = ProjectRow::from_row(&row).map_err(query_error)?.into_project()?;

        tx.commit().await.map_err(query_error)?;

        self.attach_skills(std::slice::from_mut(&mut stored)).await?;
        Ok(stored)
    }

    async fn upsert_case_study(&self, project_id: i64, case_study: &NewCaseStudy) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO case_studies (project_id, problem_statement, approach, results, is_published, reading_time)
               VALUES (?, ?, ?, ?, ?, ?)
               ON CONFLICT(project_id) DO UPDATE SET
                   problem_statement = excluded.problem_statement,
                   approach = excluded.approach,
                   results = excluded.results,
                   is_published = excluded.is_published,
                   reading_time = excluded.reading_time"#,
        )
        .bind(project_id)
        .bind(&case_study.problem_statement)
        .bind(&case_study.approach)
        .bind(&case_study.results)
        .bind(case_study.is_published)
        .bind(i64::from(case_study.reading_time))
        .execute(&self.pool.writer)
        .await
        .map_err(write_error)?;

        Ok(())
    }

    async fn upsert_gig(&self, gig: &NewGig, slug: &str) -> Result<Gig, RepositoryError> {
        let now = format_datetime(&Utc::now());
        let row = sqlx::query(
            r#"INSERT INTO gigs (title, slug, short_description, long_description, price_min, price_max,
                   price_type, delivery_time_min, delivery_time_max, delivery_time_unit, status,
                   is_featured, sort_order, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(slug) DO UPDATE SET
                   title = excluded.title,
                   short_description = excluded.short_description,
                   long_description = excluded.long_description,
                   price_min = excluded.price_min,
                   price_max = excluded.price_max,
                   price_type = excluded.price_type,
                   delivery_time_min = excluded.delivery_time_min,
                   delivery_time_max = excluded.delivery_time_max,
                   delivery_time_unit = excluded.delivery_time_unit,
                   status = excluded.status,
                   is_featured = excluded.is_featured,
                   sort_order = excluded.sort_order,
                   updated_at = excluded.updated_at
               RETURNING *"#,
        )
        .bind(&gig.title)
        .bind(slug)
        .bind(&gig.short_description)
        .bind(&gig.long_description)
        .bind(gig.price_min)
        .bind(gig.price_max)
        .bind(gig.price_type.to_string())
        .bind(i64::from(gig.delivery_time_min))
        .bind(gig.delivery_time_max.map(i64::from))
        .bind(gig.delivery_time_unit.to_string())
        .bind(gig.status.to_string())
        .bind(gig.is_featured)
        .bind(i64::from(gig.order))
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool.writer)
        .await
        .map_err(write_error)?;

        GigRow::from_row(&row).map_err(query_error)?.into_gig()
    }

    async fn upsert_knowledge_entry(&self, entry: &NewKnowledgeEntry) -> Result<KnowledgeBaseEntry, RepositoryError> {
        let row = sqlx::query(
            r#"INSERT INTO knowledge_base (title, content, tags, content_type, related_urls, priority, is_active, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(title) DO UPDATE SET
                   content = excluded.content,
                   tags = excluded.tags,
                   content_type = excluded.content_type,
                   related_urls = excluded.related_urls,
                   priority = excluded.priority,
                   is_active = excluded.is_active,
                   updated_at = excluded.updated_at
               RETURNING *"#,
        )
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(to_json(&entry.tags)?)
        .bind(entry.content_type.to_string())
        .bind(to_json(&entry.related_urls)?)
        .bind(i64::from(entry.priority))
        .bind(entry.is_active)
        .bind(format_datetime(&Utc::now()))
        .fetch_one(&self.pool.writer)
        .await
        .map_err(write_error)?;

        knowledge_from_row(&row)
    }

    async fn list_knowledge_entries(&self) -> Result<Vec<KnowledgeBaseEntry>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM knowledge_base ORDER BY priority DESC, title ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter().map(knowledge_from_row).collect()
    }
}
