//! In-memory test doubles shared by the folio-core unit tests.
//!
//! Each fake wraps its state in `Arc<Mutex<..>>` so a test can hand a clone
//! to a service and still inspect what the service wrote.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use folio_types::account::{ApiToken, User};
use folio_types::analytics::AnalyticsEvent;
use folio_types::catalog::{
    CaseStudy, Gig, GigStatus, KnowledgeBaseEntry, Project, ProjectRole, SiteConfiguration, Skill,
    SkillCategory, SkillUsage, Visibility, slugify,
};
use folio_types::chat::{ChatFeedback, ChatMessage, ChatSession};
use folio_types::error::RepositoryError;
use folio_types::hire::HireRequest;
use folio_types::import::{NewCaseStudy, NewGig, NewKnowledgeEntry, NewProject, NewSkill};
use folio_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::llm::provider::LlmProvider;
use crate::repository::account::AccountRepository;
use crate::repository::analytics::AnalyticsRepository;
use crate::repository::hire::HireRequestRepository;
use crate::repository::portfolio::{PortfolioRepository, ProjectFilter};

// ---------------------------------------------------------------------------
// LLM provider
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum Outcome {
    Reply(String),
    Fail(String),
}

/// Provider that answers every request with a fixed outcome and records
/// the requests it receives.
#[derive(Clone)]
pub struct ScriptedProvider {
    outcome: Outcome,
    stop_reason: StopReason,
    usage: Usage,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            outcome: Outcome::Reply(text.to_string()),
            stop_reason: StopReason::EndTurn,
            usage: Usage {
                input_tokens: 120,
                output_tokens: 30,
            },
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Outcome::Fail(message.to_string()),
            ..Self::replying("")
        }
    }

    pub fn stopping_with(mut self, stop_reason: StopReason) -> Self {
        self.stop_reason = stop_reason;
        self
    }

    /// Shared handle on the recorded requests.
    pub fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let outcome = self.outcome.clone();
        let usage = self.usage.clone();
        let stop_reason = self.stop_reason.clone();
        let model = request.model.clone();
        async move {
            match outcome {
                Outcome::Reply(content) => Ok(CompletionResponse {
                    id: "resp-scripted".to_string(),
                    content,
                    model,
                    stop_reason,
                    usage,
                }),
                Outcome::Fail(message) => Err(LlmError::Provider { message }),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog fixtures
// ---------------------------------------------------------------------------

pub fn site() -> SiteConfiguration {
    SiteConfiguration {
        site_name: "Ada's Portfolio".to_string(),
        site_tagline: "Systems Engineer".to_string(),
        owner_name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        location: "London".to_string(),
        about_short: "Builds fast backends.".to_string(),
        ..SiteConfiguration::default()
    }
}

pub fn skill(id: i64, name: &str, category: SkillCategory) -> Skill {
    Skill {
        id,
        name: name.to_string(),
        slug: slugify(name),
        description: format!("{name} description"),
        category,
        proficiency_level: 4,
        is_featured: false,
        order: 0,
    }
}

pub fn project(id: i64, title: &str, visibility: Visibility) -> Project {
    let now = Utc::now();
    Project {
        id,
        title: title.to_string(),
        slug: slugify(title),
        short_tagline: format!("{title} tagline"),
        description_short: format!("{title} short"),
        description_long: format!("{title} long"),
        role: ProjectRole::Solo,
        start_date: NaiveDate::from_ymd_opt(2023, 1, id as u32 % 28 + 1).unwrap_or_default(),
        end_date: None,
        repo_url: String::new(),
        live_demo_url: String::new(),
        metrics: serde_json::json!({}),
        skills: Vec::new(),
        visibility,
        is_featured: false,
        order: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn gig(id: i64, title: &str, status: GigStatus) -> Gig {
    let now = Utc::now();
    Gig {
        id,
        title: title.to_string(),
        slug: slugify(title),
        short_description: format!("{title} short"),
        long_description: format!("{title} long"),
        price_min: 1500.0,
        price_max: Some(3000.0),
        price_type: Default::default(),
        delivery_time_min: 3,
        delivery_time_max: Some(5),
        delivery_time_unit: Default::default(),
        status,
        is_featured: false,
        order: 0,
        created_at: now,
        updated_at: now,
    }
}

// ---------------------------------------------------------------------------
// Portfolio repository
// ---------------------------------------------------------------------------

#[derive(Default)]
struct PortfolioStore {
    site: Option<SiteConfiguration>,
    skills: Vec<Skill>,
    projects: Vec<Project>,
    case_studies: Vec<CaseStudy>,
    gigs: Vec<Gig>,
    knowledge: Vec<KnowledgeBaseEntry>,
}

#[derive(Clone, Default)]
pub struct InMemoryPortfolioRepository {
    store: Arc<Mutex<PortfolioStore>>,
    fail_reads: Arc<AtomicBool>,
}

impl InMemoryPortfolioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skill(self, skill: Skill) -> Self {
        self.store.lock().unwrap().skills.push(skill);
        self
    }

    pub fn with_project(self, project: Project) -> Self {
        self.store.lock().unwrap().projects.push(project);
        self
    }

    pub fn with_case_study(self, case_study: CaseStudy) -> Self {
        self.store.lock().unwrap().case_studies.push(case_study);
        self
    }

    pub fn with_gig(self, gig: Gig) -> Self {
        self.store.lock().unwrap().gigs.push(gig);
        self
    }

    /// Make every catalog read fail with a query error.
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn projects(&self) -> Vec<Project> {
        self.store.lock().unwrap().projects.clone()
    }

    pub fn skills(&self) -> Vec<Skill> {
        self.store.lock().unwrap().skills.clone()
    }

    pub fn case_studies(&self) -> Vec<CaseStudy> {
        self.store.lock().unwrap().case_studies.clone()
    }

    fn check_reads(&self) -> Result<(), RepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(RepositoryError::Query("catalog unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| {
        b.is_featured
            .cmp(&a.is_featured)
            .then(a.order.cmp(&b.order))
            .then(b.start_date.cmp(&a.start_date))
    });
}

impl PortfolioRepository for InMemoryPortfolioRepository {
    async fn get_site_configuration(&self) -> Result<Option<SiteConfiguration>, RepositoryError> {
        self.check_reads()?;
        Ok(self.store.lock().unwrap().site.clone())
    }

    async fn save_site_configuration(&self, site: &SiteConfiguration) -> Result<(), RepositoryError> {
        self.store.lock().unwrap().site = Some(site.clone());
        Ok(())
    }

    async fn list_public_projects(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Vec<Project>, RepositoryError> {
        self.check_reads()?;
        let store = self.store.lock().unwrap();
        let skill_name = filter.skill_slug.as_ref().map(|slug| {
            store
                .skills
                .iter()
                .find(|s| &s.slug == slug)
                .map(|s| s.name.clone())
                .unwrap_or_default()
        });
        let mut projects: Vec<Project> = store
            .projects
            .iter()
            .filter(|p| p.visibility == Visibility::Public)
            .filter(|p| filter.featured.is_none_or(|f| p.is_featured == f))
            .filter(|p| skill_name.as_ref().is_none_or(|name| p.skills.contains(name)))
            .cloned()
            .collect();
        sort_projects(&mut projects);
        if let Some(limit) = filter.limit {
            projects.truncate(limit as usize);
        }
        Ok(projects)
    }

    async fn get_public_project(&self, slug: &str) -> Result<Option<Project>, RepositoryError> {
        self.check_reads()?;
        Ok(self
            .store
            .lock()
            .unwrap()
            .projects
            .iter()
            .find(|p| p.slug == slug && p.visibility == Visibility::Public)
            .cloned())
    }

    async fn get_public_project_by_id(&self, id: i64) -> Result<Option<Project>, RepositoryError> {
        self.check_reads()?;
        Ok(self
            .store
            .lock()
            .unwrap()
            .projects
            .iter()
            .find(|p| p.id == id && p.visibility == Visibility::Public)
            .cloned())
    }

    async fn get_case_study(&self, project_id: i64) -> Result<Option<CaseStudy>, RepositoryError> {
        self.check_reads()?;
        Ok(self
            .store
            .lock()
            .unwrap()
            .case_studies
            .iter()
            .find(|c| c.project_id == project_id)
            .cloned())
    }

    async fn list_skills(&self) -> Result<Vec<SkillUsage>, RepositoryError> {
        self.check_reads()?;
        let store = self.store.lock().unwrap();
        let mut skills: Vec<SkillUsage> = store
            .skills
            .iter()
            .map(|skill| SkillUsage {
                skill: skill.clone(),
                public_project_count: store
                    .projects
                    .iter()
                    .filter(|p| p.visibility == Visibility::Public && p.skills.contains(&skill.name))
                    .count() as u32,
            })
            .collect();
        skills.sort_by(|a, b| {
            a.skill
                .category
                .to_string()
                .cmp(&b.skill.category.to_string())
                .then(a.skill.order.cmp(&b.skill.order))
                .then(a.skill.name.cmp(&b.skill.name))
        });
        Ok(skills)
    }

    async fn get_skill(&self, slug: &str) -> Result<Option<Skill>, RepositoryError> {
        self.check_reads()?;
        Ok(self
            .store
            .lock()
            .unwrap()
            .skills
            .iter()
            .find(|s| s.slug == slug)
            .cloned())
    }

    async fn list_gigs(&self, statuses: &[GigStatus]) -> Result<Vec<Gig>, RepositoryError> {
        self.check_reads()?;
        let mut gigs: Vec<Gig> = self
            .store
            .lock()
            .unwrap()
            .gigs
            .iter()
            .filter(|g| statuses.is_empty() || statuses.contains(&g.status))
            .cloned()
            .collect();
        gigs.sort_by(|a, b| {
            b.is_featured
                .cmp(&a.is_featured)
                .then(a.order.cmp(&b.order))
                .then(a.title.cmp(&b.title))
        });
        Ok(gigs)
    }

    async fn get_gig(&self, slug: &str) -> Result<Option<Gig>, RepositoryError> {
        self.check_reads()?;
        Ok(self
            .store
            .lock()
            .unwrap()
            .gigs
            .iter()
            .find(|g| g.slug == slug)
            .cloned())
    }

    async fn upsert_skill(&self, new: &NewSkill, slug: &str) -> Result<Skill, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        let next_id = store.skills.len() as i64 + 1;
        let skill = Skill {
            id: store
                .skills
                .iter()
                .find(|s| s.name == new.name)
                .map_or(next_id, |s| s.id),
            name: new.name.clone(),
            slug: slug.to_string(),
            description: new.description.clone(),
            category: new.category,
            proficiency_level: new.proficiency_level,
            is_featured: new.is_featured,
            order: new.order,
        };
        store.skills.retain(|s| s.name != new.name);
        store.skills.push(skill.clone());
        Ok(skill)
    }

    async fn upsert_project(&self, new: &NewProject, slug: &str) -> Result<Project, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        for name in &new.skills {
            if !store.skills.iter().any(|s| &s.name == name) {
                let id = store.skills.len() as i64 + 1;
                store.skills.push(Skill {
                    proficiency_level: 3,
                    ..skill(id, name, SkillCategory::default())
                });
            }
        }
        let now = Utc::now();
        let existing = store.projects.iter().find(|p| p.slug == slug);
        let id = existing.map_or(store.projects.len() as i64 + 1, |p| p.id);
        let created_at = existing.map_or(now, |p| p.created_at);
        let project = Project {
            id,
            title: new.title.clone(),
            slug: slug.to_string(),
            short_tagline: new.short_tagline.clone(),
            description_short: new.description_short.clone(),
            description_long: new.description_long.clone(),
            role: new.role,
            start_date: new.start_date,
            end_date: new.end_date,
            repo_url: new.repo_url.clone(),
            live_demo_url: new.live_demo_url.clone(),
            metrics: new.metrics.clone(),
            skills: new.skills.clone(),
            visibility: new.visibility,
            is_featured: new.is_featured,
            order: new.order,
            created_at,
            updated_at: now,
        };
        store.projects.retain(|p| p.slug != slug);
        store.projects.push(project.clone());
        Ok(project)
    }

    async fn upsert_case_study(
        &self,
        project_id: i64,
        new: &NewCaseStudy,
    ) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().unwrap();
        store.case_studies.retain(|c| c.project_id != project_id);
        store.case_studies.push(CaseStudy {
            project_id,
            problem_statement: new.problem_statement.clone(),
            approach: new.approach.clone(),
            results: new.results.clone(),
            is_published: new.is_published,
            reading_time: new.reading_time,
        });
        Ok(())
    }

    async fn upsert_gig(&self, new: &NewGig, slug: &str) -> Result<Gig, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        let id = store
            .gigs
            .iter()
            .find(|g| g.slug == slug)
            .map_or(store.gigs.len() as i64 + 1, |g| g.id);
        let gig = Gig {
            id,
            title: new.title.clone(),
            slug: slug.to_string(),
            short_description: new.short_description.clone(),
            long_description: new.long_description.clone(),
            price_min: new.price_min,
            price_max: new.price_max,
            price_type: new.price_type,
            delivery_time_min: new.delivery_time_min,
            delivery_time_max: new.delivery_time_max,
            delivery_time_unit: new.delivery_time_unit,
            status: new.status,
            is_featured: new.is_featured,
            order: new.order,
            ..gig(id, &new.title, new.status)
        };
        store.gigs.retain(|g| g.slug != slug);
        store.gigs.push(gig.clone());
        Ok(gig)
    }

    async fn upsert_knowledge_entry(
        &self,
        new: &NewKnowledgeEntry,
    ) -> Result<KnowledgeBaseEntry, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        let id = store
            .knowledge
            .iter()
            .find(|k| k.title == new.title)
            .map_or(store.knowledge.len() as i64 + 1, |k| k.id);
        let entry = KnowledgeBaseEntry {
            id,
            title: new.title.clone(),
            content: new.content.clone(),
            tags: new.tags.clone(),
            content_type: new.content_type,
            related_urls: new.related_urls.clone(),
            priority: new.priority,
            is_active: new.is_active,
        };
        store.knowledge.retain(|k| k.title != new.title);
        store.knowledge.push(entry.clone());
        Ok(entry)
    }

    async fn list_knowledge_entries(&self) -> Result<Vec<KnowledgeBaseEntry>, RepositoryError> {
        let mut entries = self.store.lock().unwrap().knowledge.clone();
        entries.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(entries)
    }
}

// ---------------------------------------------------------------------------
// Chat repository
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ChatStore {
    sessions: Vec<ChatSession>,
    messages: Vec<ChatMessage>,
    feedback: Vec<ChatFeedback>,
}

#[derive(Clone, Default)]
pub struct InMemoryChatRepository {
    store: Arc<Mutex<ChatStore>>,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> Vec<ChatSession> {
        self.store.lock().unwrap().sessions.clone()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.store.lock().unwrap().messages.clone()
    }

    pub fn feedback(&self) -> Vec<ChatFeedback> {
        self.store.lock().unwrap().feedback.clone()
    }
}

fn newest_activity_first(sessions: &mut [ChatSession]) {
    sessions.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
}

impl ChatRepository for InMemoryChatRepository {
    async fn create_session(&self, session: &ChatSession) -> Result<ChatSession, RepositoryError> {
        self.store.lock().unwrap().sessions.push(session.clone());
        Ok(session.clone())
    }

    async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .sessions
            .iter()
            .find(|s| &s.id == session_id)
            .cloned())
    }

    async fn update_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().unwrap();
        let slot = store
            .sessions
            .iter_mut()
            .find(|s| s.id == session.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = session.clone();
        Ok(())
    }

    async fn find_active_session_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let mut sessions = self.list_sessions_for_user(user_id).await?;
        sessions.retain(|s| s.is_active);
        Ok(sessions.into_iter().next())
    }

    async fn list_sessions_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ChatSession>, RepositoryError> {
        let mut sessions: Vec<ChatSession> = self
            .store
            .lock()
            .unwrap()
            .sessions
            .iter()
            .filter(|s| s.user_id.as_ref() == Some(user_id))
            .cloned()
            .collect();
        newest_activity_first(&mut sessions);
        Ok(sessions)
    }

    async fn list_anonymous_sessions(
        &self,
        session_key: &str,
    ) -> Result<Vec<ChatSession>, RepositoryError> {
        let mut sessions: Vec<ChatSession> = self
            .store
            .lock()
            .unwrap()
            .sessions
            .iter()
            .filter(|s| s.user_id.is_none() && s.session_key == session_key)
            .cloned()
            .collect();
        newest_activity_first(&mut sessions);
        Ok(sessions)
    }

    async fn count_anonymous_sessions_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .sessions
            .iter()
            .filter(|s| s.user_id.is_none() && s.created_at < cutoff)
            .count() as u64)
    }

    async fn delete_anonymous_sessions_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        let doomed: Vec<Uuid> = store
            .sessions
            .iter()
            .filter(|s| s.user_id.is_none() && s.created_at < cutoff)
            .map(|s| s.id)
            .collect();
        store.sessions.retain(|s| !doomed.contains(&s.id));
        store.messages.retain(|m| !doomed.contains(&m.session_id));
        Ok(doomed.len() as u64)
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        self.store.lock().unwrap().messages.push(message.clone());
        Ok(())
    }

    async fn get_message(&self, message_id: &Uuid) -> Result<Option<ChatMessage>, RepositoryError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .messages
            .iter()
            .find(|m| &m.id == message_id)
            .cloned())
    }

    async fn recent_messages(
        &self,
        session_id: &Uuid,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let mut messages = self.get_messages(session_id).await?;
        messages.reverse();
        messages.truncate(limit as usize);
        Ok(messages)
    }

    async fn get_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        // Insertion order is chronological.
        Ok(self
            .store
            .lock()
            .unwrap()
            .messages
            .iter()
            .filter(|m| &m.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn update_message_feedback(
        &self,
        message_id: &Uuid,
        rating: u8,
        comment: &str,
    ) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().unwrap();
        let message = store
            .messages
            .iter_mut()
            .find(|m| &m.id == message_id)
            .ok_or(RepositoryError::NotFound)?;
        message.rating = Some(rating);
        message.feedback_comment = comment.to_string();
        Ok(())
    }

    async fn average_message_rating(&self, session_id: &Uuid) -> Result<Option<f64>, RepositoryError> {
        let ratings: Vec<f64> = self
            .store
            .lock()
            .unwrap()
            .messages
            .iter()
            .filter(|m| &m.session_id == session_id)
            .filter_map(|m| m.rating.map(f64::from))
            .collect();
        if ratings.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ratings.iter().sum::<f64>() / ratings.len() as f64))
        }
    }

    async fn clear_messages(&self, session_id: &Uuid) -> Result<u64, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        let before = store.messages.len();
        store.messages.retain(|m| &m.session_id != session_id);
        Ok((before - store.messages.len()) as u64)
    }

    async fn save_feedback(&self, feedback: &ChatFeedback) -> Result<(), RepositoryError> {
        self.store.lock().unwrap().feedback.push(feedback.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Analytics repository
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct InMemoryAnalyticsRepository {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryAnalyticsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(self, event: AnalyticsEvent) -> Self {
        self.events.lock().unwrap().push(event);
        self
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AnalyticsRepository for InMemoryAnalyticsRepository {
    async fn record(&self, event: &AnalyticsEvent) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Connection);
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn count_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.timestamp < cutoff)
            .count() as u64)
    }

    async fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| e.timestamp >= cutoff);
        Ok((before - events.len()) as u64)
    }
}

// ---------------------------------------------------------------------------
// Hire request repository
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct InMemoryHireRequestRepository {
    requests: Arc<Mutex<Vec<HireRequest>>>,
}

impl InMemoryHireRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<HireRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HireRequestRepository for InMemoryHireRequestRepository {
    async fn create(&self, request: &HireRequest) -> Result<(), RepositoryError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Account repository
// ---------------------------------------------------------------------------

#[derive(Default)]
struct AccountStore {
    users: Vec<User>,
    tokens: Vec<ApiToken>,
}

#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    store: Arc<Mutex<AccountStore>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> Vec<ApiToken> {
        self.store.lock().unwrap().tokens.clone()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn create_user(&self, user: &User) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().unwrap();
        if store.users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(user.email.clone()));
        }
        store.users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create_token(&self, token: &ApiToken) -> Result<(), RepositoryError> {
        self.store.lock().unwrap().tokens.push(token.clone());
        Ok(())
    }

    async fn find_user_by_token_hash(&self, key_hash: &str) -> Result<Option<User>, RepositoryError> {
        let store = self.store.lock().unwrap();
        let Some(token) = store.tokens.iter().find(|t| t.key_hash == key_hash) else {
            return Ok(None);
        };
        Ok(store.users.iter().find(|u| u.id == token.user_id).cloned())
    }

    async fn touch_token(&self, key_hash: &str) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().unwrap();
        let token = store
            .tokens
            .iter_mut()
            .find(|t| t.key_hash == key_hash)
            .ok_or(RepositoryError::NotFound)?;
        token.last_used_at = Some(Utc::now());
        Ok(())
    }
}
