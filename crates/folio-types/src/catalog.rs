//! Portfolio catalog types: site configuration, skills, projects, case
//! studies, gigs, and knowledge-base entries.
//!
//! Enumerations map to the CHECK constraints in the SQLite schema and use
//! the same lowercase spelling on the wire.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Site-wide settings, stored as a single row.
///
/// Loaded once at startup and handed to the services that need it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfiguration {
    pub site_name: String,
    pub site_tagline: String,
    pub owner_name: String,
    pub email: String,
    pub location: String,
    pub about_short: String,
    pub about_medium: String,
    pub chatbot_persona_professional: String,
    pub chatbot_persona_technical: String,
    pub chatbot_persona_casual: String,
}

impl Default for SiteConfiguration {
    fn default() -> Self {
        Self {
            site_name: "My Portfolio".to_string(),
            site_tagline: "Full-Stack Developer & AI Enthusiast".to_string(),
            owner_name: "the site owner".to_string(),
            email: String::new(),
            location: String::new(),
            about_short: String::new(),
            about_medium: String::new(),
            chatbot_persona_professional: "You are a professional portfolio assistant. Be concise and focus on achievements and technical skills.".to_string(),
            chatbot_persona_technical: "You are a technical expert. Provide detailed technical information and architecture insights.".to_string(),
            chatbot_persona_casual: "You are friendly and conversational. Make the interaction enjoyable while being informative.".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// Category of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Language,
    Framework,
    Library,
    Database,
    #[default]
    Tool,
    Platform,
    Cloud,
    SoftSkill,
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkillCategory::Language => "language",
            SkillCategory::Framework => "framework",
            SkillCategory::Library => "library",
            SkillCategory::Database => "database",
            SkillCategory::Tool => "tool",
            SkillCategory::Platform => "platform",
            SkillCategory::Cloud => "cloud",
            SkillCategory::SoftSkill => "soft_skill",
        };
        f.write_str(s)
    }
}

impl FromStr for SkillCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "language" => Ok(SkillCategory::Language),
            "framework" => Ok(SkillCategory::Framework),
            "library" => Ok(SkillCategory::Library),
            "database" => Ok(SkillCategory::Database),
            "tool" => Ok(SkillCategory::Tool),
            "platform" => Ok(SkillCategory::Platform),
            "cloud" => Ok(SkillCategory::Cloud),
            "soft_skill" => Ok(SkillCategory::SoftSkill),
            other => Err(format!("invalid skill category: '{other}'")),
        }
    }
}

/// A skill or technology that projects are tagged with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category: SkillCategory,
    /// 1 (beginner) to 5 (expert).
    pub proficiency_level: u8,
    pub is_featured: bool,
    pub order: i32,
}

/// A skill together with the number of public projects that use it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillUsage {
    #[serde(flatten)]
    pub skill: Skill,
    pub public_project_count: u32,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// The owner's role on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    #[default]
    Solo,
    Lead,
    Frontend,
    Backend,
    Fullstack,
    Consultant,
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectRole::Solo => "solo",
            ProjectRole::Lead => "lead",
            ProjectRole::Frontend => "frontend",
            ProjectRole::Backend => "backend",
            ProjectRole::Fullstack => "fullstack",
            ProjectRole::Consultant => "consultant",
        };
        f.write_str(s)
    }
}

impl FromStr for ProjectRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "solo" => Ok(ProjectRole::Solo),
            "lead" => Ok(ProjectRole::Lead),
            "frontend" => Ok(ProjectRole::Frontend),
            "backend" => Ok(ProjectRole::Backend),
            "fullstack" => Ok(ProjectRole::Fullstack),
            "consultant" => Ok(ProjectRole::Consultant),
            other => Err(format!("invalid project role: '{other}'")),
        }
    }
}

/// Who can see a project.
///
/// Only `Public` projects are served by the API or shown to the chat model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    #[default]
    Draft,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
            Visibility::Draft => write!(f, "draft"),
        }
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "draft" => Ok(Visibility::Draft),
            other => Err(format!("invalid visibility: '{other}'")),
        }
    }
}

/// A showcased project.
///
/// Default ordering is featured first, then `order` ascending, then
/// `start_date` descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub short_tagline: String,
    pub description_short: String,
    pub description_long: String,
    pub role: ProjectRole,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub repo_url: String,
    pub live_demo_url: String,
    /// Free-form metrics object, e.g. `{"users": 10000, "uptime": "99.9%"}`.
    pub metrics: serde_json::Value,
    /// Names of the skills used, in skill display order.
    pub skills: Vec<String>,
    pub visibility: Visibility,
    pub is_featured: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Site-relative URL of the project page.
    pub fn url(&self) -> String {
        format!("/projects/{}", self.slug)
    }
}

/// Extended write-up attached to a project (at most one per project).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStudy {
    pub project_id: i64,
    pub problem_statement: String,
    pub approach: String,
    pub results: String,
    pub is_published: bool,
    /// Estimated reading time in minutes.
    pub reading_time: u32,
}

/// A public project with its published case study, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub case_study: Option<CaseStudy>,
}

// ---------------------------------------------------------------------------
// Gigs
// ---------------------------------------------------------------------------

/// Availability of a gig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GigStatus {
    #[default]
    Open,
    Limited,
    Closed,
    Paused,
}

impl fmt::Display for GigStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GigStatus::Open => write!(f, "open"),
            GigStatus::Limited => write!(f, "limited"),
            GigStatus::Closed => write!(f, "closed"),
            GigStatus::Paused => write!(f, "paused"),
        }
    }
}

impl FromStr for GigStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(GigStatus::Open),
            "limited" => Ok(GigStatus::Limited),
            "closed" => Ok(GigStatus::Closed),
            "paused" => Ok(GigStatus::Paused),
            other => Err(format!("invalid gig status: '{other}'")),
        }
    }
}

/// How a gig is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    #[default]
    Fixed,
    Hourly,
    Project,
    Retainer,
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceType::Fixed => write!(f, "fixed"),
            PriceType::Hourly => write!(f, "hourly"),
            PriceType::Project => write!(f, "project"),
            PriceType::Retainer => write!(f, "retainer"),
        }
    }
}

impl FromStr for PriceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(PriceType::Fixed),
            "hourly" => Ok(PriceType::Hourly),
            "project" => Ok(PriceType::Project),
            "retainer" => Ok(PriceType::Retainer),
            other => Err(format!("invalid price type: '{other}'")),
        }
    }
}

/// Unit for gig delivery times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryUnit {
    #[default]
    Days,
    Weeks,
    Months,
}

impl fmt::Display for DeliveryUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryUnit::Days => write!(f, "days"),
            DeliveryUnit::Weeks => write!(f, "weeks"),
            DeliveryUnit::Months => write!(f, "months"),
        }
    }
}

impl FromStr for DeliveryUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "days" => Ok(DeliveryUnit::Days),
            "weeks" => Ok(DeliveryUnit::Weeks),
            "months" => Ok(DeliveryUnit::Months),
            other => Err(format!("invalid delivery unit: '{other}'")),
        }
    }
}

/// A saleable service offering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gig {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub long_description: String,
    pub price_min: f64,
    pub price_max: Option<f64>,
    pub price_type: PriceType,
    pub delivery_time_min: u32,
    pub delivery_time_max: Option<u32>,
    pub delivery_time_unit: DeliveryUnit,
    pub status: GigStatus,
    pub is_featured: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Gig {
    /// Site-relative URL of the gig page.
    pub fn url(&self) -> String {
        format!("/gigs/{}", self.slug)
    }

    /// "$1,500 - $3,000" when a positive maximum is set, else "Starting at $1,500".
    pub fn price_display(&self) -> String {
        match self.price_max {
            Some(max) if max > 0.0 => format!("{} - {}", format_usd(self.price_min), format_usd(max)),
            _ => format!("Starting at {}", format_usd(self.price_min)),
        }
    }

    /// "3-5 days" when a positive maximum is set, else "3 days".
    pub fn delivery_display(&self) -> String {
        match self.delivery_time_max {
            Some(max) if max > 0 => format!("{}-{} {}", self.delivery_time_min, max, self.delivery_time_unit),
            _ => format!("{} {}", self.delivery_time_min, self.delivery_time_unit),
        }
    }
}

/// Whole dollars with thousands separators.
fn format_usd(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

// ---------------------------------------------------------------------------
// Knowledge base
// ---------------------------------------------------------------------------

/// Kind of knowledge-base entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeContentType {
    Project,
    Skill,
    Bio,
    Faq,
    #[default]
    General,
}

impl fmt::Display for KnowledgeContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeContentType::Project => write!(f, "project"),
            KnowledgeContentType::Skill => write!(f, "skill"),
            KnowledgeContentType::Bio => write!(f, "bio"),
            KnowledgeContentType::Faq => write!(f, "faq"),
            KnowledgeContentType::General => write!(f, "general"),
        }
    }
}

impl FromStr for KnowledgeContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "project" => Ok(KnowledgeContentType::Project),
            "skill" => Ok(KnowledgeContentType::Skill),
            "bio" => Ok(KnowledgeContentType::Bio),
            "faq" => Ok(KnowledgeContentType::Faq),
            "general" => Ok(KnowledgeContentType::General),
            other => Err(format!("invalid knowledge content type: '{other}'")),
        }
    }
}

/// Static reference text for the chat assistant.
///
/// Stored and importable; prompt assembly does not read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseEntry {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub content_type: KnowledgeContentType,
    pub related_urls: Vec<String>,
    pub priority: i32,
    pub is_active: bool,
}

/// Lowercase, hyphen-separated slug derived from a title or name.
///
/// Non-alphanumeric runs collapse into a single hyphen; leading and
/// trailing hyphens are dropped.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_was_hyphen = true;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            slug.push('-');
            prev_was_hyphen = true;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gig(price_min: f64, price_max: Option<f64>, min: u32, max: Option<u32>) -> Gig {
        Gig {
            id: 1,
            title: "API Development".to_string(),
            slug: "api-development".to_string(),
            short_description: "REST and GraphQL APIs".to_string(),
            long_description: String::new(),
            price_min,
            price_max,
            price_type: PriceType::Fixed,
            delivery_time_min: min,
            delivery_time_max: max,
            delivery_time_unit: DeliveryUnit::Days,
            status: GigStatus::Open,
            is_featured: false,
            order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_price_display_range() {
        assert_eq!(gig(1500.0, Some(3000.0), 3, None).price_display(), "$1,500 - $3,000");
    }

    #[test]
    fn test_price_display_starting_at() {
        assert_eq!(gig(1000.0, None, 3, None).price_display(), "Starting at $1,000");
        assert_eq!(gig(250.0, None, 3, None).price_display(), "Starting at $250");
        assert_eq!(
            gig(1234567.4, None, 3, None).price_display(),
            "Starting at $1,234,567"
        );
    }

    #[test]
    fn test_price_display_zero_max_is_open_ended() {
        assert_eq!(gig(500.0, Some(0.0), 3, None).price_display(), "Starting at $500");
    }

    #[test]
    fn test_delivery_display() {
        assert_eq!(gig(10.0, None, 3, Some(5)).delivery_display(), "3-5 days");
        assert_eq!(gig(10.0, None, 2, None).delivery_display(), "2 days");
        assert_eq!(gig(10.0, None, 2, Some(0)).delivery_display(), "2 days");
    }

    #[test]
    fn test_urls() {
        assert_eq!(gig(10.0, None, 1, None).url(), "/gigs/api-development");
    }

    #[test]
    fn test_enum_roundtrips() {
        for c in [SkillCategory::Language, SkillCategory::SoftSkill, SkillCategory::Cloud] {
            assert_eq!(c.to_string().parse::<SkillCategory>().unwrap(), c);
        }
        for v in [Visibility::Public, Visibility::Private, Visibility::Draft] {
            assert_eq!(v.to_string().parse::<Visibility>().unwrap(), v);
        }
        for s in [GigStatus::Open, GigStatus::Limited, GigStatus::Closed, GigStatus::Paused] {
            assert_eq!(s.to_string().parse::<GigStatus>().unwrap(), s);
        }
        assert!("secret".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Realtime Chat App"), "realtime-chat-app");
        assert_eq!(slugify("  C++ / Rust -- Interop!  "), "c-rust-interop");
        assert_eq!(slugify("Café Finder"), "caf-finder");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_skill_category_serde() {
        let json = serde_json::to_string(&SkillCategory::SoftSkill).unwrap();
        assert_eq!(json, "\"soft_skill\"");
    }

    #[test]
    fn test_site_configuration_partial_deserialize() {
        let site: SiteConfiguration = toml::from_str(
            r#"
site_name = "Ada's Portfolio"
owner_name = "Ada"
"#,
        )
        .unwrap();
        assert_eq!(site.site_name, "Ada's Portfolio");
        assert_eq!(site.owner_name, "Ada");
        assert!(site.chatbot_persona_technical.starts_with("You are a technical expert"));
    }
}
