//! Catalog import document.
//!
//! `folio import <file.toml>` reads a [`CatalogFile`] and upserts every
//! section. Slugs are optional everywhere and derived from the title (or
//! name) when missing. Dates are quoted `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    DeliveryUnit, GigStatus, KnowledgeContentType, PriceType, ProjectRole, SiteConfiguration,
    SkillCategory, Visibility,
};

/// Top-level import document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub site: Option<SiteConfiguration>,
    #[serde(default)]
    pub skills: Vec<NewSkill>,
    #[serde(default)]
    pub projects: Vec<NewProject>,
    #[serde(default)]
    pub gigs: Vec<NewGig>,
    #[serde(default)]
    pub knowledge: Vec<NewKnowledgeEntry>,
}

/// Skill as written in an import file. Upserted by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSkill {
    pub name: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: SkillCategory,
    #[serde(default = "default_proficiency")]
    pub proficiency_level: u8,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub order: i32,
}

fn default_proficiency() -> u8 {
    3
}

/// Project as written in an import file. Upserted by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub short_tagline: String,
    #[serde(default)]
    pub description_short: String,
    #[serde(default)]
    pub description_long: String,
    #[serde(default)]
    pub role: ProjectRole,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub repo_url: String,
    #[serde(default)]
    pub live_demo_url: String,
    #[serde(default = "empty_object")]
    pub metrics: serde_json::Value,
    /// Skill names; unknown names are created with default attributes.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub order: i32,
    pub case_study: Option<NewCaseStudy>,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Case study nested under a project in an import file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCaseStudy {
    #[serde(default)]
    pub problem_statement: String,
    #[serde(default)]
    pub approach: String,
    #[serde(default)]
    pub results: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default = "default_reading_time")]
    pub reading_time: u32,
}

fn default_reading_time() -> u32 {
    5
}

/// Gig as written in an import file. Upserted by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGig {
    pub title: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    pub price_min: f64,
    pub price_max: Option<f64>,
    #[serde(default)]
    pub price_type: PriceType,
    pub delivery_time_min: u32,
    pub delivery_time_max: Option<u32>,
    #[serde(default)]
    pub delivery_time_unit: DeliveryUnit,
    #[serde(default)]
    pub status: GigStatus,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub order: i32,
}

/// Knowledge-base entry as written in an import file. Upserted by title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewKnowledgeEntry {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub content_type: KnowledgeContentType,
    #[serde(default)]
    pub related_urls: Vec<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
