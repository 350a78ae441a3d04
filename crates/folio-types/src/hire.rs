//! Hire requests: leads submitted against a gig.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Budget bracket picked on the hire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "under_1k")]
    Under1k,
    #[serde(rename = "1k_5k")]
    From1kTo5k,
    #[serde(rename = "5k_10k")]
    From5kTo10k,
    #[serde(rename = "10k_25k")]
    From10kTo25k,
    #[serde(rename = "25k_50k")]
    From25kTo50k,
    #[serde(rename = "over_50k")]
    Over50k,
    #[default]
    #[serde(rename = "negotiable")]
    Negotiable,
}

impl BudgetRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetRange::Under1k => "under_1k",
            BudgetRange::From1kTo5k => "1k_5k",
            BudgetRange::From5kTo10k => "5k_10k",
            BudgetRange::From10kTo25k => "10k_25k",
            BudgetRange::From25kTo50k => "25k_50k",
            BudgetRange::Over50k => "over_50k",
            BudgetRange::Negotiable => "negotiable",
        }
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "under_1k" => Ok(BudgetRange::Under1k),
            "1k_5k" => Ok(BudgetRange::From1kTo5k),
            "5k_10k" => Ok(BudgetRange::From5kTo10k),
            "10k_25k" => Ok(BudgetRange::From10kTo25k),
            "25k_50k" => Ok(BudgetRange::From25kTo50k),
            "over_50k" => Ok(BudgetRange::Over50k),
            "negotiable" => Ok(BudgetRange::Negotiable),
            other => Err(format!("invalid budget range: '{other}'")),
        }
    }
}

/// When the client wants the work to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "asap")]
    Asap,
    #[serde(rename = "1_week")]
    OneWeek,
    #[serde(rename = "2_weeks")]
    TwoWeeks,
    #[serde(rename = "1_month")]
    OneMonth,
    #[serde(rename = "2_months")]
    TwoMonths,
    #[serde(rename = "3_months")]
    ThreeMonths,
    #[serde(rename = "6_months")]
    SixMonthsPlus,
    #[default]
    #[serde(rename = "flexible")]
    Flexible,
}

impl Timeline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeline::Asap => "asap",
            Timeline::OneWeek => "1_week",
            Timeline::TwoWeeks => "2_weeks",
            Timeline::OneMonth => "1_month",
            Timeline::TwoMonths => "2_months",
            Timeline::ThreeMonths => "3_months",
            Timeline::SixMonthsPlus => "6_months",
            Timeline::Flexible => "flexible",
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asap" => Ok(Timeline::Asap),
            "1_week" => Ok(Timeline::OneWeek),
            "2_weeks" => Ok(Timeline::TwoWeeks),
            "1_month" => Ok(Timeline::OneMonth),
            "2_months" => Ok(Timeline::TwoMonths),
            "3_months" => Ok(Timeline::ThreeMonths),
            "6_months" => Ok(Timeline::SixMonthsPlus),
            "flexible" => Ok(Timeline::Flexible),
            other => Err(format!("invalid timeline: '{other}'")),
        }
    }
}

/// Where a lead stands in the sales pipeline. New requests start at `new`;
/// later stages are set by hand in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HireStatus {
    #[default]
    New,
    Contacted,
    InDiscussion,
    ProposalSent,
    Negotiating,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
    Rejected,
}

impl fmt::Display for HireStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HireStatus::New => write!(f, "new"),
            HireStatus::Contacted => write!(f, "contacted"),
            HireStatus::InDiscussion => write!(f, "in_discussion"),
            HireStatus::ProposalSent => write!(f, "proposal_sent"),
            HireStatus::Negotiating => write!(f, "negotiating"),
            HireStatus::Accepted => write!(f, "accepted"),
            HireStatus::InProgress => write!(f, "in_progress"),
            HireStatus::Completed => write!(f, "completed"),
            HireStatus::Cancelled => write!(f, "cancelled"),
            HireStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for HireStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(HireStatus::New),
            "contacted" => Ok(HireStatus::Contacted),
            "in_discussion" => Ok(HireStatus::InDiscussion),
            "proposal_sent" => Ok(HireStatus::ProposalSent),
            "negotiating" => Ok(HireStatus::Negotiating),
            "accepted" => Ok(HireStatus::Accepted),
            "in_progress" => Ok(HireStatus::InProgress),
            "completed" => Ok(HireStatus::Completed),
            "cancelled" => Ok(HireStatus::Cancelled),
            "rejected" => Ok(HireStatus::Rejected),
            other => Err(format!("invalid hire status: '{other}'")),
        }
    }
}

/// The hire form as posted by a visitor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewHireRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub project_title: String,
    /// Project description and requirements.
    pub message: String,
    #[serde(default)]
    pub proposed_budget: BudgetRange,
    #[serde(default)]
    pub budget_details: String,
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub timeline_details: String,
    /// Channels such as "email", "slack" or "zoom".
    #[serde(default)]
    pub preferred_communication: Vec<String>,
    #[serde(default)]
    pub meeting_requested: bool,
    #[serde(default)]
    pub meeting_availability: String,
    /// How the client found the service.
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub terms_accepted: bool,
    #[serde(default)]
    pub privacy_accepted: bool,
}

/// A stored lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HireRequest {
    pub id: Uuid,
    pub gig_id: i64,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub project_title: String,
    pub message: String,
    pub proposed_budget: BudgetRange,
    pub budget_details: String,
    pub timeline: Timeline,
    pub timeline_details: String,
    pub preferred_communication: Vec<String>,
    pub meeting_requested: bool,
    pub meeting_availability: String,
    pub source: String,
    pub status: HireStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_defaults() {
        let form: NewHireRequest = serde_json::from_str(
            r#"{"name": "Grace", "email": "grace@example.com", "message": "Need an API"}"#,
        )
        .unwrap();
        assert_eq!(form.proposed_budget, BudgetRange::Negotiable);
        assert_eq!(form.timeline, Timeline::Flexible);
        assert!(form.preferred_communication.is_empty());
        assert!(!form.terms_accepted);
    }

    #[test]
    fn test_wire_names() {
        let form: NewHireRequest = serde_json::from_str(
            r#"{"name": "G", "email": "g@x.io", "message": "m",
                "proposed_budget": "10k_25k", "timeline": "6_months"}"#,
        )
        .unwrap();
        assert_eq!(form.proposed_budget, BudgetRange::From10kTo25k);
        assert_eq!(form.timeline, Timeline::SixMonthsPlus);
        assert_eq!(form.timeline.to_string(), "6_months");
        assert_eq!("1k_5k".parse::<BudgetRange>().unwrap(), BudgetRange::From1kTo5k);
        assert!("someday".parse::<Timeline>().is_err());
    }

    #[test]
    fn test_status_round_trips_through_text() {
        assert_eq!(HireStatus::ProposalSent.to_string(), "proposal_sent");
        assert_eq!("in_progress".parse::<HireStatus>().unwrap(), HireStatus::InProgress);
        assert_eq!(
            serde_json::to_string(&HireStatus::InDiscussion).unwrap(),
            "\"in_discussion\""
        );
    }
}
