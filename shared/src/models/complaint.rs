//! Complaint Model
//!
//! Lifecycle:
//!
//! ```text
//! received -> under_review -> investigating -> scheduled_visit -> visit_completed
//!                                           -> lab_testing
//!                                           -> unresponsive
//!          ... -> resolved | closed | rejected | escalated_kebs
//! ```
//!
//! Consumers only create (`received`) and read. Every other transition is an
//! inspector or admin action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::plant::EntityRef;
use crate::response::Resource;

/// Complaint status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Received,
    UnderReview,
    Investigating,
    ScheduledVisit,
    VisitCompleted,
    LabTesting,
    Unresponsive,
    Resolved,
    Closed,
    Rejected,
    EscalatedKebs,
    /// Any value outside the known set
    #[serde(other)]
    Unrecognized,
}

impl ComplaintStatus {
    pub const KNOWN: [ComplaintStatus; 11] = [
        Self::Received,
        Self::UnderReview,
        Self::Investigating,
        Self::ScheduledVisit,
        Self::VisitCompleted,
        Self::LabTesting,
        Self::Unresponsive,
        Self::Resolved,
        Self::Closed,
        Self::Rejected,
        Self::EscalatedKebs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::UnderReview => "under_review",
            Self::Investigating => "investigating",
            Self::ScheduledVisit => "scheduled_visit",
            Self::VisitCompleted => "visit_completed",
            Self::LabTesting => "lab_testing",
            Self::Unresponsive => "unresponsive",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
            Self::Rejected => "rejected",
            Self::EscalatedKebs => "escalated_kebs",
            Self::Unrecognized => "unknown",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Received => "Received",
            Self::UnderReview => "Under Review",
            Self::Investigating => "Investigating",
            Self::ScheduledVisit => "Visit Scheduled",
            Self::VisitCompleted => "Visit Completed",
            Self::LabTesting => "Lab Testing",
            Self::Unresponsive => "Unresponsive",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
            Self::Rejected => "Rejected",
            Self::EscalatedKebs => "Escalated to KEBS",
            Self::Unrecognized => "Unknown",
        }
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Resolved | Self::Closed | Self::Rejected | Self::EscalatedKebs
        )
    }

    /// Still being worked on
    pub fn is_open(&self) -> bool {
        !self.is_terminal() && *self != Self::Unrecognized
    }

    /// States an inspector or admin may move this complaint to
    ///
    /// A status this client does not know may move to any known one; the
    /// server owns that check.
    pub fn allowed_transitions(&self) -> &'static [ComplaintStatus] {
        use ComplaintStatus::*;
        const CLOSING: [ComplaintStatus; 4] = [Resolved, Closed, Rejected, EscalatedKebs];
        match self {
            Received => &[UnderReview, Rejected],
            UnderReview => &[Investigating, Rejected, Closed],
            Investigating => &[
                ScheduledVisit,
                LabTesting,
                Unresponsive,
                Resolved,
                Closed,
                Rejected,
                EscalatedKebs,
            ],
            ScheduledVisit => &[VisitCompleted, Unresponsive],
            VisitCompleted | LabTesting | Unresponsive => &CLOSING,
            Resolved | Closed | Rejected | EscalatedKebs => &[],
            Unrecognized => &ComplaintStatus::KNOWN,
        }
    }

    pub fn can_transition_to(&self, next: ComplaintStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn badge(&self) -> BadgeStyle {
        match self {
            Self::Received => BadgeStyle::Info,
            Self::UnderReview | Self::Investigating => BadgeStyle::Warning,
            Self::ScheduledVisit | Self::VisitCompleted | Self::LabTesting => BadgeStyle::Progress,
            Self::Resolved | Self::Closed => BadgeStyle::Success,
            Self::Rejected | Self::Unresponsive | Self::EscalatedKebs => BadgeStyle::Danger,
            Self::Unrecognized => BadgeStyle::Neutral,
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::KNOWN
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown complaint status: {s}"))
    }
}

/// Visual style of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStyle {
    Info,
    Warning,
    Progress,
    Success,
    Danger,
    Neutral,
}

/// Rendered status badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: String,
    pub style: BadgeStyle,
}

impl StatusBadge {
    pub fn for_status(status: ComplaintStatus) -> Self {
        Self {
            label: status.label().to_string(),
            style: status.badge(),
        }
    }

    /// Badge for a raw status string; values outside the known set keep their
    /// text and get the neutral style.
    pub fn for_raw(raw: &str) -> Self {
        match raw.parse::<ComplaintStatus>() {
            Ok(status) => Self::for_status(status),
            Err(_) => Self {
                label: raw.replace('_', " "),
                style: BadgeStyle::Neutral,
            },
        }
    }
}

/// Complaint priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintPriority {
    Low,
    #[default]
    Medium,
    High,
    #[serde(alias = "critical")]
    Urgent,
}

impl ComplaintPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for ComplaintPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// What the complaint is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintCategory {
    WaterQuality,
    Contamination,
    Hygiene,
    PricingDispute,
    UnlicensedOperator,
    ServiceIssue,
    #[default]
    #[serde(other)]
    Other,
}

impl ComplaintCategory {
    pub const ALL: [ComplaintCategory; 7] = [
        Self::WaterQuality,
        Self::Contamination,
        Self::Hygiene,
        Self::PricingDispute,
        Self::UnlicensedOperator,
        Self::ServiceIssue,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WaterQuality => "water_quality",
            Self::Contamination => "contamination",
            Self::Hygiene => "hygiene",
            Self::PricingDispute => "pricing_dispute",
            Self::UnlicensedOperator => "unlicensed_operator",
            Self::ServiceIssue => "service_issue",
            Self::Other => "other",
        }
    }
}

impl FromStr for ComplaintCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown complaint category: {s}"))
    }
}

/// One entry of a complaint's status history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: ComplaintStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, alias = "timestamp")]
    pub changed_at: Option<DateTime<Utc>>,
}

/// Complaint entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    #[serde(alias = "_id")]
    pub id: String,
    /// Human-facing reference (e.g. `CMP-2024-000123`)
    #[serde(default)]
    pub complaint_number: Option<String>,
    #[serde(default)]
    pub category: ComplaintCategory,
    #[serde(default)]
    pub description: String,
    pub status: ComplaintStatus,
    #[serde(default)]
    pub priority: ComplaintPriority,
    #[serde(default)]
    pub assigned_to: Option<EntityRef>,
    #[serde(default)]
    pub plant_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub status_history: Vec<StatusChange>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Complaint {
    /// Reference shown to users: the complaint number when issued, else the id
    pub fn reference(&self) -> &str {
        self.complaint_number.as_deref().unwrap_or(&self.id)
    }
}

impl Resource for Complaint {
    const COLLECTION: &'static str = "complaints";
    const ITEM: &'static str = "complaint";
}

/// Returned after a successful submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintReceipt {
    #[serde(alias = "_id", alias = "id")]
    pub complaint_id: String,
    #[serde(default)]
    pub tracking_token: Option<String>,
    #[serde(default)]
    pub status: Option<ComplaintStatus>,
}

impl Resource for ComplaintReceipt {
    const COLLECTION: &'static str = "complaints";
    const ITEM: &'static str = "complaint";
}
