//! Templated notifications sent by admins to plant owners

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Message templates the API knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTemplate {
    ComplianceReminder,
    InspectionScheduled,
    LicenseRenewal,
    SampleResultsReady,
    ComplaintUpdate,
}

impl NotificationTemplate {
    pub const ALL: [NotificationTemplate; 5] = [
        Self::ComplianceReminder,
        Self::InspectionScheduled,
        Self::LicenseRenewal,
        Self::SampleResultsReady,
        Self::ComplaintUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ComplianceReminder => "compliance_reminder",
            Self::InspectionScheduled => "inspection_scheduled",
            Self::LicenseRenewal => "license_renewal",
            Self::SampleResultsReady => "sample_results_ready",
            Self::ComplaintUpdate => "complaint_update",
        }
    }

    /// Template variables the message expects
    pub fn variables(&self) -> &'static [&'static str] {
        match self {
            Self::ComplianceReminder => &["dueDate"],
            Self::InspectionScheduled => &["date"],
            Self::LicenseRenewal => &["expiryDate"],
            Self::SampleResultsReady => &["testType"],
            Self::ComplaintUpdate => &["complaintId", "status"],
        }
    }
}

impl FromStr for NotificationTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown notification template: {s}"))
    }
}

/// `POST notifications/send` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    pub recipient_id: String,
    pub template: NotificationTemplate,
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

impl SendNotificationRequest {
    /// Names of expected variables the request does not carry
    pub fn missing_variables(&self) -> Vec<&'static str> {
        self.template
            .variables()
            .iter()
            .copied()
            .filter(|name| {
                self.variables
                    .get(*name)
                    .is_none_or(|v| v.trim().is_empty())
            })
            .collect()
    }
}
