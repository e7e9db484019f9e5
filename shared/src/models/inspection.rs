//! Inspection Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::plant::EntityRef;
use crate::response::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    Scheduled,
    Completed,
    Cancelled,
    #[serde(other)]
    Unrecognized,
}

/// Site visit scheduled against a plant or a complaint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub plant: Option<EntityRef>,
    #[serde(default)]
    pub complaint: Option<EntityRef>,
    #[serde(default)]
    pub inspector: Option<EntityRef>,
    pub status: InspectionStatus,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub findings: Option<String>,
}

impl Resource for Inspection {
    const COLLECTION: &'static str = "inspections";
    const ITEM: &'static str = "inspection";
}
