//! Plant Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::response::Resource;

/// Plant lifecycle status
///
/// Created as `pending` by the setup wizard, then approved (`active`) or
/// `rejected` by an inspector or admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantStatus {
    Pending,
    Active,
    Rejected,
    Suspended,
    Closed,
    #[serde(other)]
    Unrecognized,
}

impl PlantStatus {
    pub const KNOWN: [PlantStatus; 5] = [
        Self::Pending,
        Self::Active,
        Self::Rejected,
        Self::Suspended,
        Self::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Rejected => "rejected",
            Self::Suspended => "suspended",
            Self::Closed => "closed",
            Self::Unrecognized => "unknown",
        }
    }

    /// Approval and rejection only apply to plants awaiting review
    pub fn awaits_review(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for PlantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to another entity: either a bare id or a populated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(String),
    Populated {
        #[serde(alias = "_id")]
        id: String,
        #[serde(default, alias = "businessName")]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
    },
}

impl EntityRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated { id, .. } => id,
        }
    }

    /// Display name, falling back to the id
    pub fn label(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated { id, name, .. } => name.as_deref().unwrap_or(id),
        }
    }
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub postal_code: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.street, &self.city, &self.county, &self.postal_code]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Plant location
///
/// `coordinates` are `[longitude, latitude]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantLocation {
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub coordinates: [f64; 2],
}

/// Water plant entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "businessName")]
    pub name: String,
    pub status: PlantStatus,
    #[serde(default)]
    pub owner: Option<EntityRef>,
    #[serde(default)]
    pub location: Option<PlantLocation>,
    /// Litres per day
    #[serde(default, alias = "dailyCapacity")]
    pub capacity: Option<f64>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Plant {
    const COLLECTION: &'static str = "plants";
    const ITEM: &'static str = "plant";
}

/// Operational details captured by the setup wizard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantOperations {
    pub water_source: String,
    pub treatment_methods: Vec<String>,
    pub daily_capacity: f64,
    pub operating_hours: String,
    pub staff_count: u32,
}

/// `POST plants` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantCreate {
    pub business_name: String,
    pub license_number: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub location: PlantLocation,
    pub operations: PlantOperations,
}
