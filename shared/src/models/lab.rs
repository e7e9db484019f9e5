//! Lab sample booking Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::plant::EntityRef;
use crate::response::Resource;

/// Laboratory test requested for a water sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabTestType {
    Bacteriological,
    PhysicoChemical,
    HeavyMetals,
    FullPanel,
    #[serde(other)]
    Other,
}

impl LabTestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bacteriological => "bacteriological",
            Self::PhysicoChemical => "physico_chemical",
            Self::HeavyMetals => "heavy_metals",
            Self::FullPanel => "full_panel",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for LabTestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabTestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bacteriological" => Ok(Self::Bacteriological),
            "physico_chemical" => Ok(Self::PhysicoChemical),
            "heavy_metals" => Ok(Self::HeavyMetals),
            "full_panel" => Ok(Self::FullPanel),
            other => Err(format!("unknown test type: {other}")),
        }
    }
}

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    #[serde(other)]
    Unrecognized,
}

impl BookingStatus {
    pub const KNOWN: [BookingStatus; 4] = [
        Self::Scheduled,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unrecognized => "unknown",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lab sample booking
///
/// References a plant but does not follow the plant lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabBooking {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub plant: Option<EntityRef>,
    pub test_type: LabTestType,
    pub status: BookingStatus,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for LabBooking {
    const COLLECTION: &'static str = "bookings";
    const ITEM: &'static str = "booking";
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabBookingCreate {
    pub plant_id: String,
    pub test_type: LabTestType,
    pub scheduled_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
