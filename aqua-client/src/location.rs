//! Geolocation seam
//!
//! Position capture is an optional side effect: it only ever fills
//! coordinate fields and never blocks manual entry.

use async_trait::async_trait;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// GeoJSON order, as the API stores it
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl FromStr for GeoPoint {
    type Err = LocationError;

    /// Parse `"lat,lng"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| LocationError::Parse(s.to_string()))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| LocationError::Parse(s.to_string()))?;
        let longitude: f64 = lng
            .trim()
            .parse()
            .map_err(|_| LocationError::Parse(s.to_string()))?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::Parse(s.to_string()));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location unavailable")]
    Unavailable,

    #[error("Invalid position {0:?}, expected \"lat,lng\"")]
    Parse(String),
}

/// Source of the device position
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<GeoPoint, LocationError>;
}

/// Position configured up front (`AQUA_LOCATION`), or none at all
#[derive(Debug, Clone, Default)]
pub struct FixedLocation {
    point: Option<GeoPoint>,
}

impl FixedLocation {
    pub fn new(point: Option<GeoPoint>) -> Self {
        Self { point }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        self.point.ok_or(LocationError::Unavailable)
    }
}
