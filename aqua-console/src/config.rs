//! Console configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | AQUA_API_URL | http://localhost:5000/api | API root |
//! | AQUA_API_TIMEOUT_SECS | 30 | Per-request timeout |
//! | AQUA_WORK_DIR | ./.aqua | Session storage and logs |
//! | AQUA_LOCATION | (unset) | Device position as `lat,lng` |

use aqua_client::ClientConfig;
use aqua_client::location::GeoPoint;
use anyhow::Context;
use std::path::PathBuf;

pub const DEFAULT_WORK_DIR: &str = ".aqua";

#[derive(Debug, Clone)]
pub struct Config {
    pub client: ClientConfig,
    pub work_dir: PathBuf,
    /// Position reported to complaint and plant forms; none means unavailable
    pub location: Option<GeoPoint>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let work_dir = std::env::var("AQUA_WORK_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORK_DIR));

        let location = match std::env::var("AQUA_LOCATION") {
            Ok(raw) if !raw.trim().is_empty() => {
                Some(raw.parse().context("AQUA_LOCATION is not a valid position")?)
            }
            _ => None,
        };

        Ok(Self {
            client: ClientConfig::from_env(),
            work_dir,
            location,
        })
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        work_dir: Option<PathBuf>,
        location: Option<GeoPoint>,
    ) -> Self {
        if let Some(url) = api_url {
            self.client = ClientConfig::new(url).with_timeout(self.client.timeout);
        }
        if let Some(dir) = work_dir {
            self.work_dir = dir;
        }
        if location.is_some() {
            self.location = location;
        }
        self
    }

    pub fn log_dir(&self) -> PathBuf {
        self.work_dir.join("logs")
    }
}
