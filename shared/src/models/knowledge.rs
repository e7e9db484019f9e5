//! Knowledge hub article

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub summary: String,
    pub content: String,
    #[serde(default)]
    pub reading_minutes: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}
