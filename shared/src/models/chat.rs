//! AI assistant DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::Role;

/// Context sent with every query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub user_id: Option<String>,
    pub role: Option<Role>,
    pub session_id: String,
}

/// `POST ai/query` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatQuery {
    pub query: String,
    pub context: ChatContext,
}

/// `POST ai/query` response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    #[serde(alias = "answer")]
    pub response: String,
    /// Set when the server issues (or replaces) the session
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSpeaker {
    User,
    #[serde(alias = "bot", alias = "ai")]
    Assistant,
    /// Inline error placed where a reply was expected
    Error,
}

/// One stored message of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryEntry {
    #[serde(alias = "sender")]
    pub role: ChatSpeaker,
    #[serde(alias = "message")]
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl crate::response::Resource for ChatHistoryEntry {
    const COLLECTION: &'static str = "messages";
    const ITEM: &'static str = "message";
}
