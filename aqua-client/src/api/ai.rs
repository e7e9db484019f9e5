// aqua-client/src/api/ai.rs
// AI assistant endpoints

use shared::models::{ChatHistoryEntry, ChatQuery, ChatReply};

use crate::error::ClientResult;
use crate::http::{ApiClient, invalid_response, segment};

impl ApiClient {
    /// POST ai/query
    pub async fn ai_query(&self, query: &ChatQuery) -> ClientResult<ChatReply> {
        self.post("ai/query", query)
            .await?
            .item_under("reply")
            .map_err(invalid_response)
    }

    /// GET ai/history/{sessionId}
    pub async fn ai_history(&self, session_id: &str) -> ClientResult<Vec<ChatHistoryEntry>> {
        self.get_list(&format!("ai/history/{}", segment(session_id)?))
            .await
    }

    /// DELETE ai/history/{sessionId}
    pub async fn clear_ai_history(&self, session_id: &str) -> ClientResult<()> {
        self.delete(&format!("ai/history/{}", segment(session_id)?))
            .await?;
        Ok(())
    }
}
