//! AI assistant chat widget
//!
//! The conversation is held client-side. Its session id is persisted under
//! [`CHAT_SESSION_KEY`] so a restart resumes the same server-side history.

use chrono::{DateTime, Utc};
use shared::models::{ChatContext, ChatQuery, ChatSpeaker};
use uuid::Uuid;

use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::storage::CHAT_SESSION_KEY;

/// Manual retries allowed after a failed message
pub const MAX_RETRIES: u8 = 3;

pub const CHAT_ERROR_MESSAGE: &str =
    "Sorry, I couldn't get an answer right now. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub speaker: ChatSpeaker,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(speaker: ChatSpeaker, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
            at: Utc::now(),
        }
    }
}

fn new_session_id() -> String {
    format!("session_{}", Uuid::new_v4())
}

#[derive(Debug)]
pub struct ChatWidget {
    api: ApiClient,
    session_id: String,
    /// Whether `session_id` came from storage (and may have history)
    resumed: bool,
    messages: Vec<ChatMessage>,
    input: String,
    last_failed: Option<String>,
    retries: u8,
}

impl ChatWidget {
    /// Open the widget, resuming the stored session or starting a new one
    pub fn open(api: ApiClient) -> Self {
        let stored = api.session().store().get(CHAT_SESSION_KEY);
        let resumed = stored.is_some();
        let session_id = stored.unwrap_or_else(new_session_id);

        let widget = Self {
            api,
            session_id,
            resumed,
            messages: Vec::new(),
            input: String::new(),
            last_failed: None,
            retries: 0,
        };
        tracing::debug!(session_id = %widget.session_id, resumed, "Chat widget opened");
        widget
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn retries_left(&self) -> u8 {
        MAX_RETRIES.saturating_sub(self.retries)
    }

    /// Load server history for a resumed session
    ///
    /// Fresh sessions have nothing to load and skip the request.
    pub async fn load_history(&mut self) -> ClientResult<usize> {
        if !self.resumed {
            return Ok(0);
        }
        let history = self.api.ai_history(&self.session_id).await?;
        self.messages = history
            .into_iter()
            .map(|entry| ChatMessage {
                speaker: entry.role,
                content: entry.content,
                at: entry.timestamp.unwrap_or_else(Utc::now),
            })
            .collect();
        Ok(self.messages.len())
    }

    /// Send the current input
    ///
    /// The user message is appended before the request. On failure an inline
    /// error takes the place of the reply and the query becomes retryable.
    pub async fn send(&mut self) -> ClientResult<()> {
        let query = std::mem::take(&mut self.input).trim().to_string();
        if query.is_empty() {
            return Ok(());
        }
        self.messages
            .push(ChatMessage::new(ChatSpeaker::User, query.clone()));
        self.persist_session();

        let user = self.api.session().user();
        let request = ChatQuery {
            query: query.clone(),
            context: ChatContext {
                user_id: user.as_ref().map(|u| u.id.clone()),
                role: user.as_ref().map(|u| u.role),
                session_id: self.session_id.clone(),
            },
        };

        match self.api.ai_query(&request).await {
            Ok(reply) => {
                self.messages
                    .push(ChatMessage::new(ChatSpeaker::Assistant, reply.response));
                if let Some(issued) = reply.session_id.filter(|id| *id != self.session_id) {
                    tracing::debug!(session_id = %issued, "Server issued chat session");
                    self.session_id = issued;
                    self.resumed = true;
                    self.persist_session();
                }
                self.last_failed = None;
                self.retries = 0;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat query failed");
                self.messages
                    .push(ChatMessage::new(ChatSpeaker::Error, CHAT_ERROR_MESSAGE));
                self.last_failed = Some(query);
                Err(e)
            }
        }
    }

    pub fn can_retry(&self) -> bool {
        self.last_failed.is_some() && self.retries < MAX_RETRIES
    }

    /// Put the last failed message back into the input
    ///
    /// Returns `false` once the retry budget is spent.
    pub fn retry(&mut self) -> bool {
        if !self.can_retry() {
            return false;
        }
        let Some(last) = self.last_failed.clone() else {
            return false;
        };
        self.retries += 1;
        self.input = last;
        true
    }

    /// Drop the conversation and the stored session pointer
    ///
    /// Server-side deletion is best effort. The next message starts a new
    /// session.
    pub async fn clear(&mut self) {
        if let Err(e) = self.api.clear_ai_history(&self.session_id).await {
            tracing::debug!(error = %e, "Failed to delete chat history on the server");
        }
        if let Err(e) = self.api.session().store().remove(CHAT_SESSION_KEY) {
            tracing::warn!(error = %e, "Failed to remove stored chat session");
        }
        self.messages.clear();
        self.input.clear();
        self.last_failed = None;
        self.retries = 0;
        self.session_id = new_session_id();
        self.resumed = false;
    }

    fn persist_session(&self) {
        let store = self.api.session().store();
        if store.get(CHAT_SESSION_KEY).as_deref() == Some(self.session_id.as_str()) {
            return;
        }
        if let Err(e) = store.set(CHAT_SESSION_KEY, &self.session_id) {
            tracing::warn!(error = %e, "Failed to persist chat session id");
        }
    }
}
