//! Aqua Client - API client for the water compliance platform
//!
//! Holds the session, talks to the REST API through one interceptor, and
//! builds the typed view models the console renders: role dashboards,
//! complaint tracking, the plant setup wizard, the knowledge hub and the AI
//! chat widget.

pub mod api;
pub mod chat;
pub mod complaints;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod guard;
pub mod http;
pub mod knowledge;
pub mod location;
pub mod notify;
pub mod session;
pub mod storage;
pub mod upload;
pub mod wizard;

pub use api::TrackingLookup;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use guard::{GuardOutcome, Navigation};
pub use http::ApiClient;
pub use notify::{Navigator, NotificationCenter, Notifier, RedirectRecorder};
pub use session::{SessionHandle, SessionManager, SessionState};
pub use storage::{FileStore, MemoryStore, SessionStore};

// Re-export shared types for convenience
pub use shared::client::{AuthPayload, LoginRequest, RegisterRequest};
pub use shared::message::{Notification, NotificationLevel};
