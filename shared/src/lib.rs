//! Shared types for the Aqua compliance platform
//!
//! Domain entities, status enums, the response envelope decoder and the
//! client-observable error taxonomy. Used by `aqua-client` and `aqua-console`.

pub mod client;
pub mod error;
pub mod message;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorCategory, FieldError};
pub use message::{Notification, NotificationLevel};
pub use response::{Envelope, Resource};
