//! Client-observable error taxonomy
//!
//! - [`ErrorCategory`]: classification of every failure a user can observe
//! - [`FieldError`]: one field-level validation message from a 422 response
//!
//! # Example
//!
//! ```
//! use shared::error::ErrorCategory;
//! use shared::http::StatusCode;
//!
//! let category = ErrorCategory::from_status(StatusCode::TOO_MANY_REQUESTS);
//! assert_eq!(category, Some(ErrorCategory::RateLimited));
//! ```

mod category;

pub use category::ErrorCategory;

use serde::{Deserialize, Serialize};

/// Field-level validation message
///
/// The API is not consistent about the key names, so `msg` and `param`
/// (express-validator style) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default, alias = "param", alias = "path")]
    pub field: Option<String>,
    #[serde(alias = "msg")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {}", field, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
