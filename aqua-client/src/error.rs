//! Client error types

use shared::error::{ErrorCategory, FieldError};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response received (connect failure, timeout)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// 401 - session cleared by the interceptor
    #[error("Session expired")]
    SessionExpired,

    /// 403
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// 422
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    /// 429
    #[error("Too many requests")]
    RateLimited,

    /// 500
    #[error("Server error: {0}")]
    Server(String),

    /// Any other non-success status
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Attachment rejected before upload
    #[error("Upload rejected: {0}")]
    Upload(String),

    /// Local form validation failed; nothing was sent
    #[error("{0}")]
    Form(String),

    /// The owning view was torn down while the request was in flight
    #[error("Request cancelled")]
    Cancelled,

    /// The underlying HTTP client could not be built
    #[error("HTTP client setup failed: {0}")]
    Setup(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Category as the user observes it
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) => ErrorCategory::Network,
            Self::SessionExpired => ErrorCategory::AuthExpired,
            Self::Forbidden(_) => ErrorCategory::PermissionDenied,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Validation { .. } | Self::Form(_) | Self::Upload(_) => {
                ErrorCategory::ValidationFailed
            }
            Self::RateLimited => ErrorCategory::RateLimited,
            Self::Server(_) => ErrorCategory::ServerFault,
            Self::Status { .. }
            | Self::InvalidResponse(_)
            | Self::Serialization(_)
            | Self::Cancelled
            | Self::Setup(_)
            | Self::Io(_) => ErrorCategory::OperationFailed,
        }
    }

    /// Whether the response interceptor already notified the user
    ///
    /// Feature code only raises its own "operation failed" notification when
    /// this is `false`, so each failure produces exactly one notification.
    pub fn is_surfaced(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::SessionExpired
                | Self::Forbidden(_)
                | Self::NotFound(_)
                | Self::Validation { .. }
                | Self::RateLimited
                | Self::Server(_)
        )
    }

    /// Rejected before anything was sent
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Form(_) | Self::Upload(_))
    }

    /// Teardown is not a failure worth telling the user about
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        let message = fields
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect::<Vec<_>>()
            .join("\n");
        Self::Form(message)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surfaced_errors() {
        assert!(ClientError::SessionExpired.is_surfaced());
        assert!(ClientError::RateLimited.is_surfaced());
        assert!(ClientError::Server("boom".into()).is_surfaced());
        assert!(
            !ClientError::Status {
                status: 409,
                message: "conflict".into()
            }
            .is_surfaced()
        );
        assert!(!ClientError::Form("missing email".into()).is_surfaced());
        assert!(!ClientError::Cancelled.is_surfaced());
    }

    #[test]
    fn test_local_errors() {
        assert!(ClientError::Form("Findings is required".into()).is_local());
        assert!(ClientError::Upload("too many photos".into()).is_local());
        assert!(!ClientError::RateLimited.is_local());
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            ClientError::Forbidden("x".into()).category(),
            ErrorCategory::PermissionDenied
        );
        assert_eq!(
            ClientError::Status {
                status: 400,
                message: String::new()
            }
            .category(),
            ErrorCategory::OperationFailed
        );
    }
}
