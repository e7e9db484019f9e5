//! Error category classification

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Classification of failures as the user observes them
///
/// Every category except [`ErrorCategory::OperationFailed`] is produced at the
/// HTTP client boundary. `OperationFailed` is raised by feature code
/// (assign, update status, send notification, schedule visit) for failures the
/// boundary does not translate itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// No response received
    Network,
    /// 401
    AuthExpired,
    /// 403
    PermissionDenied,
    /// 404
    NotFound,
    /// 422
    ValidationFailed,
    /// 429
    RateLimited,
    /// 500
    ServerFault,
    /// Feature-specific failure
    OperationFailed,
}

impl ErrorCategory {
    /// Category for an HTTP status the client boundary translates.
    ///
    /// Returns `None` for statuses outside the translated set.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::UNAUTHORIZED => Some(Self::AuthExpired),
            StatusCode::FORBIDDEN => Some(Self::PermissionDenied),
            StatusCode::NOT_FOUND => Some(Self::NotFound),
            StatusCode::UNPROCESSABLE_ENTITY => Some(Self::ValidationFailed),
            StatusCode::TOO_MANY_REQUESTS => Some(Self::RateLimited),
            StatusCode::INTERNAL_SERVER_ERROR => Some(Self::ServerFault),
            _ => None,
        }
    }

    /// User-facing message for this category
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Network => "Network error. Please check your connection.",
            Self::AuthExpired => "Your session has expired. Please sign in again.",
            Self::PermissionDenied => "You do not have permission to perform this action.",
            Self::NotFound => "The requested resource was not found.",
            Self::ValidationFailed => "Validation failed. Please check your input.",
            Self::RateLimited => "Too many requests. Please slow down and try again.",
            Self::ServerFault => "Server error. Please try again later.",
            Self::OperationFailed => "The operation failed. Please try again.",
        }
    }

    /// Short notification title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Network => "Network error",
            Self::AuthExpired => "Session expired",
            Self::PermissionDenied => "Access denied",
            Self::NotFound => "Not found",
            Self::ValidationFailed => "Validation error",
            Self::RateLimited => "Slow down",
            Self::ServerFault => "Server error",
            Self::OperationFailed => "Operation failed",
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::AuthExpired => "auth_expired",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::ValidationFailed => "validation_failed",
            Self::RateLimited => "rate_limited",
            Self::ServerFault => "server_fault",
            Self::OperationFailed => "operation_failed",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(
            ErrorCategory::from_status(StatusCode::UNAUTHORIZED),
            Some(ErrorCategory::AuthExpired)
        );
        assert_eq!(
            ErrorCategory::from_status(StatusCode::FORBIDDEN),
            Some(ErrorCategory::PermissionDenied)
        );
        assert_eq!(
            ErrorCategory::from_status(StatusCode::NOT_FOUND),
            Some(ErrorCategory::NotFound)
        );
        assert_eq!(
            ErrorCategory::from_status(StatusCode::UNPROCESSABLE_ENTITY),
            Some(ErrorCategory::ValidationFailed)
        );
        assert_eq!(
            ErrorCategory::from_status(StatusCode::TOO_MANY_REQUESTS),
            Some(ErrorCategory::RateLimited)
        );
        assert_eq!(
            ErrorCategory::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            Some(ErrorCategory::ServerFault)
        );
    }

    #[test]
    fn test_untranslated_statuses() {
        assert_eq!(ErrorCategory::from_status(StatusCode::BAD_REQUEST), None);
        assert_eq!(ErrorCategory::from_status(StatusCode::CONFLICT), None);
        assert_eq!(ErrorCategory::from_status(StatusCode::BAD_GATEWAY), None);
    }

    #[test]
    fn test_serde_name_matches_display() {
        let json = serde_json::to_string(&ErrorCategory::RateLimited).unwrap();
        assert_eq!(json, "\"rate_limited\"");
        assert_eq!(ErrorCategory::RateLimited.to_string(), "rate_limited");
    }
}
