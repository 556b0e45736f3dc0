//! Standardized API error responses for all Marquee endpoints.
//!
//! All error responses follow this JSON structure:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "MISSING_FIELD",
//!     "message": "Required field 'client_name' is missing",
//!     "details": { "field": "client_name" }
//!   }
//! }
//! ```
//!
//! The `details` field is optional and may contain additional context.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::SiteError;

/// Machine-readable error codes for API responses.
///
/// These codes are stable and can be used by clients for programmatic
/// error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // === Validation Errors (400) ===
    /// Request payload is invalid or malformed
    InvalidRequest,
    /// A required field is missing or empty
    MissingField,
    /// A field value is invalid
    InvalidField,

    // === Authentication Errors (401) ===
    /// Submitted credentials do not match the admin account
    InvalidCredentials,
    /// No session cookie was provided
    MissingSession,
    /// Session token failed verification
    InvalidSession,
    /// Session token has expired
    SessionExpired,

    // === Server Errors (5xx) ===
    /// No storage backend was configured at startup (demo mode)
    StorageUnavailable,
    /// Database operation failed
    DatabaseError,
    /// Server configuration error
    ConfigError,
    /// Unexpected internal server error
    InternalError,
}

impl ErrorCode {
    /// Returns the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidRequest | ErrorCode::MissingField | ErrorCode::InvalidField => {
                StatusCode::BAD_REQUEST
            }

            ErrorCode::InvalidCredentials
            | ErrorCode::MissingSession
            | ErrorCode::InvalidSession
            | ErrorCode::SessionExpired => StatusCode::UNAUTHORIZED,

            ErrorCode::StorageUnavailable
            | ErrorCode::DatabaseError
            | ErrorCode::ConfigError
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a default human-readable message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "Request payload is invalid",
            ErrorCode::MissingField => "A required field is missing",
            ErrorCode::InvalidField => "A field value is invalid",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::MissingSession => "A session cookie is required",
            ErrorCode::InvalidSession => "Session token is invalid",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::StorageUnavailable => "No storage backend is configured",
            ErrorCode::DatabaseError => "Database operation failed",
            ErrorCode::ConfigError => "Server configuration error",
            ErrorCode::InternalError => "An unexpected error occurred",
        }
    }
}

/// The inner error object containing code, message, and optional details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field name, constraint violated, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Standardized API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// The error details
    pub error: ErrorBody,
}

impl ApiError {
    /// Creates a new API error with the given code and its default message.
    pub fn new(code: ErrorCode) -> Self {
        Self {
            error: ErrorBody {
                code,
                message: code.default_message().to_string(),
                details: None,
            },
        }
    }

    /// Creates a new API error with a custom message.
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code,
                message: message.into(),
                details: None,
            },
        }
    }

    /// Creates a new API error with a custom message and details.
    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorBody {
                code,
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.error.code.status_code()
    }

    // === Convenience constructors for common errors ===

    /// Missing or empty required field error.
    pub fn missing_field(field: &str) -> Self {
        Self::with_details(
            ErrorCode::MissingField,
            format!("Required field '{}' is missing", field),
            serde_json::json!({ "field": field }),
        )
    }

    /// Invalid field value error.
    pub fn invalid_field(field: &str, reason: &str) -> Self {
        Self::with_details(
            ErrorCode::InvalidField,
            format!("Invalid value for '{}': {}", field, reason),
            serde_json::json!({ "field": field }),
        )
    }

    /// Storage backend not configured (demo mode).
    pub fn storage_unavailable() -> Self {
        Self::new(ErrorCode::StorageUnavailable)
    }

    /// Database error (internal details hidden from client).
    pub fn database_error() -> Self {
        Self::new(ErrorCode::DatabaseError)
    }

    /// Internal server error.
    pub fn internal_error() -> Self {
        Self::new(ErrorCode::InternalError)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.error.code, self.error.message)
    }
}

impl std::error::Error for ApiError {}

impl From<SiteError> for ApiError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::Config(msg) => ApiError::with_message(ErrorCode::ConfigError, msg),
            // Raw database messages stay in the logs, not the response.
            SiteError::Database(_) => ApiError::database_error(),
            SiteError::Session(msg) => ApiError::with_message(ErrorCode::InternalError, msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_status_mapping() {
        assert_eq!(
            ErrorCode::MissingField.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidField.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::SessionExpired.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::StorageUnavailable.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::DatabaseError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn api_error_serialization() {
        let err = ApiError::storage_unavailable();
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("STORAGE_UNAVAILABLE"));
        assert!(json.contains("message"));
    }

    #[test]
    fn api_error_with_details() {
        let err = ApiError::missing_field("client_email");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("MISSING_FIELD"));
        assert!(json.contains("client_email"));
    }

    #[test]
    fn database_error_hides_internals() {
        let site_err = SiteError::Database("connection reset by peer".to_string());
        let api_err: ApiError = site_err.into();
        assert_eq!(api_err.error.code, ErrorCode::DatabaseError);
        assert!(!api_err.error.message.contains("connection reset"));
    }
}
