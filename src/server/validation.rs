//! Request validation utilities for the Marquee API.
//!
//! Validation runs before any storage operation: a rejected request never
//! reaches the database.

use std::fmt;

use chrono::NaiveDateTime;

use crate::server::api_error::ApiError;

/// Validation error type.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::invalid_field(&err.field, &err.message)
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Require a field to be present and not empty or whitespace-only.
///
/// Returns the submitted value unchanged so callers echo exactly what the
/// client sent.
pub fn require_field(value: Option<&str>, field_name: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::missing_field(field_name)),
    }
}

/// Validate that a string is not empty or whitespace only.
///
/// # Example
/// ```
/// use marquee::server::validation::validate_not_empty;
///
/// assert!(validate_not_empty("hello", "name").is_ok());
/// assert!(validate_not_empty("", "name").is_err());
/// assert!(validate_not_empty("   ", "name").is_err());
/// ```
pub fn validate_not_empty(value: &str, field_name: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError {
            field: field_name.to_string(),
            message: "cannot be empty".to_string(),
        })
    } else {
        Ok(())
    }
}

/// Validate an optional string - if present, validates it's not empty.
pub fn validate_optional_not_empty(value: Option<&str>, field_name: &str) -> ValidationResult<()> {
    if let Some(v) = value {
        validate_not_empty(v, field_name)
    } else {
        Ok(())
    }
}

/// Parse an ISO 8601 datetime string into a `NaiveDateTime` (UTC).
///
/// Accepts formats:
/// - RFC 3339: `2026-12-31T23:59:59Z`
/// - Without timezone: `2026-12-31T23:59:59`
/// - Date only (start of day): `2026-12-31`
pub fn parse_datetime(value: &str, field_name: &str) -> ValidationResult<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    Err(ValidationError {
        field: field_name.to_string(),
        message:
            "invalid datetime format (expected: ISO 8601, e.g., '2026-12-31T23:59:59Z' or '2026-12-31')"
                .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_require_field() {
        assert_eq!(require_field(Some("Ada"), "client_name").unwrap(), "Ada");
        assert!(require_field(None, "client_name").is_err());
        assert!(require_field(Some(""), "client_name").is_err());
        assert!(require_field(Some("   "), "client_name").is_err());
    }

    #[test]
    fn require_field_preserves_value() {
        // Submitted values are echoed back exactly, untrimmed.
        assert_eq!(
            require_field(Some(" Ada Lovelace "), "client_name").unwrap(),
            " Ada Lovelace "
        );
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("hello", "field").is_ok());
        assert!(validate_not_empty("a", "field").is_ok());
        assert!(validate_not_empty("", "field").is_err());
        assert!(validate_not_empty("   ", "field").is_err());
        assert!(validate_not_empty("\t\n", "field").is_err());
    }

    #[test]
    fn test_validate_optional_not_empty() {
        assert!(validate_optional_not_empty(None, "field").is_ok());
        assert!(validate_optional_not_empty(Some("x"), "field").is_ok());
        assert!(validate_optional_not_empty(Some(""), "field").is_err());
    }

    #[test]
    fn test_parse_datetime_rfc3339() {
        let dt = parse_datetime("2026-12-31T23:59:59Z", "meeting_time").unwrap();
        assert_eq!(dt.year(), 2026);
        assert_eq!(dt.hour(), 23);

        let offset = parse_datetime("2026-12-31T23:59:59+02:00", "meeting_time").unwrap();
        assert_eq!(offset.hour(), 21);
    }

    #[test]
    fn test_parse_datetime_naive_and_date_only() {
        assert!(parse_datetime("2026-12-31T23:59:59", "meeting_time").is_ok());

        let midnight = parse_datetime("2026-12-31", "meeting_time").unwrap();
        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.minute(), 0);
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("tomorrow", "meeting_time").is_err());
        assert!(parse_datetime("31-12-2026", "meeting_time").is_err());
        assert!(parse_datetime("", "meeting_time").is_err());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError {
            field: "meeting_time".to_string(),
            message: "is invalid".to_string(),
        };
        assert_eq!(err.to_string(), "meeting_time: is invalid");
    }
}
