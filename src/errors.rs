//! Crate-level error types.

use thiserror::Error;

/// Internal failures surfaced by the configuration, storage, and session
/// layers. HTTP-facing errors live in [`crate::server::api_error`].
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("session error: {0}")]
    Session(String),
}

pub type SiteResult<T> = Result<T, SiteError>;
