//! Configuration system for Marquee.
//!
//! Configuration is loaded from multiple sources with the following precedence:
//! 1. Environment variables (highest priority)
//! 2. `config.toml` file
//! 3. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `MARQUEE_SERVER_HOST` - Server bind address
//! - `MARQUEE_SERVER_PORT` - Server port
//! - `MARQUEE_DATABASE_URL` - Database connection URL (empty = demo mode)
//! - `MARQUEE_ADMIN_USERNAME` - Admin account username
//! - `MARQUEE_ADMIN_PASSWORD` - Admin account password
//! - `MARQUEE_SESSION_SECRET` - Secret for signing session tokens
//! - `MARQUEE_SESSION_TTL_SECS` - Session lifetime in seconds
//! - `MARQUEE_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
//!
//! The loaded [`SiteConfig`] is an explicit value constructed once at
//! process entry and passed by reference into the HTTP layer. There is no
//! global configuration singleton.

use config::Config;
use serde::Deserialize;
use std::env;

use crate::errors::{SiteError, SiteResult};

/// Insecure fallback used when no session secret is configured.
///
/// Deployments must override this via `MARQUEE_SESSION_SECRET`; startup
/// logs a warning while the fallback is in effect.
pub const INSECURE_SESSION_SECRET: &str = "marquee-insecure-dev-secret";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Admin account and session configuration
    pub auth: AuthConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL. Scheme selects the backend (`sqlite://` or
    /// `postgres://`). An empty URL starts the service in demo mode.
    pub url: String,
}

impl DatabaseConfig {
    /// Whether a storage backend has been configured at all.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Admin account and session token configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Admin account username
    pub admin_username: String,
    /// Admin account password. Empty means logins are disabled.
    pub admin_password: String,
    /// Secret key for HS256 session token signing
    pub session_secret: String,
    /// Session lifetime in seconds (default: 24 hours)
    pub session_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: String::new(),
            session_secret: INSECURE_SESSION_SECRET.to_string(),
            session_ttl_secs: 86_400,
        }
    }
}

impl AuthConfig {
    /// Whether the deployment is still running on the insecure fallback
    /// secret.
    pub fn uses_fallback_secret(&self) -> bool {
        self.session_secret == INSECURE_SESSION_SECRET
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. `config.toml` file (optional)
    /// 3. Environment variables
    pub fn load() -> SiteResult<Self> {
        let builder = Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_default("server.port", 8080)
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_default("database.url", "")
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_default("auth.admin_username", "admin")
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_default("auth.admin_password", "")
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_default("auth.session_secret", INSECURE_SESSION_SECRET)
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_default("auth.session_ttl_secs", 86_400)
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_default("logging.level", "info")
            .map_err(|e| SiteError::Config(e.to_string()))?
            // Load from config.toml (optional)
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables
            .set_override_option("server.host", env::var("MARQUEE_SERVER_HOST").ok())
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_override_option(
                "server.port",
                env::var("MARQUEE_SERVER_PORT")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok()),
            )
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_override_option("database.url", env::var("MARQUEE_DATABASE_URL").ok())
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_override_option(
                "auth.admin_username",
                env::var("MARQUEE_ADMIN_USERNAME").ok(),
            )
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_override_option(
                "auth.admin_password",
                env::var("MARQUEE_ADMIN_PASSWORD").ok(),
            )
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_override_option(
                "auth.session_secret",
                env::var("MARQUEE_SESSION_SECRET").ok(),
            )
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_override_option(
                "auth.session_ttl_secs",
                env::var("MARQUEE_SESSION_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok()),
            )
            .map_err(|e| SiteError::Config(e.to_string()))?
            .set_override_option("logging.level", env::var("MARQUEE_LOG_LEVEL").ok())
            .map_err(|e| SiteError::Config(e.to_string()))?;

        let settings = builder
            .build()
            .map_err(|e| SiteError::Config(format!("failed to build config: {e}")))?;

        settings
            .try_deserialize()
            .map_err(|e| SiteError::Config(format!("failed to deserialize config: {e}")))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> SiteResult<()> {
        if self.server.port == 0 {
            return Err(SiteError::Config(
                "server.port must be greater than 0".to_string(),
            ));
        }

        if self.database.is_configured() {
            let url = self.database.url.trim();
            if !url.starts_with("sqlite") && !url.starts_with("postgres") {
                return Err(SiteError::Config(format!(
                    "database.url must start with 'sqlite' or 'postgres', got '{url}'"
                )));
            }
        }

        if self.auth.admin_username.trim().is_empty() {
            return Err(SiteError::Config(
                "auth.admin_username cannot be empty".to_string(),
            ));
        }

        if self.auth.session_secret.is_empty() {
            return Err(SiteError::Config(
                "auth.session_secret cannot be empty".to_string(),
            ));
        }

        if self.auth.session_ttl_secs == 0 {
            return Err(SiteError::Config(
                "auth.session_ttl_secs must be greater than 0".to_string(),
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(SiteError::Config(format!(
                    "logging.level must be one of: trace, debug, info, warn, error. Got '{other}'"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.database.is_configured());
        assert!(config.auth.uses_fallback_secret());
        assert_eq!(config.auth.session_ttl_secs, 86_400);
    }

    #[test]
    fn zero_port_rejected() {
        let mut config = SiteConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_database_scheme_rejected() {
        let mut config = SiteConfig::default();
        config.database.url = "mysql://localhost/marquee".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn known_database_schemes_accepted() {
        let mut config = SiteConfig::default();
        config.database.url = "sqlite://marquee.db".to_string();
        assert!(config.validate().is_ok());
        config.database.url = "postgres://localhost/marquee".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_session_secret_rejected() {
        let mut config = SiteConfig::default();
        config.auth.session_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_log_level_rejected() {
        let mut config = SiteConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}
