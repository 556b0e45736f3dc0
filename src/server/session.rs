//! Admin session tokens and the cookie-based session gate.
//!
//! The admin account authenticates once via `/admin/login`; the resulting
//! HS256-signed token travels in an HTTP-only cookie. Handlers opt into
//! the gate through the [`AdminSession`] extractor:
//!
//! ```rust,ignore
//! async fn admin_handler(AdminSession(identity): AdminSession) -> impl IntoResponse {
//!     format!("Hello, {}!", identity.subject)
//! }
//! ```
//!
//! Verification failures never panic and never leak library errors: a
//! missing cookie, a malformed or re-signed token, and an expired token
//! each map to a typed 401 rejection with no handler-level fallback.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::errors::{SiteError, SiteResult};
use crate::server::api_error::{ApiError, ErrorCode};
use crate::server::handlers::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "marquee_session";

/// Session token claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the admin username the token was issued to
    pub sub: String,
    /// Role the subject authenticated as
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Identity attached to a request once the session gate passes.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub subject: String,
    pub role: String,
}

/// Session gate failures.
#[derive(Debug, Clone)]
pub enum SessionError {
    /// No session cookie on the request
    MissingCookie,
    /// Token failed signature or structural verification
    InvalidToken,
    /// Token expiry has passed
    TokenExpired,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::MissingCookie => write!(f, "missing session cookie"),
            SessionError::InvalidToken => write!(f, "invalid session token"),
            SessionError::TokenExpired => write!(f, "session token has expired"),
        }
    }
}

impl std::error::Error for SessionError {}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let code = match self {
            SessionError::MissingCookie => ErrorCode::MissingSession,
            SessionError::InvalidToken => ErrorCode::InvalidSession,
            SessionError::TokenExpired => ErrorCode::SessionExpired,
        };
        ApiError::new(code).into_response()
    }
}

/// Signing and verification keys for admin session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl SessionKeys {
    /// Create session keys from a raw secret and token lifetime.
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    /// Create session keys from the auth configuration.
    pub fn from_config(config: &AuthConfig) -> SiteResult<Self> {
        if config.session_secret.is_empty() {
            return Err(SiteError::Config(
                "session_secret is required for session signing".to_string(),
            ));
        }

        Ok(Self::new(&config.session_secret, config.session_ttl_secs))
    }

    /// Token lifetime in seconds.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Sign a new session token for the given subject and role.
    pub fn sign(&self, subject: &str, role: &str) -> SiteResult<String> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|e| SiteError::Session(format!("system time error: {e}")))?
            .as_secs();

        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SiteError::Session(format!("failed to sign token: {e}")))
    }

    /// Verify a session token and extract its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, SessionError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::TokenExpired,
                _ => SessionError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

/// Build the `Set-Cookie` value establishing a session.
pub fn session_cookie(token: &str, ttl_secs: u64) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; Max-Age={ttl_secs}; HttpOnly; Secure; SameSite=Strict"
    )
}

/// Build the `Set-Cookie` value clearing the session unconditionally.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; Secure; SameSite=Strict")
}

/// Extract the session token from the request's `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            let pair = pair.trim();
            if let Some(token) = pair.strip_prefix(SESSION_COOKIE) {
                if let Some(token) = token.strip_prefix('=') {
                    return Some(token.to_string());
                }
            }
        }
    }
    None
}

/// Axum extractor enforcing the session gate.
///
/// Rejects with a 401 JSON error when the cookie is absent or the token
/// fails verification.
#[derive(Debug, Clone)]
pub struct AdminSession(pub AdminIdentity);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(SessionError::MissingCookie)?;
        let claims = state.sessions.verify(&token)?;

        Ok(AdminSession(AdminIdentity {
            subject: claims.sub,
            role: claims.role,
        }))
    }
}

/// Optional variant of the session gate.
///
/// Yields `Some(identity)` when a valid session cookie is present, `None`
/// otherwise. The admin page uses this to branch between the login form
/// and the panel.
#[derive(Debug, Clone)]
pub struct OptionalAdmin(pub Option<AdminIdentity>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalAdmin {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AdminSession::from_request_parts(parts, state).await {
            Ok(AdminSession(identity)) => Ok(OptionalAdmin(Some(identity))),
            Err(_) => Ok(OptionalAdmin(None)),
        }
    }
}
