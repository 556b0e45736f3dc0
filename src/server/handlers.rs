//! Axum HTTP handlers for the Marquee API.
//!
//! Every data handler follows the same shape: check that storage is
//! configured (fail closed in demo mode), validate the body, run exactly
//! one SQL statement, return JSON. No retries, no transactions spanning
//! statements.

use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SiteConfig;
use crate::errors::SiteResult;
use crate::server::api_error::{ApiError, ErrorCode};
use crate::server::database::{Booking, Database, NewBooking, NewQuestion, Question, Talent};
use crate::server::session::{
    clear_session_cookie, session_cookie, AdminSession, SessionKeys,
};
use crate::server::validation::{parse_datetime, require_field, validate_optional_not_empty};

/// Configured admin account credentials.
///
/// A single static account compared byte-for-byte at login. An empty
/// configured password disables logins entirely rather than matching an
/// empty submission.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    /// Whether the submitted credentials match the configured account.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        if self.password.is_empty() {
            return false;
        }
        self.username == username && self.password == password
    }
}

/// Shared application state for handlers.
///
/// `db` is `None` in demo mode (no connection string configured); data
/// handlers then fail closed with a typed error.
#[derive(Clone)]
pub struct AppState {
    pub db: Option<Arc<Database>>,
    pub sessions: Arc<SessionKeys>,
    pub admin: Arc<AdminCredentials>,
}

impl AppState {
    /// Build application state from the loaded configuration and an
    /// optional storage handle.
    pub fn new(config: &SiteConfig, db: Option<Arc<Database>>) -> SiteResult<Self> {
        Ok(Self {
            db,
            sessions: Arc::new(SessionKeys::from_config(&config.auth)?),
            admin: Arc::new(AdminCredentials {
                username: config.auth.admin_username.clone(),
                password: config.auth.admin_password.clone(),
            }),
        })
    }

    /// The storage backend, or a typed dependency-unavailable error.
    fn storage(&self) -> Result<&Database, ApiError> {
        self.db.as_deref().ok_or_else(ApiError::storage_unavailable)
    }
}

// ============================================================================
// Login / Logout
// ============================================================================

/// Request body for admin login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Acknowledgment body for login and logout.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// POST /admin/login - authenticate the admin account.
///
/// On match, issues a session token and sets it as an HTTP-only,
/// `SameSite=Strict`, `Secure` cookie. On mismatch, responds 401 with no
/// cookie.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.admin.matches(&payload.username, &payload.password) {
        warn!(username = %payload.username, "Rejected admin login attempt");
        return Err(ApiError::new(ErrorCode::InvalidCredentials));
    }

    let token = state.sessions.sign(&payload.username, "admin")?;
    let cookie = session_cookie(&token, state.sessions.ttl_secs());

    info!(username = %payload.username, "Admin logged in");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(OkResponse { ok: true }),
    ))
}

/// POST /admin/logout - clear the session cookie.
///
/// Always succeeds, authenticated or not.
pub async fn logout_handler() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(OkResponse { ok: true }),
    )
}

// ============================================================================
// Public data endpoints
// ============================================================================

/// GET /api/talents - list all talents, newest first.
pub async fn list_talents_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Talent>>, ApiError> {
    let talents = state.storage()?.list_talents().await?;
    Ok(Json(talents))
}

/// Request body for creating a booking.
///
/// All fields optional at the serde level so presence checks surface as
/// 400 validation errors rather than body-rejection failures.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub talent_id: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub meeting_time: Option<String>,
}

/// POST /api/bookings - submit a booking request.
///
/// Requires non-empty `client_name` and `client_email`. `meeting_time`,
/// when present, must parse as ISO 8601; absent values are stored null.
/// The created record comes back with its server-assigned id, pending
/// status, and timestamp.
pub async fn create_booking_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<Booking>, ApiError> {
    let db = state.storage()?;

    let client_name = require_field(payload.client_name.as_deref(), "client_name")?;
    let client_email = require_field(payload.client_email.as_deref(), "client_email")?;

    let meeting_time = payload
        .meeting_time
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_datetime(s, "meeting_time"))
        .transpose()?;

    let booking = db
        .insert_booking(NewBooking {
            talent_id: payload.talent_id,
            client_name,
            client_email,
            meeting_time,
        })
        .await?;

    info!(booking_id = %booking.id, "Created booking request");

    Ok(Json(booking))
}

/// Request body for submitting a question.
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// POST /api/questions - submit a contact-form question.
///
/// Requires a non-empty `message`; `name` and `email` are independently
/// optional and stored null when absent.
pub async fn create_question_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<Json<Question>, ApiError> {
    let db = state.storage()?;

    let message = require_field(payload.message.as_deref(), "message")?;
    validate_optional_not_empty(payload.name.as_deref(), "name")?;
    validate_optional_not_empty(payload.email.as_deref(), "email")?;

    let question = db
        .insert_question(NewQuestion {
            name: payload.name,
            email: payload.email,
            message,
        })
        .await?;

    info!(question_id = %question.id, "Created question");

    Ok(Json(question))
}

// ============================================================================
// Admin data endpoints (session gate applied uniformly)
// ============================================================================

/// GET /api/admin/bookings - list all booking requests, newest first.
pub async fn list_bookings_handler(
    AdminSession(identity): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    info!(admin = %identity.subject, "Listing bookings");
    let bookings = state.storage()?.list_bookings().await?;
    Ok(Json(bookings))
}

/// GET /api/admin/questions - list all questions, newest first.
pub async fn list_questions_handler(
    AdminSession(identity): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Question>>, ApiError> {
    info!(admin = %identity.subject, "Listing questions");
    let questions = state.storage()?.list_questions().await?;
    Ok(Json(questions))
}
