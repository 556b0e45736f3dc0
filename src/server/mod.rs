//! Server-side components for Marquee.
//!
//! This module contains:
//! - `database`   → DB abstraction over SQLite/Postgres
//! - `handlers`   → Axum HTTP handlers for the site endpoints
//! - `pages`      → HTML page rendering (landing page, admin panel)
//! - `routes`     → Router builder
//! - `session`    → Session token codec and cookie-based session gate
//! - `api_error`  → Standardized JSON error responses
//! - `validation` → Request validation utilities
//! - `logging`    → Request logging middleware and health reporting

pub mod api_error;
pub mod database;
pub mod handlers;
pub mod logging;
pub mod pages;
pub mod routes;
pub mod session;
pub mod validation;

// Convenient re-exports so callers can do `marquee::server::X`
// instead of digging into submodules.

pub use api_error::{ApiError, ErrorBody, ErrorCode};
pub use database::{
    Booking, Database, NewBooking, NewQuestion, Question, Talent, BOOKING_STATUS_PENDING,
};
pub use handlers::{
    create_booking_handler, create_question_handler, list_bookings_handler,
    list_questions_handler, list_talents_handler, login_handler, logout_handler, AdminCredentials,
    AppState, CreateBookingRequest, CreateQuestionRequest, LoginRequest, OkResponse,
};
pub use logging::{
    health_handler, request_logging_middleware, DatabaseHealth, HealthResponse, REQUEST_ID_HEADER,
};
pub use routes::build_router;
pub use session::{
    clear_session_cookie, session_cookie, session_token, AdminIdentity, AdminSession, Claims,
    OptionalAdmin, SessionError, SessionKeys, SESSION_COOKIE,
};
pub use validation::{
    parse_datetime, require_field, validate_not_empty, validate_optional_not_empty,
    ValidationError, ValidationResult,
};
