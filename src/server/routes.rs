use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::server::handlers::{
    create_booking_handler, create_question_handler, list_bookings_handler,
    list_questions_handler, list_talents_handler, login_handler, logout_handler, AppState,
};
use crate::server::logging::{health_handler, request_logging_middleware};
use crate::server::pages::{admin_page, home_page};

/// Build the main application router for the Marquee server.
///
/// This is a convenience helper so `main.rs` or tests can construct the
/// router in a single call.
///
/// # Routes
///
/// ## Pages
/// - `GET /` - Public landing page
/// - `GET /admin` - Login form or admin panel, branching on the session cookie
///
/// ## Session
/// - `POST /admin/login` - Authenticate and set the session cookie
/// - `POST /admin/logout` - Clear the session cookie
///
/// ## Public data endpoints
/// - `GET /api/talents` - List talents, newest first
/// - `POST /api/bookings` - Submit a booking request
/// - `POST /api/questions` - Submit a contact-form question
///
/// ## Admin data endpoints (session gate)
/// - `GET /api/admin/bookings` - List booking requests
/// - `GET /api/admin/questions` - List questions
///
/// ## Operational
/// - `GET /health` - Service and storage status
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/admin", get(admin_page))
        .route("/admin/login", post(login_handler))
        .route("/admin/logout", post(logout_handler))
        .route("/api/talents", get(list_talents_handler))
        .route("/api/bookings", post(create_booking_handler))
        .route("/api/questions", post(create_question_handler))
        .route("/api/admin/bookings", get(list_bookings_handler))
        .route("/api/admin/questions", get(list_questions_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(state)
}
