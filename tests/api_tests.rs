//! Integration tests for the public data endpoints.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use marquee::server::database::{Database, Talent};
use marquee::server::handlers::{AdminCredentials, AppState};
use marquee::server::routes::build_router;
use marquee::server::session::SessionKeys;

/// Helper to create a test database and app state.
///
/// A single-connection in-memory SQLite pool keeps every statement on the
/// same database.
async fn setup_test_state() -> (AppState, Arc<Database>) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to create pool");

    let db = Arc::new(Database::SQLite(pool));
    db.migrate().await.expect("failed to create tables");

    let state = AppState {
        db: Some(db.clone()),
        sessions: Arc::new(SessionKeys::new("test-secret", 3600)),
        admin: Arc::new(AdminCredentials {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        }),
    };

    (state, db)
}

/// App state with no storage configured (demo mode).
fn demo_state() -> AppState {
    AppState {
        db: None,
        sessions: Arc::new(SessionKeys::new("test-secret", 3600)),
        admin: Arc::new(AdminCredentials {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        }),
    }
}

/// Helper to make a JSON request to the app.
async fn json_request(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body_bytes = body
        .map(|v| serde_json::to_vec(&v).unwrap())
        .unwrap_or_default();

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body_bytes))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body)
}

// ============================================================================
// Bookings
// ============================================================================

#[tokio::test]
async fn create_booking_returns_created_record() {
    let (state, _db) = setup_test_state().await;
    let app = build_router(state);

    let (status, body) = json_request(
        app,
        "POST",
        "/api/bookings",
        Some(json!({
            "talent_id": "talent-1",
            "client_name": "Ada Lovelace",
            "client_email": "ada@example.com",
            "meeting_time": "2026-09-01T10:00:00Z"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("id").is_some());
    assert!(body.get("created_at").is_some());
    assert_eq!(body["talent_id"], "talent-1");
    assert_eq!(body["client_name"], "Ada Lovelace");
    assert_eq!(body["client_email"], "ada@example.com");
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn create_booking_minimal_defaults_to_null_and_pending() {
    let (state, _db) = setup_test_state().await;
    let app = build_router(state);

    let (status, body) = json_request(
        app,
        "POST",
        "/api/bookings",
        Some(json!({
            "client_name": "A",
            "client_email": "a@x.com"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["talent_id"], Value::Null);
    assert_eq!(body["meeting_time"], Value::Null);
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn create_booking_missing_client_name_is_rejected_without_write() {
    let (state, db) = setup_test_state().await;
    let app = build_router(state);

    let (status, body) = json_request(
        app,
        "POST",
        "/api/bookings",
        Some(json!({ "client_email": "a@x.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_FIELD");
    assert_eq!(body["error"]["details"]["field"], "client_name");

    assert!(db.list_bookings().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_booking_empty_client_email_is_rejected_without_write() {
    let (state, db) = setup_test_state().await;
    let app = build_router(state);

    let (status, body) = json_request(
        app,
        "POST",
        "/api/bookings",
        Some(json!({ "client_name": "A", "client_email": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_FIELD");
    assert!(db.list_bookings().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_booking_invalid_meeting_time_is_rejected() {
    let (state, db) = setup_test_state().await;
    let app = build_router(state);

    let (status, body) = json_request(
        app,
        "POST",
        "/api/bookings",
        Some(json!({
            "client_name": "A",
            "client_email": "a@x.com",
            "meeting_time": "next tuesday"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FIELD");
    assert_eq!(body["error"]["details"]["field"], "meeting_time");
    assert!(db.list_bookings().await.unwrap().is_empty());
}

// ============================================================================
// Questions
// ============================================================================

#[tokio::test]
async fn create_question_message_only() {
    let (state, _db) = setup_test_state().await;
    let app = build_router(state);

    let (status, body) = json_request(
        app,
        "POST",
        "/api/questions",
        Some(json!({ "message": "hello" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "hello");
    assert_eq!(body["name"], Value::Null);
    assert_eq!(body["email"], Value::Null);
    assert!(body.get("id").is_some());
    assert!(body.get("created_at").is_some());
}

#[tokio::test]
async fn create_question_with_contact_details() {
    let (state, _db) = setup_test_state().await;
    let app = build_router(state);

    let (status, body) = json_request(
        app,
        "POST",
        "/api/questions",
        Some(json!({
            "name": "Grace",
            "email": "grace@example.com",
            "message": "Availability in October?"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Grace");
    assert_eq!(body["email"], "grace@example.com");
    assert_eq!(body["message"], "Availability in October?");
}

#[tokio::test]
async fn create_question_missing_message_is_rejected_without_write() {
    let (state, db) = setup_test_state().await;
    let app = build_router(state);

    let (status, body) = json_request(
        app,
        "POST",
        "/api/questions",
        Some(json!({ "name": "Grace" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_FIELD");
    assert_eq!(body["error"]["details"]["field"], "message");
    assert!(db.list_questions().await.unwrap().is_empty());
}

// ============================================================================
// Talents
// ============================================================================

#[tokio::test]
async fn list_talents_newest_first() {
    let (state, db) = setup_test_state().await;

    let older = Talent {
        id: "t-older".to_string(),
        name: "Older Talent".to_string(),
        bio: Some("First on the roster".to_string()),
        portfolio_url: None,
        created_at: (Utc::now() - Duration::days(2)).naive_utc(),
    };
    let newer = Talent {
        id: "t-newer".to_string(),
        name: "Newer Talent".to_string(),
        bio: None,
        portfolio_url: Some("https://example.com/newer".to_string()),
        created_at: Utc::now().naive_utc(),
    };
    db.insert_talent(&older).await.unwrap();
    db.insert_talent(&newer).await.unwrap();

    let app = build_router(state);
    let (status, body) = json_request(app, "GET", "/api/talents", None).await;

    assert_eq!(status, StatusCode::OK);
    let talents = body.as_array().expect("expected a JSON array");
    assert_eq!(talents.len(), 2);
    assert_eq!(talents[0]["id"], "t-newer");
    assert_eq!(talents[1]["id"], "t-older");
    assert_eq!(talents[1]["bio"], "First on the roster");
    assert_eq!(talents[0]["bio"], Value::Null);
}

#[tokio::test]
async fn list_talents_empty_roster() {
    let (state, _db) = setup_test_state().await;
    let app = build_router(state);

    let (status, body) = json_request(app, "GET", "/api/talents", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

// ============================================================================
// Demo mode (no storage configured)
// ============================================================================

#[tokio::test]
async fn demo_mode_fails_closed() {
    let app = build_router(demo_state());

    let (status, body) = json_request(app.clone(), "GET", "/api/talents", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "STORAGE_UNAVAILABLE");

    let (status, body) = json_request(
        app.clone(),
        "POST",
        "/api/bookings",
        Some(json!({ "client_name": "A", "client_email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "STORAGE_UNAVAILABLE");

    let (status, body) = json_request(
        app,
        "POST",
        "/api/questions",
        Some(json!({ "message": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "STORAGE_UNAVAILABLE");
}

// ============================================================================
// Pages and health
// ============================================================================

#[tokio::test]
async fn landing_page_renders() {
    let (state, _db) = setup_test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("X-Request-Id").is_some());

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Talent Directory"));
}

#[tokio::test]
async fn health_reports_backend() {
    let (state, _db) = setup_test_state().await;
    let app = build_router(state);

    let (status, body) = json_request(app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["backend"], "sqlite");

    let (status, body) = json_request(build_router(demo_state()), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"]["backend"], "none");
}
