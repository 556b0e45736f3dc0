//! Request logging middleware and health reporting.
//!
//! Every request gets a unique id, a tracing span, and a timing log line;
//! the id is echoed back in the `X-Request-Id` response header.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, Response},
    middleware::Next,
    Json,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::server::handlers::AppState;

/// Header name for the request ID.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Generate a new unique request ID.
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Logging middleware that tracks request timing and generates request IDs.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response<Body> {
    let request_id = generate_request_id();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let start = Instant::now();

    let response = async move { next.run(request).await }
        .instrument(span.clone())
        .await;

    let duration = start.elapsed();
    let status = response.status();

    let _enter = span.enter();
    info!(
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    let (mut parts, body) = response.into_parts();
    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        parts.headers.insert(REQUEST_ID_HEADER, header_value);
    }

    Response::from_parts(parts, body)
}

/// Health check response structure.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Service status ("healthy" or "degraded")
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Storage backend status
    pub database: DatabaseHealth,
}

/// Storage backend health status.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DatabaseHealth {
    /// Whether a storage backend is configured and reachable
    pub connected: bool,
    /// Backend type, or "none" in demo mode
    pub backend: String,
}

impl HealthResponse {
    /// Build a health report. Demo mode (no storage) reports degraded.
    pub fn report(db_connected: bool, backend: &str) -> Self {
        Self {
            status: if db_connected { "healthy" } else { "degraded" }.to_string(),
            service: "marquee".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: DatabaseHealth {
                connected: db_connected,
                backend: backend.to_string(),
            },
        }
    }
}

/// GET /health - report service and storage status.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let report = match &state.db {
        Some(db) => HealthResponse::report(db.is_reachable().await, db.backend_name()),
        None => HealthResponse::report(false, "none"),
    };

    Json(report)
}
