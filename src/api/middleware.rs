//! Request Middleware
//!
//! Request-id propagation, request logging and security headers. The
//! request id lives in a task-local so the error renderer and the success
//! envelope can read it without threading it through every handler.

use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, error, info, Level};
use uuid::Uuid;

tokio::task_local! {
    static REQUEST_ID: String;
}

/// Request id of the request being handled on this task, if any.
/// `None` outside a request scope (startup, background tasks).
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Assign a request id (honoring an inbound `x-request-id`), scope it into
/// the task-local and echo it back on the response.
pub async fn request_id(request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut response = REQUEST_ID.scope(id.clone(), next.run(request)).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Severity of the per-request log line; 5xx matches the error renderer.
fn request_log_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::INFO
    } else {
        Level::DEBUG
    }
}

/// Log one line per request with method, path, status and duration.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = started.elapsed().as_millis() as u64;
    let request_id = current_request_id().unwrap_or_else(|| "unknown".to_string());

    let level = request_log_level(status);
    if level == Level::ERROR {
        error!(%method, path, status = status.as_u16(), duration_ms, request_id = %request_id, "request failed");
    } else if level == Level::INFO {
        info!(%method, path, status = status.as_u16(), duration_ms, request_id = %request_id, "request rejected");
    } else {
        debug!(%method, path, status = status.as_u16(), duration_ms, request_id = %request_id, "request completed");
    }

    response
}

/// Baseline security headers on every response.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        HeaderName::from_static("x-xss-protection"),
        HeaderValue::from_static("1; mode=block"),
    );
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("no-referrer"),
    );
    response
}
