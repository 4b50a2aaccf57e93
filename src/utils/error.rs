//! Error Handling
//!
//! Unified error types for the application. Uses thiserror for ergonomic
//! error definitions; every variant maps to one HTTP status and one
//! machine-readable code, rendered as the standard JSON error envelope.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use once_cell::sync::OnceCell;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use buildbrief_llm::LlmError;

use crate::api::middleware::current_request_id;

/// Whether internal error messages are exposed to clients.
/// Set once at startup from the environment config; defaults to hidden.
static EXPOSE_INTERNAL: OnceCell<bool> = OnceCell::new();

/// Configure internal-detail exposure (development mode only).
pub fn set_expose_internal(expose: bool) {
    let _ = EXPOSE_INTERNAL.set(expose);
}

fn expose_internal() -> bool {
    *EXPOSE_INTERNAL.get().unwrap_or(&false)
}

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed client input; never retried, never partially applied.
    #[error("{message}")]
    Validation { message: String, issues: Vec<String> },

    /// Unknown session or resource; not transient, never retried.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Per-key request quota exhausted; client may retry after the window.
    #[error("Too many requests")]
    RateLimit { retry_after: u64 },

    /// Upstream LLM failure (network, timeout, bad status, unparseable or
    /// invalid reply). Surfaced as 502; the server never retries.
    #[error("AI service error: {message}")]
    AiService { message: String, retryable: bool },

    /// External dependency unreachable.
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// Unexpected internal failure; generic message to callers outside
    /// development mode.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a validation error with the list of violated constraints
    pub fn validation(message: impl Into<String>, issues: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            issues,
        }
    }

    /// Create a not-found error for a resource, optionally tagged with its id
    pub fn not_found(resource: impl Into<String>, id: Option<&str>) -> Self {
        let resource = match id {
            Some(id) => format!("{} ({})", resource.into(), id),
            None => resource.into(),
        };
        Self::NotFound { resource }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::RateLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::AiService { .. } => StatusCode::BAD_GATEWAY,
            Self::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::RateLimit { .. } => "RATE_LIMIT_EXCEEDED",
            Self::AiService { .. } => "AI_SERVICE_ERROR",
            Self::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation { issues, .. } if !issues.is_empty() => {
                Some(json!({ "issues": issues }))
            }
            Self::RateLimit { retry_after } => Some(json!({ "retryAfter": retry_after })),
            Self::AiService { retryable, .. } => Some(json!({ "retryable": retryable })),
            _ => None,
        }
    }

    /// Message as exposed to clients. Internal errors are masked outside
    /// development mode.
    fn client_message(&self) -> String {
        match self {
            Self::Internal { .. } if !expose_internal() => {
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        Self::AiService {
            message: err.to_string(),
            retryable: err.is_transient(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let request_id = current_request_id().unwrap_or_else(|| "unknown".to_string());

        if status.is_server_error() {
            error!(status = status.as_u16(), code, request_id = %request_id, "{}", self);
        } else {
            warn!(status = status.as_u16(), code, request_id = %request_id, "{}", self);
        }

        let mut error_body = json!({
            "message": self.client_message(),
            "code": code,
        });
        if let Some(details) = self.details() {
            error_body["details"] = details;
        }

        let body = json!({
            "success": false,
            "error": error_body,
            "timestamp": Utc::now().to_rfc3339(),
            "requestId": request_id,
        });

        let mut response = (status, Json(body)).into_response();

        if let AppError::RateLimit { retry_after } = &self {
            if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}
