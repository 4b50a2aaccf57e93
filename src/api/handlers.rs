//! HTTP Handlers
//!
//! Thin glue between the HTTP surface and the interview service. Handlers
//! validate, delegate and wrap the result in the success envelope; all
//! domain decisions live in the services layer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::api::middleware::current_request_id;
use crate::api::validation::{validate_project_id, AnswerRequest, InitRequest, RefineRequest};
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Standard success envelope: `{ success, data, requestId }`.
fn envelope(data: serde_json::Value) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "data": data,
        "requestId": current_request_id().unwrap_or_else(|| "unknown".to_string()),
    }))
}

/// POST /api/init
pub async fn init(
    State(state): State<AppState>,
    Json(body): Json<InitRequest>,
) -> AppResult<Response> {
    let idea = body.validate()?;
    let (project_id, step) = state.interview.init(&idea).await?;
    Ok((
        StatusCode::CREATED,
        envelope(json!({ "projectId": project_id, "step": step })),
    )
        .into_response())
}

/// POST /api/answer
pub async fn answer(
    State(state): State<AppState>,
    Json(body): Json<AnswerRequest>,
) -> AppResult<Response> {
    let (project_id, answer) = body.validate()?;
    let step = state.interview.answer(&project_id, &answer).await?;
    Ok(envelope(json!({ "step": step })).into_response())
}

/// POST /api/refine
pub async fn refine(
    State(state): State<AppState>,
    Json(body): Json<RefineRequest>,
) -> AppResult<Response> {
    let (project_id, comments) = body.validate()?;
    let step = state.interview.refine(&project_id, &comments).await?;
    Ok(envelope(json!({ "step": step })).into_response())
}

/// GET /api/project/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    validate_project_id(&id)?;
    let project = state.interview.get_project(&id)?;
    Ok(envelope(json!(project)).into_response())
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Response {
    let memory = memory_stats::memory_stats().map(|stats| {
        json!({
            "physicalMb": stats.physical_mem / (1024 * 1024),
            "virtualMb": stats.virtual_mem / (1024 * 1024),
        })
    });

    envelope(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "uptimeSecs": state.started_at.elapsed().as_secs(),
        "sessions": state.store.len(),
        "memory": memory,
    }))
    .into_response()
}

/// GET /
pub async fn root() -> Response {
    envelope(json!({
        "name": "BuildBrief API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "documentation": "/health",
    }))
    .into_response()
}

/// Fallback for unknown routes; same envelope shape as every other error.
pub async fn route_not_found(request: axum::extract::Request) -> Response {
    let path = request.uri().path().to_string();
    info!(path, "unknown route");
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": {
                "message": format!("Route {} not found", path),
                "code": "ROUTE_NOT_FOUND",
            },
            "timestamp": Utc::now().to_rfc3339(),
            "requestId": current_request_id().unwrap_or_else(|| "unknown".to_string()),
        })),
    )
        .into_response()
}
