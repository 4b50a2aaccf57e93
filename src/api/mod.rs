//! HTTP surface: router assembly, middleware, validation and rate limiting.

pub mod handlers;
pub mod middleware;
pub mod rate_limit;
pub mod validation;

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;
use rate_limit::RateLimiter;

/// Build the application router with all middleware attached.
///
/// Rate limit tiers are per-route-group: the AI tier guards endpoints that
/// trigger a model call, the standard tier guards session reads, the
/// lenient tier covers health and the root banner.
pub fn router(state: AppState) -> Router {
    let ai = Arc::new(RateLimiter::ai());
    let standard = Arc::new(RateLimiter::standard());
    let lenient = Arc::new(RateLimiter::lenient());
    for limiter in [&ai, &standard, &lenient] {
        limiter.spawn_sweeper();
    }

    let ai_routes = Router::new()
        .route("/api/init", post(handlers::init))
        .route("/api/answer", post(handlers::answer))
        .route("/api/refine", post(handlers::refine))
        .layer(axum::middleware::from_fn_with_state(ai, rate_limit::limit));

    let read_routes = Router::new()
        .route("/api/project/:id", get(handlers::get_project))
        .layer(axum::middleware::from_fn_with_state(
            standard,
            rate_limit::limit,
        ));

    let probe_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .layer(axum::middleware::from_fn_with_state(
            lenient,
            rate_limit::limit,
        ));

    Router::new()
        .merge(ai_routes)
        .merge(read_routes)
        .merge(probe_routes)
        .fallback(handlers::route_not_found)
        .layer(cors_layer(&state.config.allowed_origins))
        .layer(axum::middleware::from_fn(middleware::request_logger))
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
        .allow_credentials(true)
}
