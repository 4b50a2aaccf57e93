//! Rate Limit Integration Tests
//!
//! Quota enforcement observed over HTTP: headers, 429 envelope, key
//! isolation across client addresses.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

use super::helpers::{post_json, response_json, test_app};

fn init_from(ip: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/init")
        .header("content-type", "application/json")
        .header("x-forwarded-for", ip)
        // Too short on purpose: fails validation but still counts.
        .body(Body::from(json!({ "idea": "x" }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_ai_tier_blocks_eleventh_request() {
    let (app, _) = test_app(vec![]);

    for _ in 0..10 {
        let response = app.clone().oneshot(init_from("1.2.3.4")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().contains_key("x-ratelimit-remaining"));
    }

    let response = app.oneshot(init_from("1.2.3.4")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("retry-after"));
    assert_eq!(response.headers()["x-ratelimit-remaining"], "0");

    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], json!("RATE_LIMIT_EXCEEDED"));
    assert!(body["error"]["details"]["retryAfter"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn test_quota_headers_count_down() {
    let (app, _) = test_app(vec![]);

    let response = app.clone().oneshot(init_from("5.6.7.8")).await.unwrap();
    assert_eq!(response.headers()["x-ratelimit-limit"], "10");
    assert_eq!(response.headers()["x-ratelimit-remaining"], "9");

    let response = app.oneshot(init_from("5.6.7.8")).await.unwrap();
    assert_eq!(response.headers()["x-ratelimit-remaining"], "8");
}

#[tokio::test]
async fn test_clients_have_independent_quotas() {
    let (app, _) = test_app(vec![]);

    for _ in 0..10 {
        app.clone().oneshot(init_from("1.1.1.1")).await.unwrap();
    }
    let response = app.clone().oneshot(init_from("1.1.1.1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different client address is unaffected.
    let response = app.oneshot(init_from("2.2.2.2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forwarded_for_uses_first_hop() {
    let (app, _) = test_app(vec![]);

    let request = Request::builder()
        .method("POST")
        .uri("/api/init")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "9.9.9.9, 10.0.0.1")
        .body(Body::from(json!({ "idea": "x" }).to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap();

    // Same first hop, different proxy chain: shares the quota.
    let request = Request::builder()
        .method("POST")
        .uri("/api/init")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "9.9.9.9")
        .body(Body::from(json!({ "idea": "x" }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-ratelimit-remaining"], "8");
}

#[tokio::test]
async fn test_health_uses_lenient_tier() {
    let (app, _) = test_app(vec![]);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header("x-forwarded-for", "3.3.3.3")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-ratelimit-limit"], "120");
}

fn init_direct(addr: &str) -> Request<Body> {
    // No x-forwarded-for: keying must fall back to the peer address.
    let mut request = Request::builder()
        .method("POST")
        .uri("/api/init")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "idea": "x" }).to_string()))
        .unwrap();
    let addr: SocketAddr = addr.parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

#[tokio::test]
async fn test_direct_clients_have_independent_quotas() {
    let (app, _) = test_app(vec![]);

    for _ in 0..10 {
        let response = app
            .clone()
            .oneshot(init_direct("1.2.3.4:50000"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    let response = app
        .clone()
        .oneshot(init_direct("1.2.3.4:50001"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different peer address keeps its own bucket.
    let response = app.oneshot(init_direct("5.6.7.8:40000")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-ratelimit-remaining"], "9");
}

#[tokio::test]
async fn test_missing_forwarded_for_still_counts() {
    let (app, _) = test_app(vec![]);

    let response = app.oneshot(post_json("/api/init", json!({ "idea": "x" }))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-ratelimit-remaining"], "9");
}
