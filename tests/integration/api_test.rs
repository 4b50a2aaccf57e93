//! HTTP API Integration Tests
//!
//! End-to-end flows over the in-process router: envelopes, validation,
//! session lifecycle and error rendering.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use buildbrief_server::services::SessionStore;

use super::helpers::{
    final_output_reply, get, idea_analysis_reply, post_json, question_reply, response_json,
    test_app,
};

#[tokio::test]
async fn test_init_returns_created_with_envelope() {
    let (app, store) = test_app(vec![idea_analysis_reply()]);

    let response = app
        .oneshot(post_json("/api/init", json!({ "idea": "A recipe sharing app" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.headers()["x-content-type-options"],
        "nosniff"
    );

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["requestId"].is_string());

    let project_id = body["data"]["projectId"].as_str().unwrap();
    assert!(Uuid::parse_str(project_id).is_ok());
    assert_eq!(body["data"]["step"]["template"], json!("idea_analysis"));
    assert_eq!(body["data"]["step"]["progress"], json!({ "current": 1, "total": 10 }));

    let state = store.get_session(project_id).unwrap();
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0].question, "INITIAL_IDEA");
}

#[tokio::test]
async fn test_init_rejects_short_idea() {
    let (app, _) = test_app(vec![]);

    let response = app
        .oneshot(post_json("/api/init", json!({ "idea": "app" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    assert!(body["error"]["details"]["issues"][0]
        .as_str()
        .unwrap()
        .contains("at least 5"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_answer_advances_the_interview() {
    let (app, _) = test_app(vec![idea_analysis_reply(), question_reply()]);

    let response = app
        .clone()
        .oneshot(post_json("/api/init", json!({ "idea": "A recipe sharing app" })))
        .await
        .unwrap();
    let body = response_json(response).await;
    let project_id = body["data"]["projectId"].as_str().unwrap().to_string();

    let response = app
        .oneshot(post_json(
            "/api/answer",
            json!({ "projectId": project_id, "answer": "Anyone can post" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["step"]["template"], json!("single_choice"));
    assert_eq!(body["data"]["step"]["progress"]["current"], json!(2));
}

#[tokio::test]
async fn test_answer_unknown_project_is_404() {
    let (app, _) = test_app(vec![]);

    let response = app
        .oneshot(post_json(
            "/api/answer",
            json!({
                "projectId": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                "answer": "hello"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn test_answer_with_malformed_id_is_400() {
    let (app, _) = test_app(vec![]);

    let response = app
        .oneshot(post_json(
            "/api/answer",
            json!({ "projectId": "not-a-uuid", "answer": "hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_refine_marks_project_complete() {
    let (app, store) = test_app(vec![idea_analysis_reply(), final_output_reply()]);

    let response = app
        .clone()
        .oneshot(post_json("/api/init", json!({ "idea": "A recipe sharing app" })))
        .await
        .unwrap();
    let body = response_json(response).await;
    let project_id = body["data"]["projectId"].as_str().unwrap().to_string();

    let response = app
        .oneshot(post_json(
            "/api/refine",
            json!({ "projectId": project_id, "comments": "Make the tone playful" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["step"]["type"], json!("final_output"));

    let state = store.get_session(&project_id).unwrap();
    assert!(state.is_complete);
    assert_eq!(state.history.last().unwrap().question, "USER_REFINEMENT");
}

#[tokio::test]
async fn test_get_project_returns_full_state() {
    let (app, _) = test_app(vec![idea_analysis_reply()]);

    let response = app
        .clone()
        .oneshot(post_json("/api/init", json!({ "idea": "A recipe sharing app" })))
        .await
        .unwrap();
    let body = response_json(response).await;
    let project_id = body["data"]["projectId"].as_str().unwrap().to_string();

    let response = app
        .oneshot(get(&format!("/api/project/{}", project_id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["idea_summary"], json!("A recipe sharing app"));
    assert_eq!(body["data"]["app_type"], json!("web"));
    assert_eq!(body["data"]["history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_ai_failure_surfaces_as_bad_gateway() {
    let error_reply = json!({
        "type": "error",
        "template": "explanation_only",
        "content": { "explanation": "Model overloaded" }
    })
    .to_string();
    let (app, _) = test_app(vec![error_reply]);

    let response = app
        .oneshot(post_json("/api/init", json!({ "idea": "A recipe sharing app" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], json!("AI_SERVICE_ERROR"));
    assert_eq!(body["error"]["details"]["retryable"], json!(false));
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let (app, _) = test_app(vec![]);

    let response = app.oneshot(get("/api/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], json!("ROUTE_NOT_FOUND"));
    assert!(body["requestId"].is_string());
}

#[tokio::test]
async fn test_health_reports_status_and_sessions() {
    let (app, _) = test_app(vec![idea_analysis_reply()]);

    app.clone()
        .oneshot(post_json("/api/init", json!({ "idea": "A recipe sharing app" })))
        .await
        .unwrap();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["data"]["status"], json!("ok"));
    assert_eq!(body["data"]["sessions"], json!(1));
    assert!(body["data"]["version"].is_string());
}

#[tokio::test]
async fn test_inbound_request_id_is_echoed() {
    let (app, _) = test_app(vec![]);

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/health")
        .header("x-request-id", "client-supplied-id")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "client-supplied-id");

    let body = response_json(response).await;
    assert_eq!(body["requestId"], json!("client-supplied-id"));
}
