//! Shared fixtures for the integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};

use buildbrief_llm::{LlmProvider, LlmResponse, LlmResult, Message, ProviderConfig};
use buildbrief_server::api;
use buildbrief_server::config::Config;
use buildbrief_server::services::{InMemorySessionStore, InterviewService};
use buildbrief_server::state::AppState;

/// Provider replaying canned replies in order; panics when the script
/// runs out, which marks a test that made more model calls than expected.
pub struct CannedProvider {
    config: ProviderConfig,
    replies: Mutex<VecDeque<String>>,
}

impl CannedProvider {
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            config: ProviderConfig::default(),
            replies: Mutex::new(replies.into()),
        }
    }
}

#[async_trait]
impl LlmProvider for CannedProvider {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, _messages: Vec<Message>) -> LlmResult<LlmResponse> {
        let content = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no canned reply left");
        Ok(LlmResponse {
            content,
            model: Some(self.config.model.clone()),
        })
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// Build the full app with a canned provider behind it.
pub fn test_app(replies: Vec<String>) -> (Router, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    let provider = Arc::new(CannedProvider::new(replies));
    let interview = Arc::new(InterviewService::new(store.clone(), provider));
    let state = AppState::new(interview, store.clone(), Arc::new(Config::default()));
    (api::router(state), store)
}

pub fn post_json(path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub async fn response_json(response: Response<axum::body::Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A first-turn analysis reply in the shape the interview engine expects.
pub fn idea_analysis_reply() -> String {
    json!({
        "type": "question",
        "template": "idea_analysis",
        "is_educational": true,
        "content": {
            "idea_summary": "A recipe sharing app",
            "app_name_suggestion": "RecipeHub",
            "vision_statement": "Home cooks share what they love",
            "implementation_approaches": [
                { "title": "Web app", "description": "Browser-based, no install" }
            ],
            "caution": { "type": "competition", "message": "Crowded market" },
            "journey_preview": ["Sign up", "Post a recipe", "Get feedback"]
        },
        "project_state_updates": {
            "app_type": "web"
        }
    })
    .to_string()
}

pub fn question_reply() -> String {
    json!({
        "type": "question",
        "template": "single_choice",
        "content": {
            "question_text": "Who can post recipes?",
            "options": [
                { "value": "anyone", "label": "Anyone" },
                { "value": "verified", "label": "Verified cooks" }
            ]
        },
        "project_state_updates": {
            "resolved_decisions": { "user_roles": "admin,user" }
        }
    })
    .to_string()
}

pub fn final_output_reply() -> String {
    json!({
        "type": "final_output",
        "template": "final_output",
        "content": {
            "project_name": "RecipeHub",
            "app_tagline": "Share recipes with home cooks",
            "features_list": ["Browse recipes", "Save favorites"],
            "tech_stack_recommendation": ["Next.js", "PostgreSQL"],
            "mega_prompt": "## Overview\nA recipe sharing app."
        },
        "project_state_updates": { "is_complete": true }
    })
    .to_string()
}
