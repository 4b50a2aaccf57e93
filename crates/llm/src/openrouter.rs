//! OpenRouter Provider
//!
//! Chat-completions client for the OpenRouter API. Requests JSON-object
//! output mode since the interview engine consumes structured replies only.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::http_client::build_http_client;
use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{LlmError, LlmResult, LlmResponse, Message, ProviderConfig};

/// OpenRouter chat-completions provider.
pub struct OpenRouterProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(config.timeout_secs);
        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_request_body(&self, messages: &[Message]) -> serde_json::Value {
        json!({
            "model": self.config.model,
            "messages": messages,
            "response_format": { "type": "json_object" },
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait::async_trait]
impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, messages: Vec<Message>) -> LlmResult<LlmResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("openrouter"))?;

        let body = self.build_request_body(&messages);

        let mut request = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .header("X-Title", "BuildBrief");

        if let Some(site_url) = &self.config.site_url {
            request = request.header("HTTP-Referer", site_url.clone());
        }

        let response = request.json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout {
                    seconds: self.config.timeout_secs,
                }
            } else {
                LlmError::NetworkError {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "openrouter"));
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| LlmError::ParseError {
                message: "Completion contained no message content".to_string(),
            })?
            .to_string();

        debug!(
            model = %self.config.model,
            content_len = content.len(),
            "openrouter completion received"
        );

        Ok(LlmResponse {
            content,
            model: completion.model,
        })
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
