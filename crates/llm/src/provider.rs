//! LLM Provider Trait
//!
//! Defines the common interface the interview engine uses to talk to a
//! completion backend. The server depends only on this trait so tests can
//! substitute a scripted provider.

use async_trait::async_trait;

use super::types::{LlmError, LlmResult, LlmResponse, Message, ProviderConfig};

/// Trait all completion backends implement.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for identification and logging.
    fn name(&self) -> &'static str;

    /// The model currently in use.
    fn model(&self) -> &str;

    /// Send a conversation and get a complete response.
    ///
    /// No retry logic lives here or anywhere above; a failed call surfaces
    /// to the end user, who resubmits manually.
    async fn complete(&self, messages: Vec<Message>) -> LlmResult<LlmResponse>;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;
}

/// Helper to create an error for a missing API key.
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Map a non-2xx HTTP status to the matching provider error.
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
            retry_after: None,
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
