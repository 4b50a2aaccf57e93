//! Shared types for LLM providers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by LLM providers.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Server error ({status:?}): {message}")]
    ServerError {
        message: String,
        status: Option<u16>,
    },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("{message}")]
    Other { message: String },
}

impl LlmError {
    /// Whether the failure is transient from the caller's perspective.
    /// The server never retries automatically either way; this only feeds
    /// the `retryable` detail surfaced to clients.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::ServerError { .. }
                | Self::NetworkError { .. }
                | Self::Timeout { .. }
        )
    }
}

/// Result type alias for provider operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Configuration for an LLM provider instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key; providers fail with AuthenticationFailed when absent.
    pub api_key: Option<String>,
    /// Model identifier, e.g. "xiaomi/mimo-v2-flash".
    pub model: String,
    /// Base URL of the API, without the trailing endpoint path.
    pub base_url: String,
    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,
    /// Referer URL sent as attribution (OpenRouter convention).
    pub site_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "xiaomi/mimo-v2-flash".to_string(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            timeout_secs: 60,
            site_url: None,
        }
    }
}

/// A complete (non-streaming) response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// The raw text content of the first choice.
    pub content: String,
    /// Model that produced the response, when reported.
    pub model: Option<String>,
}
