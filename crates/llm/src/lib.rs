//! BuildBrief LLM
//!
//! Provides the provider trait the interview engine talks to and the
//! OpenRouter chat-completions implementation, plus the HTTP client factory.

pub mod http_client;
pub mod openrouter;
pub mod provider;
pub mod types;

// Re-export main types
pub use http_client::build_http_client;
pub use openrouter::OpenRouterProvider;
pub use provider::LlmProvider;
pub use types::*;
