//! HTTP Client Factory
//!
//! Builds reqwest clients with the outbound timeout applied. Every LLM call
//! goes through a client constructed here so no request can hang past the
//! configured deadline.

use std::time::Duration;

/// Build a `reqwest::Client` with the given request timeout in seconds.
pub fn build_http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .expect("failed to build reqwest client")
}
