//! Rate Limiting
//!
//! Fixed-window counters keyed by `client_ip:path`, held in memory. Three
//! tiers share one implementation: the AI tier guards the expensive model
//! endpoints, the standard tier guards reads, the lenient tier is for
//! high-frequency probes like health checks.
//!
//! Counting is atomic under one mutex per limiter, so concurrent requests
//! for the same key can never both observe `count < max` and both pass.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::utils::error::AppError;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Entry {
    count: u32,
    reset_at: Instant,
}

/// Outcome of a quota check.
pub enum Decision {
    Allowed {
        limit: u32,
        remaining: u32,
        reset_secs: u64,
    },
    Limited {
        limit: u32,
        retry_after: u64,
    },
}

pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Tier for model-backed endpoints.
    pub fn ai() -> Self {
        Self::new(10, Duration::from_secs(60))
    }

    /// Tier for ordinary reads.
    pub fn standard() -> Self {
        Self::new(60, Duration::from_secs(60))
    }

    /// Tier for health checks and other cheap probes.
    pub fn lenient() -> Self {
        Self::new(120, Duration::from_secs(60))
    }

    /// Count one request against the key and decide.
    pub fn check(&self, key: &str) -> Decision {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("rate limit lock poisoned");

        let entry = entries.entry(key.to_string()).or_insert_with(|| Entry {
            count: 0,
            reset_at: now + self.window,
        });
        if entry.reset_at <= now {
            entry.count = 0;
            entry.reset_at = now + self.window;
        }

        if entry.count >= self.max_requests {
            let retry_after = entry.reset_at.saturating_duration_since(now).as_secs().max(1);
            return Decision::Limited {
                limit: self.max_requests,
                retry_after,
            };
        }

        entry.count += 1;
        Decision::Allowed {
            limit: self.max_requests,
            remaining: self.max_requests - entry.count,
            reset_secs: entry.reset_at.saturating_duration_since(now).as_secs(),
        }
    }

    /// Drop expired windows so idle keys do not accumulate forever.
    pub fn sweep(&self) {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("rate limit lock poisoned");
        let before = entries.len();
        entries.retain(|_, entry| entry.reset_at > now);
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "swept expired rate limit windows");
        }
    }

    /// Periodic sweeper task; runs for the process lifetime.
    pub fn spawn_sweeper(self: &Arc<Self>) {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                limiter.sweep();
            }
        });
    }

    #[cfg(test)]
    fn live_keys(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

/// Axum middleware applying one limiter tier to a route group.
pub async fn limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let key = format!("{}:{}", client_ip(&request), request.uri().path());

    match limiter.check(&key) {
        Decision::Allowed {
            limit,
            remaining,
            reset_secs,
        } => {
            let mut response = next.run(request).await;
            set_quota_headers(&mut response, limit, remaining, reset_secs);
            response
        }
        Decision::Limited { limit, retry_after } => {
            let mut response = AppError::RateLimit { retry_after }.into_response();
            set_quota_headers(&mut response, limit, 0, retry_after);
            response
        }
    }
}

/// Client address for quota keying. Behind a proxy the first
/// `x-forwarded-for` hop is the real client; for direct connections the
/// peer address recorded at accept time is used instead, so unrelated
/// clients never share a bucket.
fn client_ip(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn set_quota_headers(response: &mut Response, limit: u32, remaining: u32, reset_secs: u64) {
    let headers = response.headers_mut();
    let put = |headers: &mut axum::http::HeaderMap, name: &'static str, value: String| {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(HeaderName::from_static(name), value);
        }
    };
    put(headers, "x-ratelimit-limit", limit.to_string());
    put(headers, "x-ratelimit-remaining", remaining.to_string());
    put(headers, "x-ratelimit-reset", reset_secs.to_string());
}
