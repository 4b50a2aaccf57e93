//! Shared application state handed to every request handler.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::services::{InMemorySessionStore, InterviewService};

#[derive(Clone)]
pub struct AppState {
    pub interview: Arc<InterviewService>,
    pub store: Arc<InMemorySessionStore>,
    pub config: Arc<Config>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        interview: Arc<InterviewService>,
        store: Arc<InMemorySessionStore>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            interview,
            store,
            config,
            started_at: Instant::now(),
        }
    }
}
