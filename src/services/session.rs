//! Session Store
//!
//! Owns the mapping from session id to `ProjectState`. The store is an
//! injectable trait so the in-memory default can be swapped for a persistent
//! backing store (and a TTL policy) without touching route logic.
//!
//! The in-memory store holds sessions for the process lifetime: no
//! eviction, no persistence across restarts. Both are intentional limits of
//! the minimal design and are visible to clients as NOT_FOUND after a
//! restart.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::models::project::{ProjectState, StateUpdate};
use crate::utils::error::{AppError, AppResult};

/// Create/read/update operations over interview sessions.
pub trait SessionStore: Send + Sync {
    /// Allocate a fresh session around the submitted idea and return its id.
    /// Ids are cryptographically random UUID v4; collisions are negligible.
    fn create_session(&self, initial_idea: &str) -> String;

    /// Pure lookup; `None` is a signal, not a fatal error.
    fn get_session(&self, id: &str) -> Option<ProjectState>;

    /// Shallow-merge the update into the stored state and return the result.
    /// Unknown ids fail with NOT_FOUND; the condition is not transient and
    /// is never retried.
    fn update_session(&self, id: &str, update: StateUpdate) -> AppResult<ProjectState>;
}

/// Default in-memory store.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, ProjectState>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions, for health reporting.
    pub fn len(&self) -> usize {
        self.sessions.read().expect("session lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn create_session(&self, initial_idea: &str) -> String {
        let id = Uuid::new_v4().to_string();
        let state = ProjectState::new(initial_idea);
        self.sessions
            .write()
            .expect("session lock poisoned")
            .insert(id.clone(), state);
        id
    }

    fn get_session(&self, id: &str) -> Option<ProjectState> {
        self.sessions
            .read()
            .expect("session lock poisoned")
            .get(id)
            .cloned()
    }

    fn update_session(&self, id: &str, update: StateUpdate) -> AppResult<ProjectState> {
        // Read-modify-write under the write lock; this is the critical
        // section guarding the shared session map.
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        let state = sessions
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("Session", Some(id)))?;
        state.apply_update(update);
        Ok(state.clone())
    }
}
