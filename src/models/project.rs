//! Project State
//!
//! The per-session interview state and the partial update applied to it.
//! Update semantics are a documented contract: a shallow merge where every
//! present top-level field replaces the stored field wholesale, except
//! `resolved_decisions`, which merges by key so decisions are never lost
//! once made.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One question/answer exchange. The `question` field uses sentinel values
/// `INITIAL_IDEA`, `AI_QUESTION` and `USER_REFINEMENT` for turns the server
/// records on the user's behalf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
}

impl HistoryEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Full interview state for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectState {
    /// Raw user-submitted idea; set once at creation, never mutated.
    pub idea_summary: Option<String>,
    pub target_user: Option<String>,
    pub problem_statement: Option<String>,
    pub app_type: Option<String>,
    /// Architectural decisions keyed by name; keys accumulate, later writes
    /// for the same key overwrite.
    pub resolved_decisions: BTreeMap<String, serde_json::Value>,
    /// Pending decisions; wholesale-replaced by each update.
    pub unresolved_decisions: Vec<String>,
    /// External setup steps accumulated across turns.
    pub manual_prerequisites: Vec<String>,
    /// Inferred facts not explicitly confirmed by the user.
    pub assumptions: Vec<String>,
    /// Append-only audit trail; insertion order determines turn count.
    pub history: Vec<HistoryEntry>,
    pub is_complete: bool,
}

impl ProjectState {
    /// Fresh state for a newly created session.
    pub fn new(initial_idea: impl Into<String>) -> Self {
        Self {
            idea_summary: Some(initial_idea.into()),
            target_user: None,
            problem_statement: None,
            app_type: None,
            resolved_decisions: BTreeMap::new(),
            unresolved_decisions: Vec::new(),
            manual_prerequisites: Vec::new(),
            assumptions: Vec::new(),
            history: Vec::new(),
            is_complete: false,
        }
    }

    /// Apply a partial update.
    ///
    /// Arrays and scalars replace wholesale (no implicit concatenation:
    /// callers read-modify-write `history` themselves). `resolved_decisions`
    /// entries are merged by key. `idea_summary` is not updatable.
    pub fn apply_update(&mut self, update: StateUpdate) {
        if let Some(target_user) = update.target_user {
            self.target_user = Some(target_user);
        }
        if let Some(problem_statement) = update.problem_statement {
            self.problem_statement = Some(problem_statement);
        }
        if let Some(app_type) = update.app_type {
            self.app_type = Some(app_type);
        }
        if let Some(decisions) = update.resolved_decisions {
            for (key, value) in decisions {
                self.resolved_decisions.insert(key, value);
            }
        }
        if let Some(unresolved) = update.unresolved_decisions {
            self.unresolved_decisions = unresolved;
        }
        if let Some(prereqs) = update.manual_prerequisites {
            self.manual_prerequisites = prereqs;
        }
        if let Some(assumptions) = update.assumptions {
            self.assumptions = assumptions;
        }
        if let Some(history) = update.history {
            self.history = history;
        }
        if let Some(is_complete) = update.is_complete {
            self.is_complete = is_complete;
        }
    }
}

/// Partial update to a `ProjectState`; every present field replaces the
/// stored one. Produced by the server itself (history appends) and by the
/// LLM's `project_state_updates` (history stripped before applying).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_decisions: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unresolved_decisions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_prerequisites: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
}

impl StateUpdate {
    /// Update that appends one entry to the given history.
    pub fn history_append(current: &[HistoryEntry], entry: HistoryEntry) -> Self {
        let mut history = current.to_vec();
        history.push(entry);
        Self {
            history: Some(history),
            ..Default::default()
        }
    }
}
