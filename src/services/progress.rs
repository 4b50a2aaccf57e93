//! Progress / Limit Estimator
//!
//! Pure functions over `ProjectState` computing the advisory question limit
//! and the progress indicator. The limit is a soft quota: enforcement is
//! delegated to the prompt instructions, nothing here stops an interview.

use crate::models::project::ProjectState;
use crate::models::step::Progress;

/// Baseline question limit for a simple idea.
pub const BASE_LIMIT: u32 = 5;
/// Hard ceiling on the advisory limit.
pub const MAX_LIMIT: u32 = 10;

/// Decision keys that count as critical for the early-exit heuristic.
pub const CRITICAL_DECISIONS: [&str; 4] =
    ["user_roles", "core_workflow", "data_model", "auth_method"];

/// Recommended maximum number of interview turns for this session.
///
/// 5 baseline, +1 for a long idea (>100 chars), +2 for multiple user roles
/// (comma in `user_roles`), +2 for any integrations, clamped to 10. The
/// formula is part of the client contract and must stay exact.
pub fn dynamic_limit(state: &ProjectState) -> u32 {
    let mut limit = BASE_LIMIT;

    // Character count, matching how validation measures the idea.
    let idea_len = state
        .idea_summary
        .as_deref()
        .unwrap_or("")
        .chars()
        .count();
    if idea_len > 100 {
        limit += 1;
    }

    let has_multiple_roles = state
        .resolved_decisions
        .get("user_roles")
        .and_then(|v| v.as_str())
        .map_or(false, |roles| roles.contains(','));
    if has_multiple_roles {
        limit += 2;
    }

    let has_integrations = state
        .resolved_decisions
        .get("integrations")
        .and_then(|v| v.as_array())
        .map_or(false, |arr| !arr.is_empty());
    if has_integrations {
        limit += 2;
    }

    limit.min(MAX_LIMIT)
}

/// Progress for the turn about to be produced: `history.len() + 1` out of
/// the dynamic limit.
pub fn progress_for(state: &ProjectState) -> Progress {
    Progress {
        current: state.history.len() as u32 + 1,
        total: dynamic_limit(state),
    }
}

/// How many critical decisions have been resolved so far.
pub fn critical_resolved(state: &ProjectState) -> usize {
    CRITICAL_DECISIONS
        .iter()
        .filter(|key| state.resolved_decisions.contains_key(**key))
        .count()
}
