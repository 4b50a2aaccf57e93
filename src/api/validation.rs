//! Request Validation
//!
//! Typed request bodies with trim-then-check length rules and UUID checks.
//! Validation failures collect every violated rule so the client can fix
//! all of them in one round trip.

use serde::Deserialize;
use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

pub const IDEA_MIN: usize = 5;
pub const IDEA_MAX: usize = 2000;
pub const ANSWER_MIN: usize = 1;
pub const ANSWER_MAX: usize = 5000;
pub const COMMENTS_MIN: usize = 5;
pub const COMMENTS_MAX: usize = 3000;

#[derive(Debug, Deserialize)]
pub struct InitRequest {
    pub idea: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub project_id: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    pub project_id: String,
    pub comments: String,
}

impl InitRequest {
    /// Returns the trimmed idea.
    pub fn validate(&self) -> AppResult<String> {
        let mut issues = Vec::new();
        let idea = check_length(&self.idea, "idea", IDEA_MIN, IDEA_MAX, &mut issues);
        finish(issues)?;
        Ok(idea)
    }
}

impl AnswerRequest {
    /// Returns the validated (project_id, trimmed answer).
    pub fn validate(&self) -> AppResult<(String, String)> {
        let mut issues = Vec::new();
        check_uuid(&self.project_id, "projectId", &mut issues);
        let answer = check_length(&self.answer, "answer", ANSWER_MIN, ANSWER_MAX, &mut issues);
        finish(issues)?;
        Ok((self.project_id.clone(), answer))
    }
}

impl RefineRequest {
    /// Returns the validated (project_id, trimmed comments).
    pub fn validate(&self) -> AppResult<(String, String)> {
        let mut issues = Vec::new();
        check_uuid(&self.project_id, "projectId", &mut issues);
        let comments = check_length(
            &self.comments,
            "comments",
            COMMENTS_MIN,
            COMMENTS_MAX,
            &mut issues,
        );
        finish(issues)?;
        Ok((self.project_id.clone(), comments))
    }
}

/// Validate a path-supplied project id.
pub fn validate_project_id(id: &str) -> AppResult<()> {
    let mut issues = Vec::new();
    check_uuid(id, "id", &mut issues);
    finish(issues)
}

fn check_length(value: &str, field: &str, min: usize, max: usize, issues: &mut Vec<String>) -> String {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min {
        issues.push(format!("{} must be at least {} characters", field, min));
    } else if len > max {
        issues.push(format!("{} must be at most {} characters", field, max));
    }
    trimmed.to_string()
}

fn check_uuid(value: &str, field: &str, issues: &mut Vec<String>) {
    if Uuid::parse_str(value).is_err() {
        issues.push(format!("{} must be a valid UUID", field));
    }
}

fn finish(issues: Vec<String>) -> AppResult<()> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation("Invalid request", issues))
    }
}
