//! Interview Service
//!
//! Orchestrates one interview turn: load session, build the prompt, call
//! the model, validate the reply, persist state changes. History entries
//! are appended by the server only; a model reply carrying its own
//! `history` field is stripped before the update is applied so the audit
//! trail cannot be rewritten from outside.

use std::sync::Arc;

use tracing::{debug, info};

use buildbrief_llm::{LlmProvider, Message};

use crate::models::project::{HistoryEntry, ProjectState, StateUpdate};
use crate::models::step::{Progress, Step, StepType};
use crate::services::progress::{progress_for, MAX_LIMIT};
use crate::services::prompts::build_system_prompt;
use crate::services::session::SessionStore;
use crate::utils::error::{AppError, AppResult};

/// Sentinel question for the server-recorded initial idea turn.
pub const INITIAL_IDEA: &str = "INITIAL_IDEA";
/// Sentinel question for a user answer to a model question.
pub const AI_QUESTION: &str = "AI_QUESTION";
/// Sentinel question for a refinement request against the final output.
pub const USER_REFINEMENT: &str = "USER_REFINEMENT";

/// Literal user message that instructs the model to regenerate the final
/// output with the refinement comments taken into account.
const REFINE_TRIGGER: &str = "GENERATE_REFINED_OUTPUT";

pub struct InterviewService {
    store: Arc<dyn SessionStore>,
    provider: Arc<dyn LlmProvider>,
}

impl InterviewService {
    pub fn new(store: Arc<dyn SessionStore>, provider: Arc<dyn LlmProvider>) -> Self {
        Self { store, provider }
    }

    /// Start a new interview from a raw idea.
    ///
    /// Returns the new session id and the first step. Progress on the first
    /// step is always `1 / MAX_LIMIT`: no decisions exist yet, so the
    /// dynamic limit would be meaningless this early.
    pub async fn init(&self, idea: &str) -> AppResult<(String, Step)> {
        let project_id = self.store.create_session(idea);
        info!(project_id = %project_id, "interview started");

        let state = self
            .store
            .get_session(&project_id)
            .ok_or_else(|| AppError::not_found("Project", Some(&project_id)))?;

        let first_answer = format!("My idea is: {}", idea);
        let mut step = self.run_prompted(&state, &first_answer).await?;

        self.persist(&project_id, &mut step, HistoryEntry::new(INITIAL_IDEA, idea))?;
        step.progress = Some(Progress {
            current: 1,
            total: MAX_LIMIT,
        });

        Ok((project_id, step))
    }

    /// Process a user answer and produce the next step.
    pub async fn answer(&self, project_id: &str, answer: &str) -> AppResult<Step> {
        let state = self
            .store
            .get_session(project_id)
            .ok_or_else(|| AppError::not_found("Project", Some(project_id)))?;

        let progress = progress_for(&state);
        let mut step = self.run_prompted(&state, answer).await?;

        self.persist(project_id, &mut step, HistoryEntry::new(AI_QUESTION, answer))?;
        step.progress = Some(progress);

        debug!(
            project_id = %project_id,
            current = progress.current,
            total = progress.total,
            "answer processed"
        );

        Ok(step)
    }

    /// Regenerate the final output with the user's refinement comments.
    ///
    /// The refinement entry is added to the state the model sees so the
    /// comments land in the session context, then the model is asked to
    /// produce the refined output via a fixed trigger message.
    pub async fn refine(&self, project_id: &str, comments: &str) -> AppResult<Step> {
        let state = self
            .store
            .get_session(project_id)
            .ok_or_else(|| AppError::not_found("Project", Some(project_id)))?;

        let mut prompt_state = state.clone();
        prompt_state
            .history
            .push(HistoryEntry::new(USER_REFINEMENT, comments));

        let progress = progress_for(&state);
        let mut step = self.run_prompted(&prompt_state, REFINE_TRIGGER).await?;

        self.persist(
            project_id,
            &mut step,
            HistoryEntry::new(USER_REFINEMENT, comments),
        )?;
        step.progress = Some(progress);

        info!(project_id = %project_id, "final output refined");

        Ok(step)
    }

    /// Full current state of a session.
    pub fn get_project(&self, project_id: &str) -> AppResult<ProjectState> {
        self.store
            .get_session(project_id)
            .ok_or_else(|| AppError::not_found("Project", Some(project_id)))
    }

    /// One model round trip: prompt, completion, parse, error-step check.
    async fn run_prompted(&self, state: &ProjectState, last_answer: &str) -> AppResult<Step> {
        let system_prompt = build_system_prompt(state, last_answer);
        let messages = vec![
            Message::system(system_prompt),
            Message::user(last_answer.to_string()),
        ];

        debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            "requesting completion"
        );

        let response = self.provider.complete(messages).await?;
        let step = Step::parse(&response.content)?;

        // A well-formed error step is still an upstream failure.
        if step.step_type == StepType::Error {
            let message = step
                .content
                .explanation
                .clone()
                .unwrap_or_else(|| "AI reported an internal error".to_string());
            return Err(AppError::AiService {
                message,
                retryable: false,
            });
        }

        Ok(step)
    }

    /// Apply the step's state updates (history stripped) and append the
    /// server-owned history entry, in that order, as one stored update each.
    fn persist(&self, project_id: &str, step: &mut Step, entry: HistoryEntry) -> AppResult<()> {
        if let Some(mut update) = step.project_state_updates.take() {
            update.history = None;
            self.store.update_session(project_id, update)?;
            // The client gets the applied updates echoed back minus history.
        }

        let current = self
            .store
            .get_session(project_id)
            .ok_or_else(|| AppError::not_found("Project", Some(project_id)))?;
        let updated = self
            .store
            .update_session(project_id, StateUpdate::history_append(&current.history, entry))?;

        step.project_state_updates = Some(StateUpdate {
            history: Some(updated.history),
            ..Default::default()
        });

        Ok(())
    }
}
