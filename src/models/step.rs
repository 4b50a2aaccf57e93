//! Interview Steps
//!
//! Typed representation of the LLM's structured reply. The model's raw JSON
//! is parsed and schema-checked here before anything downstream trusts it;
//! a reply that fails parsing or the template-specific checks is an
//! AI-service failure, never a crash in rendering logic.

use serde::{Deserialize, Serialize};

use crate::models::project::StateUpdate;
use crate::utils::error::{AppError, AppResult};

/// Step kind, the top-level discriminant of the LLM reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    Question,
    FinalOutput,
    Error,
}

/// The fixed set of client render templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiTemplate {
    FreeText,
    SingleChoice,
    MultiChoice,
    ExplanationOnly,
    ManualAction,
    Summary,
    FinalOutput,
    /// First-turn idea validation screen.
    IdeaAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A technical choice made without asking the user, logged for transparency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoDecision {
    pub decision: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualGuide {
    pub title: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplementationApproach {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caution {
    #[serde(rename = "type")]
    pub caution_type: String,
    pub message: String,
}

/// Template-dependent payload. All fields are optional at the wire level;
/// `Step::validate` enforces the per-template requirements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_decisions: Option<Vec<AutoDecision>>,

    // idea_analysis fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idea_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name_suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_approaches: Option<Vec<ImplementationApproach>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caution: Option<Caution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journey_preview: Option<Vec<String>>,

    // final_output fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features_list: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack_recommendation: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mega_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents_md: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_guides: Option<Vec<ManualGuide>>,
}

/// Progress indicator returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: u32,
    pub total: u32,
}

/// One fully validated interview step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub template: UiTemplate,
    pub content: StepContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_state_updates: Option<StateUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_educational: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
}

impl Step {
    /// Parse a raw LLM reply into a validated step.
    ///
    /// Markdown code fences are stripped first since models occasionally
    /// wrap JSON despite being told not to. Any parse or validation failure
    /// maps to AI_SERVICE_ERROR.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let cleaned = raw.replace("```json", "").replace("```", "");
        let step: Step = serde_json::from_str(cleaned.trim()).map_err(|e| AppError::AiService {
            message: format!("AI returned invalid JSON: {}", e),
            retryable: false,
        })?;
        step.validate()?;
        Ok(step)
    }

    /// Template-specific shape checks beyond what serde enforces.
    fn validate(&self) -> AppResult<()> {
        let fail = |message: &str| {
            Err(AppError::AiService {
                message: message.to_string(),
                retryable: false,
            })
        };

        match self.template {
            UiTemplate::FreeText | UiTemplate::SingleChoice | UiTemplate::MultiChoice => {
                if self
                    .content
                    .question_text
                    .as_deref()
                    .map_or(true, |q| q.trim().is_empty())
                {
                    return fail("AI step is missing question_text");
                }
            }
            _ => {}
        }

        match self.template {
            UiTemplate::SingleChoice | UiTemplate::MultiChoice => {
                if self
                    .content
                    .options
                    .as_ref()
                    .map_or(true, |opts| opts.is_empty())
                {
                    return fail("AI choice step has no options");
                }
            }
            UiTemplate::FinalOutput => {
                if self
                    .content
                    .mega_prompt
                    .as_deref()
                    .map_or(true, |p| p.trim().is_empty())
                {
                    return fail("AI final output is missing the mega-prompt");
                }
            }
            _ => {}
        }

        Ok(())
    }
}
