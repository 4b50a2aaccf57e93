//! Data models shared across the API and services.

pub mod project;
pub mod step;

pub use project::{HistoryEntry, ProjectState, StateUpdate};
pub use step::{Progress, Step, StepType, UiTemplate};
