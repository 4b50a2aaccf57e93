//! Business logic: session storage, progress estimation, prompt assembly
//! and the interview orchestrator.

pub mod interview;
pub mod progress;
pub mod prompts;
pub mod session;

pub use interview::InterviewService;
pub use session::{InMemorySessionStore, SessionStore};
