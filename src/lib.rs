//! BuildBrief server library.
//!
//! An HTTP JSON API that turns a raw app idea into a production-ready
//! specification through a guided, LLM-driven interview. The library
//! exposes the router and services so integration tests can drive the
//! full stack in process.

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use config::Config;
pub use state::AppState;
