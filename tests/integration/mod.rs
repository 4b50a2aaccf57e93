//! Integration Tests Module
//!
//! Drives the full HTTP stack in process through `tower::ServiceExt::oneshot`
//! with a canned LLM provider. No network calls are made.

// Shared test fixtures (canned provider, app builder, request helpers)
mod helpers;

// HTTP API surface: envelopes, validation, session flow
mod api_test;

// Per-tier rate limiting over HTTP
mod rate_limit_test;
