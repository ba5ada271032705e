//! Test doubles and fixtures.
//!
//! This module provides:
//! - [`ScriptedProvider`], a transport that replays queued replies and
//!   records every request
//! - Fixture builders for sessions and sample documents

mod fixtures;
mod mocks;

pub use fixtures::{sample_outline, sample_script_document, sample_sections, session_with};
pub use mocks::ScriptedProvider;
