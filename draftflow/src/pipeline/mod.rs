//! Pipeline orchestration.
//!
//! This module provides:
//! - [`ScriptPipeline`] and [`BlogPipeline`], the two workflow state machines
//! - Sub-stage progress for drafting bursts
//! - Continue-on-failure reporting for draft stages
//!
//! Every operation takes `&mut self`, so a pipeline has at most one
//! operation in flight. Remote calls are awaited one after another.

mod blog;
mod editing;
mod failure;
mod runner;
mod script;
mod state;

#[cfg(test)]
mod integration_tests;

pub use blog::BlogPipeline;
pub use editing::MoveDirection;
pub use failure::{DraftReport, FailureCollector, FailureRecord};
pub use script::ScriptPipeline;
pub use state::{DraftProgress, SubStageStatus, WorkflowState};
