//! Pipeline building and execution.
//!
//! This module provides:
//! - A builder that checks chain shape before anything runs
//! - The immutable, reusable pipeline and its run record

mod builder;
mod chain;

pub use builder::{PipelineBuilder, STANDARD_PIPELINE_NAME};
pub use chain::{standard_pipeline, Pipeline, PipelineRun};
