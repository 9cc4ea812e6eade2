//! Event sink system for observability.
//!
//! Pipelines report their lifecycle (`pipeline.started`, `stage.forwarded`,
//! `stage.rejected`, then `pipeline.completed` or `pipeline.failed`) to an
//! [`EventSink`]. Sinks are observability only; nothing in the pipeline
//! depends on what they do.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

/// Emitted once when a run begins.
pub const PIPELINE_STARTED: &str = "pipeline.started";
/// Emitted when a stage forwards the request.
pub const STAGE_FORWARDED: &str = "stage.forwarded";
/// Emitted when a guard stage rejects the request.
pub const STAGE_REJECTED: &str = "stage.rejected";
/// Emitted once when a run produces its outcome.
pub const PIPELINE_COMPLETED: &str = "pipeline.completed";
/// Emitted once when a run ends in an error instead of an outcome.
pub const PIPELINE_FAILED: &str = "pipeline.failed";
