//! Sequential chain execution.
//!
//! Stages run strictly in order. The first stage that halts decides the
//! outcome and nothing after it runs.

use super::PipelineBuilder;
use crate::core::{Outcome, Request, StageDecision};
use crate::errors::OrderflowError;
use crate::events::{
    EventSink, NoOpEventSink, PIPELINE_COMPLETED, PIPELINE_FAILED, PIPELINE_STARTED,
    STAGE_FORWARDED, STAGE_REJECTED,
};
use crate::stages::Stage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// Record of a single pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Unique ID of this run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// The terminal outcome.
    pub outcome: Outcome,
    /// The request as the last stage saw it.
    pub request: Request,
    /// Names of the stages that ran, in order.
    pub visited: Vec<String>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: f64,
}

/// An immutable, reusable chain of stages.
///
/// Obtained from [`PipelineBuilder::build`]. A pipeline holds no per-run
/// state and can be shared across threads behind an `Arc`.
#[derive(Clone)]
pub struct Pipeline {
    name: String,
    stages: Vec<Arc<dyn Stage>>,
    event_sink: Arc<dyn EventSink>,
}

impl Pipeline {
    pub(super) fn from_parts(
        name: String,
        stages: Vec<Arc<dyn Stage>>,
        event_sink: Option<Arc<dyn EventSink>>,
    ) -> Self {
        Self {
            name,
            stages,
            event_sink: event_sink.unwrap_or_else(|| Arc::new(NoOpEventSink)),
        }
    }

    /// Returns a builder for a new pipeline.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder::new(name)
    }

    /// Returns the canonical five-stage pipeline.
    #[must_use]
    pub fn standard() -> Self {
        let (name, stages, event_sink) = PipelineBuilder::standard().into_parts();
        Self::from_parts(name, stages, event_sink)
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the pipeline has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Returns a copy of this pipeline reporting to `sink`.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = sink;
        self
    }

    /// Runs a request through the chain and returns only the outcome.
    pub fn evaluate(&self, request: Request) -> Result<Outcome, OrderflowError> {
        self.run(request).map(|run| run.outcome)
    }

    /// Runs a request through the chain.
    ///
    /// Rejections are returned as `Ok`. Errors mean the request broke a
    /// field contract or a stage broke the chain protocol; either way a
    /// `pipeline.failed` event closes the run.
    pub fn run(&self, request: Request) -> Result<PipelineRun, OrderflowError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();

        let span = info_span!("pipeline", pipeline = %self.name, run_id = %run_id);
        let _enter = span.enter();

        self.event_sink.try_emit(
            PIPELINE_STARTED,
            Some(serde_json::json!({
                "pipeline": &self.name,
                "run_id": run_id,
                "stages": self.stages.len(),
            })),
        );

        let result = self.drive(run_id, started_at, start, request);

        if let Err(err) = &result {
            warn!(error = %err, "Pipeline run failed");
            self.event_sink.try_emit(
                PIPELINE_FAILED,
                Some(serde_json::json!({
                    "pipeline": &self.name,
                    "run_id": run_id,
                    "error": err.to_string(),
                    "duration_ms": start.elapsed().as_secs_f64() * 1000.0,
                })),
            );
        }

        result
    }

    fn drive(
        &self,
        run_id: Uuid,
        started_at: DateTime<Utc>,
        start: Instant,
        mut request: Request,
    ) -> Result<PipelineRun, OrderflowError> {
        let mut visited = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            debug!(stage = stage.name(), kind = %stage.kind(), "Running stage");
            visited.push(stage.name().to_string());

            match stage.handle(&mut request)? {
                StageDecision::Forward if stage.kind().is_terminal() => {
                    return Err(OrderflowError::ChainExhausted {
                        pipeline: self.name.clone(),
                    });
                }
                StageDecision::Forward => {
                    self.event_sink.try_emit(
                        STAGE_FORWARDED,
                        Some(serde_json::json!({
                            "pipeline": &self.name,
                            "run_id": run_id,
                            "stage": stage.name(),
                        })),
                    );
                }
                StageDecision::Halt(Outcome::Approved { .. }) if !stage.kind().is_terminal() => {
                    return Err(OrderflowError::UnexpectedApproval {
                        stage: stage.name().to_string(),
                    });
                }
                StageDecision::Halt(Outcome::Rejected { .. }) if !stage.kind().may_reject() => {
                    return Err(OrderflowError::UnexpectedRejection {
                        stage: stage.name().to_string(),
                        kind: stage.kind(),
                    });
                }
                StageDecision::Halt(outcome) => {
                    if let Outcome::Rejected { reason, .. } = &outcome {
                        info!(stage = stage.name(), reason = %reason, "Request rejected");
                        self.event_sink.try_emit(
                            STAGE_REJECTED,
                            Some(serde_json::json!({
                                "pipeline": &self.name,
                                "run_id": run_id,
                                "stage": stage.name(),
                                "reason": reason,
                            })),
                        );
                    }

                    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
                    let status = if outcome.is_approved() { "approved" } else { "rejected" };
                    self.event_sink.try_emit(
                        PIPELINE_COMPLETED,
                        Some(serde_json::json!({
                            "pipeline": &self.name,
                            "run_id": run_id,
                            "status": status,
                            "final_price": outcome.final_price(),
                            "duration_ms": duration_ms,
                        })),
                    );

                    return Ok(PipelineRun {
                        run_id,
                        started_at,
                        outcome,
                        request,
                        visited,
                        duration_ms,
                    });
                }
            }
        }

        Err(OrderflowError::ChainExhausted {
            pipeline: self.name.clone(),
        })
    }
}

/// Returns the canonical five-stage pipeline with no event sink.
///
/// Shorthand for [`Pipeline::standard`].
#[must_use]
pub fn standard_pipeline() -> Pipeline {
    Pipeline::standard()
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("stages", &self.stage_names())
            .finish_non_exhaustive()
    }
}
