//! Pipeline builder with validation.

use super::Pipeline;
use crate::errors::{ContractErrorInfo, PipelineValidationError};
use crate::events::EventSink;
use crate::stages::{
    ApprovalStage, DiscountStage, PaymentCheck, ShippingCheck, Stage, StockCheck,
};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Name given to the canonical pipeline.
pub const STANDARD_PIPELINE_NAME: &str = "order_approval";

/// Builder for creating validated pipelines.
///
/// Stages run in the order they are added. The chain is only checked when
/// [`build`](Self::build) is called.
#[derive(Clone)]
pub struct PipelineBuilder {
    /// The pipeline name.
    name: String,
    /// Stages in execution order.
    stages: Vec<Arc<dyn Stage>>,
    /// Optional event sink for the built pipeline.
    event_sink: Option<Arc<dyn EventSink>>,
}

impl PipelineBuilder {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
            event_sink: None,
        }
    }

    /// Creates a builder preloaded with the canonical chain: stock, payment,
    /// shipping, discount, approval.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(STANDARD_PIPELINE_NAME)
            .stage(StockCheck::new())
            .stage(PaymentCheck::new())
            .stage(ShippingCheck::new())
            .stage(DiscountStage::new())
            .stage(ApprovalStage::new())
    }

    /// Appends a stage to the chain.
    #[must_use]
    pub fn stage(self, stage: impl Stage + 'static) -> Self {
        self.shared_stage(Arc::new(stage))
    }

    /// Appends an already shared stage to the chain.
    #[must_use]
    pub fn shared_stage(mut self, stage: Arc<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Sets the event sink of the built pipeline.
    #[must_use]
    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Builds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the chain is empty, has duplicate stage names,
    /// does not end with a terminal stage, or has a terminal stage anywhere
    /// but the end.
    pub fn build(self) -> Result<Pipeline, PipelineValidationError> {
        self.validate()?;
        let (name, stages, event_sink) = self.into_parts();
        Ok(Pipeline::from_parts(name, stages, event_sink))
    }

    pub(super) fn into_parts(self) -> (String, Vec<Arc<dyn Stage>>, Option<Arc<dyn EventSink>>) {
        (self.name, self.stages, self.event_sink)
    }

    fn validate(&self) -> Result<(), PipelineValidationError> {
        let Some(last) = self.stages.last() else {
            return Err(PipelineValidationError::new(format!(
                "Pipeline '{}' has no stages",
                self.name
            ))
            .with_error_info(
                ContractErrorInfo::new("CHAIN-001-EMPTY", "Cannot build an empty pipeline")
                    .with_suggested_fix(),
            ));
        };

        let mut seen = HashSet::new();
        for stage in &self.stages {
            if !seen.insert(stage.name()) {
                return Err(PipelineValidationError::new(format!(
                    "Stage '{}' appears more than once in pipeline '{}'",
                    stage.name(),
                    self.name
                ))
                .with_stages(vec![stage.name().to_string()])
                .with_error_info(
                    ContractErrorInfo::new(
                        "CHAIN-004-DUPLICATE",
                        format!("Duplicate stage name '{}'", stage.name()),
                    )
                    .with_suggested_fix(),
                ));
            }
        }

        let body = &self.stages[..self.stages.len() - 1];
        if let Some(early) = body.iter().find(|stage| stage.kind().is_terminal()) {
            let unreachable: Vec<String> = self
                .stages
                .iter()
                .skip_while(|stage| stage.name() != early.name())
                .skip(1)
                .map(|stage| stage.name().to_string())
                .collect();
            return Err(PipelineValidationError::new(format!(
                "Terminal stage '{}' is followed by {} unreachable stage(s)",
                early.name(),
                unreachable.len()
            ))
            .with_stages(
                std::iter::once(early.name().to_string())
                    .chain(unreachable)
                    .collect(),
            )
            .with_error_info(
                ContractErrorInfo::new(
                    "CHAIN-003-TERMINAL_NOT_LAST",
                    format!("Terminal stage '{}' is not last", early.name()),
                )
                .with_suggested_fix(),
            ));
        }

        if !last.kind().is_terminal() {
            return Err(PipelineValidationError::new(format!(
                "Pipeline '{}' ends with {} stage '{}' instead of a terminal stage",
                self.name,
                last.kind(),
                last.name()
            ))
            .with_stages(vec![last.name().to_string()])
            .with_error_info(
                ContractErrorInfo::new(
                    "CHAIN-002-NO_TERMINAL",
                    format!("Stage '{}' has no successor", last.name()),
                )
                .with_suggested_fix(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("name", &self.name)
            .field("stages", &self.stages)
            .field("has_event_sink", &self.event_sink.is_some())
            .finish()
    }
}
