//! Mock stages for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::{Outcome, RejectionReason, Request, StageDecision, StageKind};
use crate::errors::OrderflowError;
use crate::stages::Stage;

/// A stage that counts its calls and forwards unchanged.
///
/// With [`StageKind::Terminal`] it approves at the current price instead, so
/// it can close a chain in tests.
#[derive(Debug)]
pub struct RecordingStage {
    name: String,
    kind: StageKind,
    call_count: AtomicUsize,
}

impl RecordingStage {
    /// Creates a new recording stage.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: StageKind) -> Self {
        Self {
            name: name.into(),
            kind,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Returns the number of times the stage was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Stage for RecordingStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StageKind {
        self.kind
    }

    fn handle(&self, request: &mut Request) -> Result<StageDecision, OrderflowError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.kind.is_terminal() {
            let price = request.require_total_price(&self.name)?;
            return Ok(StageDecision::Halt(Outcome::approved(price)));
        }
        Ok(StageDecision::Forward)
    }
}

/// A guard stage that rejects every request.
#[derive(Debug, Clone)]
pub struct RejectingStage {
    name: String,
    reason: RejectionReason,
}

impl RejectingStage {
    /// Creates a new rejecting stage.
    #[must_use]
    pub fn new(name: impl Into<String>, reason: RejectionReason) -> Self {
        Self {
            name: name.into(),
            reason,
        }
    }
}

impl Stage for RejectingStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StageKind {
        StageKind::Guard
    }

    fn handle(&self, _request: &mut Request) -> Result<StageDecision, OrderflowError> {
        Ok(StageDecision::reject(&self.name, self.reason.clone()))
    }
}
