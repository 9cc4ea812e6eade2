//! Stage trait and implementations.
//!
//! Stages are the links of an orderflow chain. Each one looks at the
//! request, then either halts the chain with an [`Outcome`](crate::core::Outcome)
//! or forwards the request to its successor.

mod checks;
mod pricing;

pub use checks::{PaymentCheck, ShippingCheck, StockCheck};
pub use pricing::{ApprovalStage, DiscountStage, PREMIUM_DISCOUNT_MULTIPLIER};

use crate::core::{Request, StageDecision, StageKind};
use crate::errors::OrderflowError;
use std::fmt::Debug;

/// Trait for pipeline stages.
///
/// A stage holds no per-run state, so one instance can serve any number of
/// runs, including runs on different threads.
pub trait Stage: Send + Sync + Debug {
    /// Returns the name of the stage.
    fn name(&self) -> &str;

    /// Returns the role the stage plays in the chain.
    fn kind(&self) -> StageKind;

    /// Handles a request.
    ///
    /// # Returns
    ///
    /// `Forward` to pass the request on, `Halt` to end the chain, or an error
    /// when the request breaks a field contract.
    fn handle(&self, request: &mut Request) -> Result<StageDecision, OrderflowError>;
}

/// A simple function-based stage.
pub struct FnStage<F>
where
    F: Fn(&mut Request) -> Result<StageDecision, OrderflowError> + Send + Sync,
{
    name: String,
    kind: StageKind,
    func: F,
}

impl<F> FnStage<F>
where
    F: Fn(&mut Request) -> Result<StageDecision, OrderflowError> + Send + Sync,
{
    /// Creates a new function-based stage.
    pub fn new(name: impl Into<String>, kind: StageKind, func: F) -> Self {
        Self {
            name: name.into(),
            kind,
            func,
        }
    }
}

impl<F> Debug for FnStage<F>
where
    F: Fn(&mut Request) -> Result<StageDecision, OrderflowError> + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStage")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl<F> Stage for FnStage<F>
where
    F: Fn(&mut Request) -> Result<StageDecision, OrderflowError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StageKind {
        self.kind
    }

    fn handle(&self, request: &mut Request) -> Result<StageDecision, OrderflowError> {
        (self.func)(request)
    }
}
