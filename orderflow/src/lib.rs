//! # Orderflow
//!
//! A sequential validation and approval pipeline for purchase requests.
//!
//! A request passes through an ordered chain of stages. Each stage either
//! rejects it, which ends the run, or forwards it to the next stage. The last
//! stage approves the request and reports the final price.
//!
//! The standard chain is:
//!
//! 1. **Stock check**: the product must be in stock
//! 2. **Payment check**: `credit_card`, `paypal` or `bank_transfer`
//! 3. **Shipping check**: a non-blank shipping address
//! 4. **Discount**: premium customers get 10% off
//! 5. **Approval**: approves at the current price
//!
//! ## Quick Start
//!
//! ```rust
//! use orderflow::prelude::*;
//!
//! let pipeline = Pipeline::standard();
//!
//! let request = Request::new()
//!     .in_stock(true)
//!     .payment_method("credit_card")
//!     .shipping_address("123 Main St")
//!     .premium(true)
//!     .total_price(100.0);
//!
//! let outcome = pipeline.evaluate(request)?;
//! assert_eq!(outcome.to_string(), "Request approved. Final price: $90.00");
//! # Ok::<(), orderflow::errors::OrderflowError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod core;
pub mod errors;
pub mod events;
pub mod pipeline;
pub mod stages;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{Outcome, PaymentMethod, RejectionReason, Request, StageDecision, StageKind};
    pub use crate::errors::{
        ContractErrorInfo, ContractViolation, OrderflowError, PipelineValidationError,
    };
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::pipeline::{standard_pipeline, Pipeline, PipelineBuilder, PipelineRun};
    pub use crate::stages::{
        ApprovalStage, DiscountStage, FnStage, PaymentCheck, ShippingCheck, Stage, StockCheck,
    };
}
