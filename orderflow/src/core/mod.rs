//! Core domain model types for orderflow.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - The purchase request carried through the chain
//! - Rejection reasons and terminal outcomes
//! - Stage kinds

mod outcome;
mod request;
mod status;

pub use outcome::{Outcome, RejectionReason, StageDecision};
pub use request::{PaymentMethod, Request};
pub use status::StageKind;
