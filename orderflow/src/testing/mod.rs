//! Testing utilities for orderflow pipelines.
//!
//! This module provides:
//! - Ready-made requests for the common approval and rejection paths
//! - Mock stages that record calls or always reject
//! - Assertions for outcomes

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{assert_approved_with, assert_rejected_by, assert_rejected_with, PRICE_TOLERANCE};
pub use fixtures::{
    blank_address_order, debit_card_order, out_of_stock_order, premium_card_order, scenarios,
    ExpectedOutcome, Scenario,
};
pub use mocks::{RecordingStage, RejectingStage};
