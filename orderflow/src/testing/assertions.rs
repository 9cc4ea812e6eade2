//! Test assertions for outcomes.

use crate::core::Outcome;

/// Tolerance used when comparing prices.
pub const PRICE_TOLERANCE: f64 = 1e-9;

/// Asserts that the outcome is an approval at `expected` (within
/// [`PRICE_TOLERANCE`]).
pub fn assert_approved_with(outcome: &Outcome, expected: f64) {
    let Some(price) = outcome.final_price() else {
        panic!("Expected approval at {expected}, got: {outcome:?}");
    };
    assert!(
        (price - expected).abs() <= PRICE_TOLERANCE,
        "Expected final price {expected}, got {price}"
    );
}

/// Asserts that the outcome is a rejection with the given reason code.
pub fn assert_rejected_with(outcome: &Outcome, code: &str) {
    let Some(reason) = outcome.rejection() else {
        panic!("Expected rejection '{code}', got: {outcome:?}");
    };
    assert_eq!(
        reason.code(),
        code,
        "Expected rejection '{}', got '{}'",
        code,
        reason.code()
    );
}

/// Asserts that the outcome is a rejection raised by `stage`.
pub fn assert_rejected_by(outcome: &Outcome, stage: &str) {
    match outcome {
        Outcome::Rejected { stage: actual, .. } => assert_eq!(
            actual, stage,
            "Expected rejection by '{stage}', got rejection by '{actual}'"
        ),
        Outcome::Approved { .. } => panic!("Expected rejection by '{stage}', got: {outcome:?}"),
    }
}
