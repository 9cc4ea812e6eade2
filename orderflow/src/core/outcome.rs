//! Terminal outcomes of a pipeline run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum RejectionReason {
    /// The product is not in stock.
    OutOfStock,
    /// The payment method is missing or not accepted.
    InvalidPaymentMethod {
        /// The value the caller supplied.
        method: Option<String>,
    },
    /// The shipping address is missing or blank.
    InvalidShippingAddress,
}

impl RejectionReason {
    /// Returns a stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfStock => "out_of_stock",
            Self::InvalidPaymentMethod { .. } => "invalid_payment_method",
            Self::InvalidShippingAddress => "invalid_shipping_address",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfStock => write!(f, "Product is out of stock"),
            Self::InvalidPaymentMethod { method } => write!(
                f,
                "Payment method '{}' is not valid",
                method.as_deref().unwrap_or("none")
            ),
            Self::InvalidShippingAddress => write!(f, "Shipping address is not valid"),
        }
    }
}

/// The terminal result of running a request through a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A stage refused the request; later stages never ran.
    Rejected {
        /// The stage that rejected.
        stage: String,
        /// Why it rejected.
        reason: RejectionReason,
    },
    /// Every check passed.
    Approved {
        /// The price after any discount. Never rounded.
        final_price: f64,
    },
}

impl Outcome {
    /// Creates a rejection.
    #[must_use]
    pub fn rejected(stage: impl Into<String>, reason: RejectionReason) -> Self {
        Self::Rejected {
            stage: stage.into(),
            reason,
        }
    }

    /// Creates an approval.
    #[must_use]
    pub fn approved(final_price: f64) -> Self {
        Self::Approved { final_price }
    }

    /// Returns the short outcome message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Rejected { reason, .. } => reason.to_string(),
            Self::Approved { .. } => "approved".to_string(),
        }
    }

    /// Returns the final price of an approval.
    #[must_use]
    pub fn final_price(&self) -> Option<f64> {
        match self {
            Self::Approved { final_price } => Some(*final_price),
            Self::Rejected { .. } => None,
        }
    }

    /// Returns the rejection reason, if rejected.
    #[must_use]
    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            Self::Rejected { reason, .. } => Some(reason),
            Self::Approved { .. } => None,
        }
    }

    /// Returns true if the request was approved.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved { .. })
    }

    /// Returns true if the request was rejected.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { reason, .. } => write!(f, "{reason}. Request rejected."),
            Self::Approved { final_price } => {
                write!(f, "Request approved. Final price: ${final_price:.2}")
            }
        }
    }
}

/// What a stage decided about a request.
///
/// `Forward` is internal control flow and never leaves the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum StageDecision {
    /// Pass the request to the next stage.
    Forward,
    /// Stop the chain with this outcome.
    Halt(Outcome),
}

impl StageDecision {
    /// Halts with a rejection.
    #[must_use]
    pub fn reject(stage: impl Into<String>, reason: RejectionReason) -> Self {
        Self::Halt(Outcome::rejected(stage, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rejection_display() {
        let outcome = Outcome::rejected("stock_check", RejectionReason::OutOfStock);
        assert_eq!(outcome.to_string(), "Product is out of stock. Request rejected.");
        assert_eq!(outcome.message(), "Product is out of stock");
        assert!(outcome.is_rejected());
        assert_eq!(outcome.final_price(), None);
    }

    #[test]
    fn test_payment_reason_names_method() {
        let reason = RejectionReason::InvalidPaymentMethod {
            method: Some("debit_card".to_string()),
        };
        assert_eq!(reason.to_string(), "Payment method 'debit_card' is not valid");
        assert_eq!(reason.code(), "invalid_payment_method");

        let missing = RejectionReason::InvalidPaymentMethod { method: None };
        assert_eq!(missing.to_string(), "Payment method 'none' is not valid");
    }

    #[test]
    fn test_approval_display_rounds_for_display_only() {
        let outcome = Outcome::approved(100.0 * 0.9);
        assert_eq!(outcome.to_string(), "Request approved. Final price: $90.00");
        assert_eq!(outcome.message(), "approved");
        assert_eq!(outcome.final_price(), Some(100.0 * 0.9));

        let outcome = Outcome::approved(10.005_1);
        assert_eq!(outcome.to_string(), "Request approved. Final price: $10.01");
        assert_eq!(outcome.final_price(), Some(10.005_1));
    }

    #[test]
    fn test_outcome_serialize() {
        let outcome = Outcome::rejected("shipping_check", RejectionReason::InvalidShippingAddress);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "rejected",
                "stage": "shipping_check",
                "reason": {"code": "invalid_shipping_address"},
            })
        );

        let approved = serde_json::to_value(Outcome::approved(50.0)).unwrap();
        assert_eq!(approved, serde_json::json!({"status": "approved", "final_price": 50.0}));
    }

    #[test]
    fn test_stage_decision_reject() {
        let decision = StageDecision::reject("stock_check", RejectionReason::OutOfStock);
        assert_eq!(
            decision,
            StageDecision::Halt(Outcome::rejected("stock_check", RejectionReason::OutOfStock))
        );
    }
}
