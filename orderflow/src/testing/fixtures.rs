//! Sample requests covering each path through the standard pipeline.

use super::PRICE_TOLERANCE;
use crate::core::{Outcome, Request};

/// What a scenario should produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpectedOutcome {
    /// Approved at this price.
    Approved(f64),
    /// Rejected with this reason code.
    Rejected(&'static str),
}

impl ExpectedOutcome {
    /// Returns true if `outcome` is what this expectation describes.
    #[must_use]
    pub fn matches(&self, outcome: &Outcome) -> bool {
        match (self, outcome) {
            (Self::Approved(expected), Outcome::Approved { final_price }) => {
                (final_price - expected).abs() <= PRICE_TOLERANCE
            }
            (Self::Rejected(code), Outcome::Rejected { reason, .. }) => reason.code() == *code,
            _ => false,
        }
    }
}

/// A named request with its expected outcome.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Short label.
    pub name: &'static str,
    /// The request to submit.
    pub request: Request,
    /// What the standard pipeline should return.
    pub expected: ExpectedOutcome,
}

/// Premium customer paying by card: approved at 90.00.
#[must_use]
pub fn premium_card_order() -> Request {
    Request::new()
        .in_stock(true)
        .payment_method("credit_card")
        .shipping_address("123 Main St")
        .premium(true)
        .total_price(100.0)
}

/// Unsupported payment method: rejected, naming `debit_card`.
#[must_use]
pub fn debit_card_order() -> Request {
    Request::new()
        .in_stock(true)
        .payment_method("debit_card")
        .shipping_address("456 Elm St")
        .premium(false)
        .total_price(200.0)
}

/// Out of stock: rejected before payment is looked at.
#[must_use]
pub fn out_of_stock_order() -> Request {
    Request::new()
        .in_stock(false)
        .payment_method("paypal")
        .shipping_address("789 Oak St")
        .premium(true)
        .total_price(150.0)
}

/// Whitespace-only shipping address: rejected.
#[must_use]
pub fn blank_address_order() -> Request {
    Request::new()
        .in_stock(true)
        .payment_method("bank_transfer")
        .shipping_address("   ")
        .premium(false)
        .total_price(50.0)
}

/// Returns every built-in scenario, in demo order.
#[must_use]
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "premium customer, credit card",
            request: premium_card_order(),
            expected: ExpectedOutcome::Approved(90.0),
        },
        Scenario {
            name: "unsupported payment method",
            request: debit_card_order(),
            expected: ExpectedOutcome::Rejected("invalid_payment_method"),
        },
        Scenario {
            name: "out of stock",
            request: out_of_stock_order(),
            expected: ExpectedOutcome::Rejected("out_of_stock"),
        },
        Scenario {
            name: "blank shipping address",
            request: blank_address_order(),
            expected: ExpectedOutcome::Rejected("invalid_shipping_address"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RejectionReason;

    #[test]
    fn test_expected_outcome_matches() {
        let approved = Outcome::approved(90.0);
        let rejected = Outcome::rejected("stock_check", RejectionReason::OutOfStock);

        assert!(ExpectedOutcome::Approved(90.0).matches(&approved));
        assert!(!ExpectedOutcome::Approved(100.0).matches(&approved));
        assert!(!ExpectedOutcome::Approved(90.0).matches(&rejected));
        assert!(ExpectedOutcome::Rejected("out_of_stock").matches(&rejected));
        assert!(!ExpectedOutcome::Rejected("invalid_shipping_address").matches(&rejected));
        assert!(!ExpectedOutcome::Rejected("out_of_stock").matches(&approved));
    }
}
