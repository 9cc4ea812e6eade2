//! Guard stages: stock, payment and shipping checks.

use super::Stage;
use crate::core::{RejectionReason, Request, StageDecision, StageKind};
use crate::errors::OrderflowError;
use tracing::info;

/// Rejects requests for products that are not in stock.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockCheck;

impl StockCheck {
    /// Stage name.
    pub const NAME: &'static str = "stock_check";

    /// Creates a new stock check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Stage for StockCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn kind(&self) -> StageKind {
        StageKind::Guard
    }

    fn handle(&self, request: &mut Request) -> Result<StageDecision, OrderflowError> {
        if !request.in_stock {
            return Ok(StageDecision::reject(Self::NAME, RejectionReason::OutOfStock));
        }

        info!(stage = Self::NAME, "Stock check passed");
        Ok(StageDecision::Forward)
    }
}

/// Rejects requests whose payment method is not accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentCheck;

impl PaymentCheck {
    /// Stage name.
    pub const NAME: &'static str = "payment_check";

    /// Creates a new payment check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Stage for PaymentCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn kind(&self) -> StageKind {
        StageKind::Guard
    }

    fn handle(&self, request: &mut Request) -> Result<StageDecision, OrderflowError> {
        let Some(method) = request.parsed_payment_method() else {
            return Ok(StageDecision::reject(
                Self::NAME,
                RejectionReason::InvalidPaymentMethod {
                    method: request.payment_method.clone(),
                },
            ));
        };

        info!(stage = Self::NAME, payment_method = %method, "Payment check passed");
        Ok(StageDecision::Forward)
    }
}

/// Rejects requests without a usable shipping address.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShippingCheck;

impl ShippingCheck {
    /// Stage name.
    pub const NAME: &'static str = "shipping_check";

    /// Creates a new shipping check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Stage for ShippingCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn kind(&self) -> StageKind {
        StageKind::Guard
    }

    fn handle(&self, request: &mut Request) -> Result<StageDecision, OrderflowError> {
        if !request.has_shipping_address() {
            return Ok(StageDecision::reject(
                Self::NAME,
                RejectionReason::InvalidShippingAddress,
            ));
        }

        info!(stage = Self::NAME, "Shipping address check passed");
        Ok(StageDecision::Forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Outcome;
    use pretty_assertions::assert_eq;

    fn rejected_by(stage: &str, reason: RejectionReason) -> StageDecision {
        StageDecision::Halt(Outcome::rejected(stage, reason))
    }

    #[test]
    fn test_stock_check() {
        let stage = StockCheck::new();
        assert_eq!(stage.kind(), StageKind::Guard);

        let mut request = Request::new().in_stock(true);
        assert_eq!(stage.handle(&mut request).unwrap(), StageDecision::Forward);

        let mut request = Request::new();
        assert_eq!(
            stage.handle(&mut request).unwrap(),
            rejected_by("stock_check", RejectionReason::OutOfStock)
        );
    }

    #[test]
    fn test_payment_check_accepts_known_methods() {
        let stage = PaymentCheck::new();
        for method in ["credit_card", "paypal", "bank_transfer"] {
            let mut request = Request::new().payment_method(method);
            assert_eq!(stage.handle(&mut request).unwrap(), StageDecision::Forward);
        }
    }

    #[test]
    fn test_payment_check_names_offending_method() {
        let stage = PaymentCheck::new();

        let mut request = Request::new().payment_method("debit_card");
        assert_eq!(
            stage.handle(&mut request).unwrap(),
            rejected_by(
                "payment_check",
                RejectionReason::InvalidPaymentMethod {
                    method: Some("debit_card".to_string())
                }
            )
        );

        let mut request = Request::new();
        assert_eq!(
            stage.handle(&mut request).unwrap(),
            rejected_by(
                "payment_check",
                RejectionReason::InvalidPaymentMethod { method: None }
            )
        );
    }

    #[test]
    fn test_shipping_check() {
        let stage = ShippingCheck::new();

        let mut request = Request::new().shipping_address("123 Main St");
        assert_eq!(stage.handle(&mut request).unwrap(), StageDecision::Forward);

        for address in [None, Some(""), Some("   "), Some("\t\n")] {
            let mut request = Request {
                shipping_address: address.map(str::to_string),
                ..Request::new()
            };
            assert_eq!(
                stage.handle(&mut request).unwrap(),
                rejected_by("shipping_check", RejectionReason::InvalidShippingAddress)
            );
        }
    }

    #[test]
    fn test_guards_do_not_mutate() {
        let original = Request::new()
            .in_stock(true)
            .payment_method("paypal")
            .shipping_address("1 Elm St")
            .premium(true)
            .total_price(42.0);

        let mut request = original.clone();
        StockCheck::new().handle(&mut request).unwrap();
        PaymentCheck::new().handle(&mut request).unwrap();
        ShippingCheck::new().handle(&mut request).unwrap();

        assert_eq!(request, original);
    }
}
