//! Pricing stages: the premium discount and the terminal approval.

use super::Stage;
use crate::core::{Outcome, Request, StageDecision, StageKind};
use crate::errors::{ContractErrorInfo, OrderflowError, PipelineValidationError};
use tracing::info;

/// Price multiplier applied for premium customers (10% off).
pub const PREMIUM_DISCOUNT_MULTIPLIER: f64 = 0.9;

/// Applies the premium discount. Never rejects.
#[derive(Debug, Clone, Copy)]
pub struct DiscountStage {
    multiplier: f64,
}

impl Default for DiscountStage {
    fn default() -> Self {
        Self {
            multiplier: PREMIUM_DISCOUNT_MULTIPLIER,
        }
    }
}

impl DiscountStage {
    /// Stage name.
    pub const NAME: &'static str = "discount";

    /// Creates the standard 10% premium discount.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a discount with a custom multiplier.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < multiplier <= 1`.
    pub fn with_multiplier(multiplier: f64) -> Result<Self, PipelineValidationError> {
        if !(multiplier > 0.0 && multiplier <= 1.0) {
            return Err(PipelineValidationError::new(format!(
                "Discount multiplier {multiplier} is outside (0, 1]"
            ))
            .with_stages(vec![Self::NAME.to_string()])
            .with_error_info(
                ContractErrorInfo::new("CHAIN-005-DISCOUNT", "Invalid discount multiplier")
                    .with_suggested_fix()
                    .with_context_entry("multiplier", multiplier.to_string()),
            ));
        }
        Ok(Self { multiplier })
    }

    /// Returns the multiplier applied to premium orders.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

impl Stage for DiscountStage {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn kind(&self) -> StageKind {
        StageKind::Transform
    }

    fn handle(&self, request: &mut Request) -> Result<StageDecision, OrderflowError> {
        if request.is_premium_customer {
            let price = request.require_total_price(Self::NAME)?;
            let discounted = price * self.multiplier;
            request.total_price = Some(discounted);
            info!(
                stage = Self::NAME,
                before = price,
                after = discounted,
                "Premium discount applied"
            );
        } else {
            info!(stage = Self::NAME, "Customer not eligible for a discount");
        }

        Ok(StageDecision::Forward)
    }
}

/// Terminal stage: approves the request at its current price.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApprovalStage;

impl ApprovalStage {
    /// Stage name.
    pub const NAME: &'static str = "approval";

    /// Creates a new approval stage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Stage for ApprovalStage {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn kind(&self) -> StageKind {
        StageKind::Terminal
    }

    fn handle(&self, request: &mut Request) -> Result<StageDecision, OrderflowError> {
        let final_price = request.require_total_price(Self::NAME)?;
        info!(stage = Self::NAME, final_price, "All checks passed; request approved");
        Ok(StageDecision::Halt(Outcome::approved(final_price)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ContractViolation;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_discount_for_premium() {
        let mut request = Request::new().premium(true).total_price(100.0);
        let decision = DiscountStage::new().handle(&mut request).unwrap();

        assert_eq!(decision, StageDecision::Forward);
        assert_eq!(request.total_price, Some(100.0 * 0.9));
    }

    #[test]
    fn test_no_discount_for_regular_customer() {
        let mut request = Request::new().total_price(200.0);
        DiscountStage::new().handle(&mut request).unwrap();
        assert_eq!(request.total_price, Some(200.0));
    }

    #[test]
    fn test_regular_customer_without_price_is_left_alone() {
        let mut request = Request::new();
        let decision = DiscountStage::new().handle(&mut request).unwrap();
        assert_eq!(decision, StageDecision::Forward);
        assert_eq!(request.total_price, None);
    }

    #[test]
    fn test_premium_without_price_fails_loudly() {
        let mut request = Request::new().premium(true);
        let err = DiscountStage::new().handle(&mut request).unwrap_err();
        assert!(matches!(
            err,
            OrderflowError::Contract(ContractViolation::MissingField { .. })
        ));
        assert_eq!(request.total_price, None);
    }

    #[test]
    fn test_custom_multiplier() {
        let stage = DiscountStage::with_multiplier(0.75).unwrap();
        assert_eq!(stage.multiplier(), 0.75);

        let mut request = Request::new().premium(true).total_price(80.0);
        stage.handle(&mut request).unwrap();
        assert_eq!(request.total_price, Some(60.0));
    }

    #[test]
    fn test_invalid_multiplier() {
        for multiplier in [0.0, -0.5, 1.5, f64::NAN] {
            let err = DiscountStage::with_multiplier(multiplier).unwrap_err();
            assert_eq!(err.code(), Some("CHAIN-005-DISCOUNT"));
            let info = err.error_info.unwrap();
            assert_eq!(
                info.fix_hint.as_deref(),
                crate::errors::ContractSuggestions::get("CHAIN-005-DISCOUNT")
            );
        }
        assert!(DiscountStage::with_multiplier(1.0).is_ok());
    }

    #[test]
    fn test_approval() {
        let stage = ApprovalStage::new();
        assert_eq!(stage.kind(), StageKind::Terminal);

        let mut request = Request::new().total_price(90.0);
        assert_eq!(
            stage.handle(&mut request).unwrap(),
            StageDecision::Halt(Outcome::approved(90.0))
        );
    }

    #[test]
    fn test_approval_requires_price() {
        let err = ApprovalStage::new().handle(&mut Request::new()).unwrap_err();
        match err {
            OrderflowError::Contract(violation) => {
                assert_eq!(violation, ContractViolation::missing("approval", "total_price"));
            }
            other => panic!("expected contract violation, got {other:?}"),
        }
    }
}
