//! The purchase request carried through the pipeline.

use crate::errors::{ContractViolation, OrderflowError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card payment.
    CreditCard,
    /// PayPal account.
    Paypal,
    /// Direct bank transfer.
    BankTransfer,
}

impl PaymentMethod {
    /// All accepted methods, in display order.
    pub const ALL: [Self; 3] = [Self::CreditCard, Self::Paypal, Self::BankTransfer];

    /// Returns the wire name of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::Paypal => "paypal",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A purchase request.
///
/// Optional fields keep whatever the caller supplied so the stages can judge
/// it; flags default to `false` when absent. A request belongs to a single
/// pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Whether the product is in stock.
    #[serde(default)]
    pub in_stock: bool,

    /// Raw payment method as supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Shipping address as supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,

    /// Whether the customer gets the premium discount.
    #[serde(default)]
    pub is_premium_customer: bool,

    /// Order total. Only the discount stage may change it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
}

impl Request {
    /// Creates an empty request with every default applied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a request from its JSON field bag.
    ///
    /// Missing keys take their defaults and unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, OrderflowError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a request from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, OrderflowError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Sets the stock flag.
    #[must_use]
    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Sets the payment method.
    #[must_use]
    pub fn payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    /// Sets the shipping address.
    #[must_use]
    pub fn shipping_address(mut self, address: impl Into<String>) -> Self {
        self.shipping_address = Some(address.into());
        self
    }

    /// Sets the premium flag.
    #[must_use]
    pub fn premium(mut self, premium: bool) -> Self {
        self.is_premium_customer = premium;
        self
    }

    /// Sets the order total.
    #[must_use]
    pub fn total_price(mut self, price: f64) -> Self {
        self.total_price = Some(price);
        self
    }

    /// Returns the parsed payment method, if it is one we accept.
    #[must_use]
    pub fn parsed_payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method.as_deref().and_then(|m| m.parse().ok())
    }

    /// Returns true if the shipping address has any non-whitespace content.
    #[must_use]
    pub fn has_shipping_address(&self) -> bool {
        self.shipping_address
            .as_deref()
            .is_some_and(|address| !address.trim().is_empty())
    }

    /// Returns the order total for `stage`, or the contract violation that
    /// stops it.
    pub fn require_total_price(&self, stage: &str) -> Result<f64, ContractViolation> {
        let price = self
            .total_price
            .ok_or_else(|| ContractViolation::missing(stage, "total_price"))?;

        if !price.is_finite() {
            return Err(ContractViolation::invalid(stage, "total_price", "must be a finite amount"));
        }
        if price < 0.0 {
            return Err(ContractViolation::invalid(stage, "total_price", "must not be negative"));
        }

        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let request = Request::new();
        assert!(!request.in_stock);
        assert!(!request.is_premium_customer);
        assert!(request.payment_method.is_none());
        assert!(request.total_price.is_none());
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("credit_card".parse::<PaymentMethod>(), Ok(PaymentMethod::CreditCard));
        assert_eq!("paypal".parse::<PaymentMethod>(), Ok(PaymentMethod::Paypal));
        assert_eq!("bank_transfer".parse::<PaymentMethod>(), Ok(PaymentMethod::BankTransfer));
        assert_eq!("debit_card".parse::<PaymentMethod>(), Err("debit_card".to_string()));
        assert!("PayPal".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_display_round_trips() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.to_string().parse::<PaymentMethod>(), Ok(method));
        }
    }

    #[test]
    fn test_from_json_applies_defaults() {
        let request = Request::from_json(
            r#"{"payment_method": "paypal", "total_price": 12.5, "coupon": "ignored"}"#,
        )
        .unwrap();

        assert_eq!(
            request,
            Request::new().payment_method("paypal").total_price(12.5)
        );
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        let err = Request::from_json(r#"{"in_stock": "yes"}"#).unwrap_err();
        assert!(matches!(err, OrderflowError::Serialization(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, r#"{"in_stock": true, "is_premium_customer": true}"#).unwrap();

        let request = Request::from_path(&path).unwrap();
        assert_eq!(request, Request::new().in_stock(true).premium(true));

        let err = Request::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, OrderflowError::Io(_)));
    }

    #[test]
    fn test_shipping_address_blank() {
        assert!(!Request::new().has_shipping_address());
        assert!(!Request::new().shipping_address("").has_shipping_address());
        assert!(!Request::new().shipping_address(" \t\n").has_shipping_address());
        assert!(Request::new().shipping_address(" 1 Main St ").has_shipping_address());
    }

    #[test]
    fn test_require_total_price() {
        assert_eq!(Request::new().total_price(10.0).require_total_price("approval"), Ok(10.0));
        assert_eq!(Request::new().total_price(0.0).require_total_price("approval"), Ok(0.0));

        assert_eq!(
            Request::new().require_total_price("approval"),
            Err(ContractViolation::missing("approval", "total_price"))
        );
        assert!(matches!(
            Request::new().total_price(-1.0).require_total_price("approval"),
            Err(ContractViolation::InvalidField { .. })
        ));
        assert!(matches!(
            Request::new().total_price(f64::NAN).require_total_price("approval"),
            Err(ContractViolation::InvalidField { .. })
        ));
    }
}
