//! Stripe API objects as returned by the REST endpoints this adapter calls.
//!
//! These types mirror Stripe's JSON closely and are converted into domain
//! types at the adapter boundary. Unknown fields are ignored.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::checkout::{Coupon, CouponCode, Price, PriceType};
use crate::domain::foundation::Currency;
use crate::ports::{CheckoutSessionDetails, PaymentError};

// ════════════════════════════════════════════════════════════════════════════════
// Coupons
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe Coupon object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCoupon {
    /// Coupon identifier. Customers type this as their code.
    pub id: String,

    /// Percentage off, e.g. `20.0` or `12.5`.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub percent_off: Option<Decimal>,

    /// Amount off in minor units of `currency`.
    #[serde(default)]
    pub amount_off: Option<i64>,

    /// Currency of `amount_off` (lowercase).
    #[serde(default)]
    pub currency: Option<String>,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// False once the coupon is expired or fully redeemed.
    #[serde(default)]
    pub valid: bool,
}

impl StripeCoupon {
    /// Normalize into a domain coupon for the code the customer entered.
    pub fn into_coupon(self, code: &CouponCode) -> Result<Coupon, PaymentError> {
        let currency = self
            .currency
            .as_deref()
            .map(Currency::try_new)
            .transpose()
            .map_err(|e| PaymentError::provider(format!("Coupon {} has {}", self.id, e)))?;

        let mut coupon = match (self.percent_off, self.amount_off, currency) {
            (Some(percent), _, _) => Coupon::percent_off(self.id, code.as_str(), percent),
            (None, Some(amount), Some(currency)) => {
                Coupon::amount_off(self.id, code.as_str(), amount, currency)
            }
            _ => {
                return Err(PaymentError::provider(format!(
                    "Coupon {} carries neither percent_off nor amount_off",
                    self.id
                )))
            }
        };
        if let Some(name) = self.name {
            coupon = coupon.with_name(name);
        }
        if !self.valid {
            coupon = coupon.invalidated();
        }
        Ok(coupon)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Prices
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe Price object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePrice {
    /// Price ID.
    pub id: String,

    /// Unit amount in minor units. Absent for custom-amount prices.
    pub unit_amount: Option<i64>,

    /// Currency (lowercase, e.g., "cad").
    pub currency: String,

    /// `one_time` or `recurring`.
    #[serde(rename = "type")]
    pub price_type: String,
}

impl TryFrom<StripePrice> for Price {
    type Error = PaymentError;

    fn try_from(price: StripePrice) -> Result<Self, Self::Error> {
        let unit_amount = price.unit_amount.ok_or_else(|| {
            PaymentError::provider(format!("Price {} has no unit_amount", price.id))
        })?;
        let currency = Currency::try_new(&price.currency)
            .map_err(|e| PaymentError::provider(format!("Price {} has {}", price.id, e)))?;
        let price_type = match price.price_type.as_str() {
            "recurring" => PriceType::Recurring,
            _ => PriceType::OneTime,
        };
        Price::try_new(price.id.clone(), unit_amount, currency, price_type)
            .map_err(|e| PaymentError::provider(format!("Price {} is invalid: {}", price.id, e)))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout Sessions
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe Checkout Session object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCheckoutSession {
    /// Unique session identifier (cs_...).
    pub id: String,

    /// Hosted checkout page. Only present while the session is open.
    #[serde(default)]
    pub url: Option<String>,

    /// Total after discounts, in minor units.
    #[serde(default)]
    pub amount_total: Option<i64>,

    /// Session currency (lowercase).
    #[serde(default)]
    pub currency: Option<String>,

    /// Email passed at creation.
    #[serde(default)]
    pub customer_email: Option<String>,

    /// Details the customer entered on the checkout page.
    #[serde(default)]
    pub customer_details: Option<StripeCustomerDetails>,

    /// Custom metadata attached to the session.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Customer details collected during checkout.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
}

impl From<StripeCheckoutSession> for CheckoutSessionDetails {
    fn from(session: StripeCheckoutSession) -> Self {
        let customer_email = session
            .customer_details
            .and_then(|d| d.email)
            .or(session.customer_email);
        Self {
            id: session.id,
            metadata: session.metadata,
            amount_total: session.amount_total,
            currency: session
                .currency
                .as_deref()
                .and_then(|c| Currency::try_new(c).ok()),
            customer_email,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════════

/// Error envelope Stripe returns with every non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorEnvelope {
    pub error: StripeApiError,
}

/// Body of a Stripe API error.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    #[serde(default)]
    pub message: Option<String>,

    /// Machine-readable code, e.g. `resource_missing`.
    #[serde(default)]
    pub code: Option<String>,

    /// Category, e.g. `invalid_request_error`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::CouponDiscount;
    use rust_decimal_macros::dec;

    fn code(s: &str) -> CouponCode {
        CouponCode::try_new(s).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Coupon Parsing Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn parse_percent_coupon() {
        let json = r#"{
            "id": "SPRING20",
            "object": "coupon",
            "percent_off": 12.5,
            "amount_off": null,
            "currency": null,
            "name": "Spring sale",
            "valid": true
        }"#;
        let stripe: StripeCoupon = serde_json::from_str(json).unwrap();
        let coupon = stripe.into_coupon(&code("SPRING20")).unwrap();

        assert_eq!(coupon.discount(), Some(CouponDiscount::PercentOff(dec!(12.5))));
        assert_eq!(coupon.name.as_deref(), Some("Spring sale"));
        assert!(coupon.is_valid);
    }

    #[test]
    fn parse_amount_coupon() {
        let json = r#"{
            "id": "TENOFF",
            "object": "coupon",
            "percent_off": null,
            "amount_off": 1000,
            "currency": "cad",
            "valid": true
        }"#;
        let stripe: StripeCoupon = serde_json::from_str(json).unwrap();
        let coupon = stripe.into_coupon(&code("TENOFF")).unwrap();

        assert_eq!(coupon.amount_off, Some(1000));
        assert_eq!(coupon.currency.as_ref().map(|c| c.as_str()), Some("cad"));
    }

    #[test]
    fn parse_expired_coupon_as_invalid() {
        let json = r#"{"id": "OLD", "percent_off": 50, "valid": false}"#;
        let stripe: StripeCoupon = serde_json::from_str(json).unwrap();
        let coupon = stripe.into_coupon(&code("OLD")).unwrap();
        assert!(!coupon.is_valid);
    }

    #[test]
    fn coupon_without_discount_is_rejected() {
        let json = r#"{"id": "ODD", "valid": true}"#;
        let stripe: StripeCoupon = serde_json::from_str(json).unwrap();
        assert!(stripe.into_coupon(&code("ODD")).is_err());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Price Parsing Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn parse_one_time_price() {
        let json = r#"{
            "id": "price_123",
            "object": "price",
            "unit_amount": 19900,
            "currency": "cad",
            "type": "one_time",
            "product": "prod_1"
        }"#;
        let stripe: StripePrice = serde_json::from_str(json).unwrap();
        let price = Price::try_from(stripe).unwrap();
        assert_eq!(price.unit_amount, 19900);
        assert_eq!(price.price_type, PriceType::OneTime);
    }

    #[test]
    fn price_without_amount_is_rejected() {
        let json = r#"{"id": "price_x", "unit_amount": null, "currency": "cad", "type": "one_time"}"#;
        let stripe: StripePrice = serde_json::from_str(json).unwrap();
        assert!(Price::try_from(stripe).is_err());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Session and Error Parsing Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn session_prefers_collected_email() {
        let json = r#"{
            "id": "cs_test_1",
            "url": null,
            "amount_total": 21600,
            "currency": "cad",
            "customer_email": "typed@example.com",
            "customer_details": {"email": "paid@example.com"},
            "metadata": {"couponCode": "SPRING20"}
        }"#;
        let stripe: StripeCheckoutSession = serde_json::from_str(json).unwrap();
        let details = CheckoutSessionDetails::from(stripe);

        assert_eq!(details.customer_email.as_deref(), Some("paid@example.com"));
        assert_eq!(details.coupon_code(), Some("SPRING20"));
        assert_eq!(details.amount_total, Some(21600));
    }

    #[test]
    fn parse_error_envelope() {
        let json = r#"{"error": {"code": "resource_missing", "message": "No such coupon: 'X'", "type": "invalid_request_error"}}"#;
        let envelope: StripeErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.code.as_deref(), Some("resource_missing"));
        assert_eq!(envelope.error.error_type.as_deref(), Some("invalid_request_error"));
    }
}
