//! Coupon value objects.
//!
//! A coupon is resolved from the payment provider on every lookup and never
//! cached. It carries exactly one discount kind when valid: a percentage off
//! or a fixed amount off in a specific currency.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Currency, ValidationError};

/// Longest code accepted before a provider lookup is attempted.
const MAX_CODE_LENGTH: usize = 64;

/// A coupon code as typed by the customer, trimmed and checked for shape.
///
/// Only ASCII letters, digits, `-` and `_` are accepted so the code can be
/// placed in a provider URL path without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponCode(String);

impl CouponCode {
    pub fn try_new(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ValidationError::empty_field("code"));
        }
        if code.len() > MAX_CODE_LENGTH {
            return Err(ValidationError::out_of_range(
                "code_length",
                1,
                MAX_CODE_LENGTH as i64,
                code.len() as i64,
            ));
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::invalid_format(
                "code",
                "letters, digits, '-' and '_' only",
            ));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CouponCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A coupon normalized from the payment provider's representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Provider's coupon ID.
    pub id: String,

    /// The code the customer entered.
    pub code: String,

    /// Percentage off (0-100), possibly fractional.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub percent_off: Option<Decimal>,

    /// Fixed amount off in minor units of `currency`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_off: Option<i64>,

    /// Currency of `amount_off`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,

    /// Display name configured at the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// False when the provider reports the coupon inactive.
    pub is_valid: bool,
}

/// The discount a valid coupon grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponDiscount {
    PercentOff(Decimal),
    AmountOff { amount: i64, currency: Currency },
}

impl Coupon {
    /// Creates a valid percentage-off coupon.
    pub fn percent_off(id: impl Into<String>, code: impl Into<String>, percent: Decimal) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            percent_off: Some(percent),
            amount_off: None,
            currency: None,
            name: None,
            is_valid: true,
        }
    }

    /// Creates a valid fixed-amount coupon.
    pub fn amount_off(
        id: impl Into<String>,
        code: impl Into<String>,
        amount: i64,
        currency: Currency,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            percent_off: None,
            amount_off: Some(amount),
            currency: Some(currency),
            name: None,
            is_valid: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Marks the coupon as inactive.
    pub fn invalidated(mut self) -> Self {
        self.is_valid = false;
        self
    }

    /// Returns the discount this coupon grants, or `None` if it grants nothing.
    pub fn discount(&self) -> Option<CouponDiscount> {
        if !self.is_valid {
            return None;
        }
        if let Some(percent) = self.percent_off {
            return Some(CouponDiscount::PercentOff(percent));
        }
        match (self.amount_off, &self.currency) {
            (Some(amount), Some(currency)) => Some(CouponDiscount::AmountOff {
                amount,
                currency: currency.clone(),
            }),
            _ => None,
        }
    }

    /// Whether this coupon may be applied to a price in `currency`.
    pub fn applies_to(&self, currency: &Currency) -> bool {
        match self.discount() {
            Some(CouponDiscount::PercentOff(_)) => true,
            Some(CouponDiscount::AmountOff { currency: c, .. }) => &c == currency,
            None => false,
        }
    }

    /// Short human-readable description, e.g. `20% off` or `CAD 15.00 off`.
    pub fn describe(&self) -> String {
        match self.discount() {
            Some(CouponDiscount::PercentOff(p)) => format!("{}% off", p.normalize()),
            Some(CouponDiscount::AmountOff { amount, currency }) => {
                format!("{} off", crate::domain::pricing::format_amount(amount, &currency))
            }
            None => "no discount".to_string(),
        }
    }
}
