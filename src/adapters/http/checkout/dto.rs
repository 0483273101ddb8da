//! Request and response DTOs for checkout endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::handlers::{CreateCheckoutSessionResult, QuotePriceResult};
use crate::domain::checkout::{Coupon, Price};
use crate::domain::foundation::Currency;
use crate::domain::pricing::PriceBreakdown;
use crate::domain::referral::ReferralCredit;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Query string for `GET /validate-coupon`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidateCouponParams {
    pub code: Option<String>,
}

/// Query string for `GET /get-price`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPriceParams {
    pub price_id: Option<String>,
}

/// Body of `POST /price-quote`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteRequest {
    pub price_id: Option<String>,
    pub quantity: Option<i64>,
    pub coupon_code: Option<String>,
    pub tshirt_quantity: Option<u32>,
    pub referral_category: Option<String>,
}

/// Body of `POST /checkout-sessions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionRequest {
    pub price_id: Option<String>,
    pub quantity: Option<i64>,
    pub email: Option<String>,
    pub coupon_code: Option<String>,
    pub tshirt_quantity: Option<u32>,
    pub referral_category: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// A validated coupon.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub id: String,
    pub code: String,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub percent_off: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_off: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub valid: bool,
    pub description: String,
}

impl From<Coupon> for CouponResponse {
    fn from(coupon: Coupon) -> Self {
        let description = coupon.describe();
        Self {
            id: coupon.id,
            code: coupon.code,
            percent_off: coupon.percent_off,
            amount_off: coupon.amount_off,
            currency: coupon.currency,
            name: coupon.name,
            valid: coupon.is_valid,
            description,
        }
    }
}

/// Price quote with its breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteResponse {
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<CouponResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_credit: Option<ReferralCredit>,
    #[serde(flatten)]
    pub breakdown: PriceBreakdown,
    pub formatted_total: String,
    pub formatted_savings: String,
}

impl From<QuotePriceResult> for PriceQuoteResponse {
    fn from(result: QuotePriceResult) -> Self {
        Self {
            formatted_total: result.breakdown.formatted_total(),
            formatted_savings: result.breakdown.formatted_savings(),
            price: result.price,
            coupon: result.coupon.map(CouponResponse::from),
            referral_credit: result.referral_credit,
            breakdown: result.breakdown,
        }
    }
}

/// A created checkout session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    pub session_id: String,
    pub url: String,
    pub quoted_total: i64,
}

impl From<CreateCheckoutSessionResult> for CheckoutSessionResponse {
    fn from(result: CreateCheckoutSessionResult) -> Self {
        Self {
            session_id: result.session_id,
            url: result.url,
            quoted_total: result.quoted_total,
        }
    }
}
