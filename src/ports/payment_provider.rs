//! Payment provider port for external payment processing.
//!
//! Defines the contract for payment gateway integrations (e.g., Stripe).
//! The provider is the source of truth for coupons, prices and the amount
//! actually charged; this core only reads from it and opens checkout sessions.
//!
//! # Design
//!
//! - **Gateway agnostic**: Interface works with any payment provider
//! - **Read-mostly**: Coupon and price lookups never mutate provider state
//! - **No retries**: A failed call is reported upward once

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::checkout::{Coupon, CouponCode, Price, ProviderId};
use crate::domain::foundation::{CheckoutError, Currency};

/// Metadata key carrying the coupon code on a checkout session.
pub const METADATA_COUPON_CODE: &str = "couponCode";

/// Metadata key carrying the price ID on a checkout session.
pub const METADATA_PRICE_ID: &str = "priceId";

/// Metadata key carrying the purchased quantity on a checkout session.
pub const METADATA_QUANTITY: &str = "quantity";

/// Metadata key carrying the locally quoted total, in minor units.
pub const METADATA_QUOTED_TOTAL: &str = "quotedTotal";

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Look up a coupon by the code the customer entered.
    ///
    /// Returns `PaymentErrorCode::NotFound` when the provider has no such coupon.
    async fn retrieve_coupon(&self, code: &CouponCode) -> Result<Coupon, PaymentError>;

    /// Look up a price by provider ID.
    async fn retrieve_price(&self, price_id: &ProviderId) -> Result<Price, PaymentError>;

    /// Create a one-time payment checkout session.
    ///
    /// When `coupon_code` is set the provider applies the discount itself at
    /// creation time, on top of `charge` when one is given.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Re-read a checkout session, including its metadata.
    async fn retrieve_checkout_session(
        &self,
        session_id: &ProviderId,
    ) -> Result<CheckoutSessionDetails, PaymentError>;
}

/// Request to create a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Provider price being purchased.
    pub price_id: ProviderId,

    /// Units to purchase. Always at least 1.
    pub quantity: u32,

    /// Amount to charge instead of `price_id × quantity`, when discounts
    /// other than the coupon were settled before session creation.
    pub charge: Option<CheckoutCharge>,

    /// Customer email for pre-fill.
    pub email: Option<String>,

    /// Coupon to apply provider-side.
    pub coupon_code: Option<CouponCode>,

    /// URL to redirect after successful checkout.
    pub success_url: String,

    /// URL to redirect after canceled checkout.
    pub cancel_url: String,

    /// Reconciliation metadata stored on the session.
    pub metadata: HashMap<String, String>,
}

/// A single pre-discounted line charged in place of the catalog price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutCharge {
    /// Line description shown on the provider's checkout page.
    pub description: String,

    /// Total in minor units of `currency`.
    pub amount: i64,

    pub currency: Currency,
}

/// Checkout session for payment completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for customer to complete checkout.
    pub url: String,
}

/// A checkout session as read back from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckoutSessionDetails {
    pub id: String,
    pub metadata: HashMap<String, String>,
    /// Amount charged after provider-side discounts, in minor units.
    pub amount_total: Option<i64>,
    pub currency: Option<Currency>,
    pub customer_email: Option<String>,
}

impl CheckoutSessionDetails {
    /// The coupon code recorded at creation, if any.
    pub fn coupon_code(&self) -> Option<&str> {
        self.metadata
            .get(METADATA_COUPON_CODE)
            .map(String::as_str)
            .filter(|c| !c.is_empty())
    }
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message. May contain provider detail; never sent to clients verbatim.
    pub message: String,

    /// HTTP status returned by the provider (if any).
    pub status: Option<u16>,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            provider_code: None,
        }
    }

    /// Attach the upstream HTTP status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    /// Create a not found error.
    pub fn not_found(resource: &str) -> Self {
        Self::new(
            PaymentErrorCode::NotFound,
            format!("{} not found", resource),
        )
        .with_status(404)
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidRequest, message)
    }

    /// Create a generic provider API error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.code == PaymentErrorCode::NotFound
    }

    /// Client-safe description; provider detail stays in server logs.
    pub fn redacted_message(&self) -> &'static str {
        match self.code {
            PaymentErrorCode::NotFound => "Resource not found at payment provider",
            PaymentErrorCode::InvalidRequest => "Payment provider rejected the request",
            PaymentErrorCode::RateLimitExceeded => "Payment provider is busy, try again later",
            PaymentErrorCode::NetworkError
            | PaymentErrorCode::AuthenticationError
            | PaymentErrorCode::ProviderError
            | PaymentErrorCode::Unknown => "Payment provider error",
        }
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for CheckoutError {
    fn from(err: PaymentError) -> Self {
        // Credentials problems are ours, not the caller's: never forward 401/403.
        let status = match err.code {
            PaymentErrorCode::AuthenticationError | PaymentErrorCode::NetworkError => None,
            _ => err.status.filter(|s| (400..600).contains(s)),
        };
        CheckoutError::provider(status, err.redacted_message())
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Resource not found.
    NotFound,

    /// Request rejected as invalid (e.g. unknown price).
    InvalidRequest,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Provider API error.
    ProviderError,

    /// Unknown error.
    Unknown,
}

impl PaymentErrorCode {
    /// Map a provider HTTP status to an error code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 402 => PaymentErrorCode::InvalidRequest,
            401 | 403 => PaymentErrorCode::AuthenticationError,
            404 => PaymentErrorCode::NotFound,
            429 => PaymentErrorCode::RateLimitExceeded,
            500..=599 => PaymentErrorCode::ProviderError,
            _ => PaymentErrorCode::Unknown,
        }
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::NotFound => "not_found",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
