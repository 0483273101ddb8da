//! ResolveCouponHandler - Query handler for coupon validation.

use std::sync::Arc;

use crate::application::handlers::input::optional;
use crate::domain::checkout::{Coupon, CouponCode};
use crate::domain::foundation::CheckoutError;
use crate::ports::PaymentProvider;

/// Message shown to customers for an unknown or malformed code.
pub const INVALID_COUPON_MESSAGE: &str = "Invalid coupon code";

/// Query to resolve a coupon code.
#[derive(Debug, Clone)]
pub struct ResolveCouponQuery {
    pub code: Option<String>,
}

/// Result of a successful coupon lookup.
pub type ResolveCouponResult = Coupon;

/// Handler for coupon lookups.
///
/// Coupons are resolved against the provider on every call and never cached.
pub struct ResolveCouponHandler {
    provider: Arc<dyn PaymentProvider>,
}

impl ResolveCouponHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, query: ResolveCouponQuery) -> Result<ResolveCouponResult, CheckoutError> {
        self.resolve_optional(query.code.as_deref())
            .await?
            .ok_or_else(|| CheckoutError::invalid_input("Missing coupon code"))
    }

    /// Resolves `code` when present. No code is a valid "no coupon" state.
    pub async fn resolve_optional(&self, code: Option<&str>) -> Result<Option<Coupon>, CheckoutError> {
        match optional(code) {
            Some(raw) => self.lookup(&parse_coupon_code(raw)?).await.map(Some),
            None => Ok(None),
        }
    }

    /// Looks up an already checked code.
    pub async fn lookup(&self, code: &CouponCode) -> Result<Coupon, CheckoutError> {
        match self.provider.retrieve_coupon(code).await {
            Ok(coupon) => Ok(coupon),
            Err(e) if e.is_not_found() => {
                tracing::info!(code = %code, "Coupon not found");
                Err(CheckoutError::not_found(INVALID_COUPON_MESSAGE))
            }
            Err(e) => {
                tracing::error!(code = %code, error = %e, "Coupon lookup failed");
                Err(e.into())
            }
        }
    }
}

/// Checks the shape of a non-blank code without touching the provider.
pub(super) fn parse_coupon_code(raw: &str) -> Result<CouponCode, CheckoutError> {
    CouponCode::try_new(raw).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed coupon code");
        CheckoutError::invalid_input(INVALID_COUPON_MESSAGE)
    })
}
