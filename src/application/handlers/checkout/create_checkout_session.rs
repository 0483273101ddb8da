//! CreateCheckoutSessionHandler - Command handler opening a payment session.
//!
//! The selection is priced through the same [`PurchasePricer`] as quotes and
//! inputs are re-validated here even when the client already checked them.
//!
//! The provider takes one discount per session. The coupon stays provider-side
//! and is applied at creation; steps ahead of it (bundle tier, add-on) are
//! handed over as a settled line amount. A referral credit comes after the
//! coupon in the pipeline, so when one is present the whole breakdown is
//! settled and charged as the quoted total.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::handlers::input::optional;
use crate::domain::foundation::CheckoutError;
use crate::domain::pricing::{BundleTiers, LineItemKind, PriceBreakdown};
use crate::ports::{
    CheckoutCharge, CreateCheckoutRequest, PaymentProvider, METADATA_COUPON_CODE,
    METADATA_PRICE_ID, METADATA_QUANTITY, METADATA_QUOTED_TOTAL,
};

use super::price_purchase::{AddOnOffer, PricedPurchase, PurchasePricer, PurchaseSelection};

/// Redirect targets after checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrls {
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutUrls {
    /// Standard targets under the site's base URL. The success URL carries
    /// the provider's session-id placeholder.
    pub fn for_site(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            success_url: format!("{}/success?session_id={{CHECKOUT_SESSION_ID}}", base),
            cancel_url: format!("{}/cancel", base),
        }
    }
}

/// Command to create a checkout session.
#[derive(Debug, Clone, Default)]
pub struct CreateCheckoutSessionCommand {
    pub price_id: Option<String>,
    pub quantity: Option<i64>,
    pub email: Option<String>,
    pub coupon_code: Option<String>,
    pub add_on_quantity: Option<u32>,
    pub referral_category: Option<String>,
}

/// Result of a created session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCheckoutSessionResult {
    pub session_id: String,
    pub url: String,
    /// Total the session was created for, in minor units.
    pub quoted_total: i64,
}

/// Handler for creating checkout sessions.
pub struct CreateCheckoutSessionHandler {
    provider: Arc<dyn PaymentProvider>,
    pricer: PurchasePricer,
    urls: CheckoutUrls,
}

impl CreateCheckoutSessionHandler {
    pub fn new(
        provider: Arc<dyn PaymentProvider>,
        tiers: BundleTiers,
        add_on: Option<AddOnOffer>,
        urls: CheckoutUrls,
    ) -> Self {
        Self {
            pricer: PurchasePricer::new(provider.clone(), tiers, add_on),
            provider,
            urls,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CreateCheckoutSessionResult, CheckoutError> {
        let email = optional(cmd.email.as_deref()).map(str::to_string);
        let priced = self
            .pricer
            .price(&PurchaseSelection {
                price_id: cmd.price_id,
                quantity: cmd.quantity,
                coupon_code: cmd.coupon_code,
                add_on_quantity: cmd.add_on_quantity,
                referral_category: cmd.referral_category,
            })
            .await?;

        let quoted_total = priced.breakdown.final_total;
        let request = self.checkout_request(&priced, email);
        let price_id = request.price_id.clone();
        let quantity = request.quantity;

        let session = self
            .provider
            .create_checkout_session(request)
            .await
            .map_err(|e| {
                tracing::error!(
                    price_id = %price_id,
                    quantity,
                    status = e.status,
                    error = %e,
                    "Checkout session creation failed"
                );
                CheckoutError::from(e)
            })?;

        Ok(CreateCheckoutSessionResult {
            session_id: session.id,
            url: session.url,
            quoted_total,
        })
    }

    fn checkout_request(&self, priced: &PricedPurchase, email: Option<String>) -> CreateCheckoutRequest {
        let settle_everything = priced.has_referral_credit();
        let provider_coupon = priced
            .coupon_code
            .clone()
            .filter(|_| priced.breakdown.coupon_applied && !settle_everything);

        let settled_amount = if settle_everything {
            Some(priced.breakdown.final_total)
        } else if priced.has_local_adjustments() {
            Some(priced.total_before_coupon())
        } else {
            None
        };
        let charge = settled_amount.map(|amount| CheckoutCharge {
            description: charge_description(&priced.breakdown),
            amount,
            currency: priced.price.currency.clone(),
        });

        let mut metadata = HashMap::new();
        metadata.insert(METADATA_PRICE_ID.to_string(), priced.price_id.to_string());
        metadata.insert(METADATA_QUANTITY.to_string(), priced.quantity.to_string());
        metadata.insert(
            METADATA_QUOTED_TOTAL.to_string(),
            priced.breakdown.final_total.to_string(),
        );
        if let Some(code) = &priced.coupon_code {
            metadata.insert(METADATA_COUPON_CODE.to_string(), code.as_str().to_string());
        }

        CreateCheckoutRequest {
            price_id: priced.price_id.clone(),
            quantity: priced.quantity,
            charge,
            email,
            coupon_code: provider_coupon,
            success_url: self.urls.success_url.clone(),
            cancel_url: self.urls.cancel_url.clone(),
            metadata,
        }
    }
}

/// "3 × Ticket, 2 × T-shirt": the purchased lines, discounts left out.
fn charge_description(breakdown: &PriceBreakdown) -> String {
    breakdown
        .line_items
        .iter()
        .filter(|l| matches!(l.kind, LineItemKind::Item | LineItemKind::AddOn))
        .map(|l| l.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
