//! Shared pricing step for quotes and checkout sessions.
//!
//! Both `/price-quote` and `/checkout-sessions` price a selection here, so the
//! amount shown and the amount charged come from the same discount context.

use std::sync::Arc;

use crate::application::handlers::input::{optional, positive_quantity, provider_id};
use crate::domain::checkout::{Coupon, CouponCode, Price, ProviderId};
use crate::domain::foundation::CheckoutError;
use crate::domain::pricing::{AddOn, BundleTiers, DiscountContext, PriceBreakdown, PriceCalculator};
use crate::domain::referral::{ReferralCredit, ReferralCreditResolver};
use crate::ports::PaymentProvider;

use super::resolve_coupon::{parse_coupon_code, ResolveCouponHandler};

/// A merchandise add-on offered alongside tickets, priced in the ticket currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOnOffer {
    pub label: String,
    pub unit_price: i64,
}

/// What the customer selected. Every field is unchecked input.
#[derive(Debug, Clone, Default)]
pub struct PurchaseSelection {
    pub price_id: Option<String>,
    pub quantity: Option<i64>,
    pub coupon_code: Option<String>,
    pub add_on_quantity: Option<u32>,
    pub referral_category: Option<String>,
}

/// A selection priced against the provider's current price and coupon.
#[derive(Debug, Clone)]
pub struct PricedPurchase {
    pub price_id: ProviderId,
    pub quantity: u32,
    pub price: Price,
    pub coupon_code: Option<CouponCode>,
    pub coupon: Option<Coupon>,
    pub referral_credit: Option<ReferralCredit>,
    pub context: DiscountContext,
    pub breakdown: PriceBreakdown,
}

impl PricedPurchase {
    /// Total after every step before the coupon (bundle tier, add-on).
    pub fn total_before_coupon(&self) -> i64 {
        let mut ctx = self.context.clone();
        ctx.coupon = None;
        ctx.referral_credit = None;
        PriceCalculator::calculate(&ctx).final_total
    }

    /// Whether any step other than the coupon changes the catalog total.
    pub fn has_local_adjustments(&self) -> bool {
        let catalog_total = self.price.unit_amount * i64::from(self.quantity);
        self.total_before_coupon() != catalog_total || self.has_referral_credit()
    }

    pub fn has_referral_credit(&self) -> bool {
        self.context.referral_credit.is_some_and(|c| c > 0)
    }
}

/// Prices a [`PurchaseSelection`]. Input checks run before any provider call.
pub struct PurchasePricer {
    provider: Arc<dyn PaymentProvider>,
    coupons: ResolveCouponHandler,
    tiers: BundleTiers,
    add_on: Option<AddOnOffer>,
}

impl PurchasePricer {
    pub fn new(
        provider: Arc<dyn PaymentProvider>,
        tiers: BundleTiers,
        add_on: Option<AddOnOffer>,
    ) -> Self {
        Self {
            coupons: ResolveCouponHandler::new(provider.clone()),
            provider,
            tiers,
            add_on,
        }
    }

    pub async fn price(&self, selection: &PurchaseSelection) -> Result<PricedPurchase, CheckoutError> {
        let price_id = provider_id(selection.price_id.as_deref(), "priceId")?;
        let quantity = positive_quantity(selection.quantity)?;
        let add_on_quantity = selection.add_on_quantity.unwrap_or(0);
        if add_on_quantity > 0 && self.add_on.is_none() {
            return Err(CheckoutError::invalid_input("Add-ons are not available"));
        }
        let coupon_code = optional(selection.coupon_code.as_deref())
            .map(parse_coupon_code)
            .transpose()?;

        let price = self.provider.retrieve_price(&price_id).await.map_err(|e| {
            tracing::error!(price_id = %price_id, error = %e, "Price lookup failed");
            CheckoutError::from(e)
        })?;
        let coupon = match &coupon_code {
            Some(code) => Some(self.coupons.lookup(code).await?),
            None => None,
        };
        let referral_credit = optional(selection.referral_category.as_deref())
            .map(ReferralCreditResolver::credit_for);

        let mut context = DiscountContext::new(price.currency.clone(), price.unit_amount, quantity)
            .with_bundle_discount(self.tiers.percent_for(quantity));
        if let Some(offer) = self.add_on.as_ref().filter(|_| add_on_quantity > 0) {
            context = context.with_add_on(AddOn {
                label: offer.label.clone(),
                unit_price: offer.unit_price,
                quantity: add_on_quantity,
            });
        }
        if let Some(coupon) = &coupon {
            context = context.with_coupon(coupon.clone());
        }
        if let Some(credit) = &referral_credit {
            context = context.with_referral_credit(credit.minor_units(&price.currency));
        }

        let breakdown = PriceCalculator::calculate(&context);

        Ok(PricedPurchase {
            price_id,
            quantity,
            price,
            coupon_code,
            coupon,
            referral_credit,
            context,
            breakdown,
        })
    }
}
