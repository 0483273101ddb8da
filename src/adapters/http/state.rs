//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use chrono::Duration;

use crate::application::handlers::{
    AddOnOffer, CheckoutUrls, CreateCheckoutSessionHandler, GenerateFeedbackLinkHandler,
    GetPriceHandler, NotificationDispatcher, ProcessReferralHandler, QuotePriceHandler,
    RedeemFeedbackHandler, ResolveCouponHandler,
};
use crate::domain::access::default_ttl;
use crate::domain::pricing::BundleTiers;
use crate::ports::{
    AccessTokenService, OpsNotifier, PaymentProvider, ReferralLedger, SpeakerDirectory,
};

/// Site-level settings the handlers need.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub base_url: String,
    pub add_on: Option<AddOnOffer>,
    pub bundle_tiers: BundleTiers,
    pub token_ttl: Duration,
}

impl SiteSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            add_on: None,
            bundle_tiers: BundleTiers::default(),
            token_ttl: default_ttl(),
        }
    }

    pub fn with_add_on(mut self, add_on: AddOnOffer) -> Self {
        self.add_on = Some(add_on);
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub notifier: Arc<dyn OpsNotifier>,
    pub speaker_directory: Arc<dyn SpeakerDirectory>,
    pub referral_ledger: Arc<dyn ReferralLedger>,
    pub access_tokens: Arc<dyn AccessTokenService>,
    pub site: Arc<SiteSettings>,
}

impl AppState {
    pub fn resolve_coupon_handler(&self) -> ResolveCouponHandler {
        ResolveCouponHandler::new(self.payment_provider.clone())
    }

    pub fn get_price_handler(&self) -> GetPriceHandler {
        GetPriceHandler::new(self.payment_provider.clone())
    }

    pub fn quote_price_handler(&self) -> QuotePriceHandler {
        QuotePriceHandler::new(
            self.payment_provider.clone(),
            self.site.bundle_tiers.clone(),
            self.site.add_on.clone(),
        )
    }

    pub fn create_checkout_session_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(
            self.payment_provider.clone(),
            self.site.bundle_tiers.clone(),
            self.site.add_on.clone(),
            CheckoutUrls::for_site(&self.site.base_url),
        )
    }

    pub fn notification_dispatcher(&self) -> NotificationDispatcher {
        NotificationDispatcher::new(self.notifier.clone(), self.payment_provider.clone())
    }

    pub fn generate_feedback_link_handler(&self) -> GenerateFeedbackLinkHandler {
        GenerateFeedbackLinkHandler::new(
            self.speaker_directory.clone(),
            self.access_tokens.clone(),
            self.site.base_url.clone(),
            self.site.token_ttl,
        )
    }

    pub fn redeem_feedback_handler(&self) -> RedeemFeedbackHandler {
        RedeemFeedbackHandler::new(self.speaker_directory.clone(), self.access_tokens.clone())
    }

    pub fn process_referral_handler(&self) -> ProcessReferralHandler {
        ProcessReferralHandler::new(self.referral_ledger.clone())
    }
}
