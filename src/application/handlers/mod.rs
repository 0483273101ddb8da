//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod checkout;
pub mod feedback;
mod input;
pub mod notification;
pub mod referral;

pub use checkout::{
    // Commands
    CheckoutUrls,
    CreateCheckoutSessionCommand,
    CreateCheckoutSessionHandler,
    CreateCheckoutSessionResult,
    // Queries
    AddOnOffer,
    GetPriceHandler,
    GetPriceQuery,
    GetPriceResult,
    QuotePriceHandler,
    QuotePriceQuery,
    QuotePriceResult,
    ResolveCouponHandler,
    ResolveCouponQuery,
    ResolveCouponResult,
};
pub use feedback::{
    GenerateFeedbackLinkCommand, GenerateFeedbackLinkHandler, GenerateFeedbackLinkResult,
    RedeemFeedbackHandler, RedeemFeedbackQuery, RedeemFeedbackResult,
};
pub use notification::NotificationDispatcher;
pub use referral::{ProcessReferralCommand, ProcessReferralHandler, ProcessReferralResult};
