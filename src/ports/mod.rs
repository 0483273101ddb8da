//! Ports - interfaces between the application core and the outside world.
//!
//! Each port is a trait implemented by one or more adapters. Handlers depend
//! on `Arc<dyn Port>` so production and test adapters are interchangeable.

mod access_tokens;
mod ops_notifier;
mod payment_provider;
mod referral_ledger;
mod speaker_directory;

pub use access_tokens::AccessTokenService;
pub use ops_notifier::{NotifyError, OpsNotifier};
pub use payment_provider::{
    CheckoutCharge, CheckoutSession, CheckoutSessionDetails, CreateCheckoutRequest, PaymentError,
    PaymentErrorCode, PaymentProvider, METADATA_COUPON_CODE, METADATA_PRICE_ID,
    METADATA_QUANTITY, METADATA_QUOTED_TOTAL,
};
pub use referral_ledger::{CreditEntry, ReferralLedger, Referrer};
pub use speaker_directory::SpeakerDirectory;
