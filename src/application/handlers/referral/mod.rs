//! Referral handlers.

mod process_referral;

pub use process_referral::{ProcessReferralCommand, ProcessReferralHandler, ProcessReferralResult};
