//! Speaker feedback handlers.
//!
//! ## Commands
//! - Generate a login-free feedback link
//!
//! ## Queries
//! - Redeem a feedback link

mod generate_link;
mod redeem;

pub use generate_link::{
    GenerateFeedbackLinkCommand, GenerateFeedbackLinkHandler, GenerateFeedbackLinkResult,
};
pub use redeem::{RedeemFeedbackHandler, RedeemFeedbackQuery, RedeemFeedbackResult};
