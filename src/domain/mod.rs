//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (currency, errors)
//! - `checkout` - Coupons and prices as the payment provider reports them
//! - `pricing` - Bundle tiers and the ordered discount pipeline
//! - `referral` - Fixed referral credit table
//! - `access` - Capability token types
//! - `notification` - Checkout lifecycle events and message formatting
//! - `speaker` - Speakers and their session feedback

pub mod access;
pub mod checkout;
pub mod foundation;
pub mod notification;
pub mod pricing;
pub mod referral;
pub mod speaker;
