//! Checkout Core - checkout, discount and speaker feedback service.
//!
//! Validates coupons against the payment provider, computes display prices
//! (bundle tier, coupon, referral credit), opens checkout sessions, reports
//! checkout events to the operations channel, and issues login-free feedback
//! links for speakers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
