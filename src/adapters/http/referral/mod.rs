//! HTTP adapter for referral credits.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::referral_routes;
