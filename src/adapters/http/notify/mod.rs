//! HTTP adapter for checkout lifecycle notifications.
//!
//! - `POST /notify/purchase-success`
//! - `POST /notify/checkout-cancelled`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::notify_routes;
