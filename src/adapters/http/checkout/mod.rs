//! HTTP adapter for checkout endpoints.
//!
//! - `GET /validate-coupon` - Resolve a coupon code
//! - `GET /get-price` - Fetch a price
//! - `POST /price-quote` - Display price with discounts applied
//! - `POST /checkout-sessions` - Create a checkout session

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::checkout_routes;
