//! Axum routes for checkout endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{create_checkout_session, get_price, price_quote, validate_coupon};

/// Create the checkout router.
///
/// # Routes
/// - `GET /validate-coupon` - Resolve a coupon code
/// - `GET /get-price` - Fetch a price
/// - `POST /price-quote` - Display price with discounts
/// - `POST /checkout-sessions` - Create a checkout session
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/validate-coupon", get(validate_coupon))
        .route("/get-price", get(get_price))
        .route("/price-quote", post(price_quote))
        .route("/checkout-sessions", post(create_checkout_session))
}
