//! Axum routes for notification endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{checkout_cancelled, purchase_success};

/// Create the notification router, mounted under `/notify`.
pub fn notify_routes() -> Router<AppState> {
    Router::new()
        .route("/purchase-success", post(purchase_success))
        .route("/checkout-cancelled", post(checkout_cancelled))
}
