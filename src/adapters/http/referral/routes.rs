//! Axum routes for referral endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::process_referral;

/// Create the referral router, mounted under `/referrals`.
pub fn referral_routes() -> Router<AppState> {
    Router::new().route("/process", post(process_referral))
}
