//! Axum routes for speaker feedback endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{generate_feedback_link, speaker_feedback};

/// Create the feedback router.
///
/// # Routes
/// - `POST /generate-feedback-link` - Issue a feedback link
/// - `GET /speaker-feedback/:token` - Redeem a feedback link
/// - `GET /speaker-feedback[/]` - Missing token, answered with 400
pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-feedback-link", post(generate_feedback_link))
        .route("/speaker-feedback/:token", get(speaker_feedback))
        .route("/speaker-feedback/", get(speaker_feedback))
        .route("/speaker-feedback", get(speaker_feedback))
}
