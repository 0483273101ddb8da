//! HTTP handlers for speaker feedback endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{GenerateFeedbackLinkCommand, RedeemFeedbackQuery};

use super::dto::{FeedbackLinkResponse, GenerateFeedbackLinkRequest, SpeakerFeedbackResponse};

/// POST /generate-feedback-link - Issue a login-free feedback link
pub async fn generate_feedback_link(
    State(state): State<AppState>,
    payload: Result<Json<GenerateFeedbackLinkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let result = state
        .generate_feedback_link_handler()
        .handle(GenerateFeedbackLinkCommand {
            speaker_id: req.speaker_id,
        })
        .await?;
    Ok(Json(FeedbackLinkResponse::from(result)))
}

/// GET /speaker-feedback/:token - Read feedback behind a link
///
/// Also mounted without the token segment so a missing token is a 400.
pub async fn speaker_feedback(
    State(state): State<AppState>,
    token: Option<Path<String>>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .redeem_feedback_handler()
        .handle(RedeemFeedbackQuery {
            token: token.map(|Path(t)| t),
        })
        .await?;
    Ok(Json(SpeakerFeedbackResponse::from(result)))
}
