//! HTTP handlers for referral endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::ProcessReferralCommand;

use super::dto::{ProcessReferralRequest, ProcessReferralResponse};

/// POST /referrals/process - Credit a referrer for a referred purchase
pub async fn process_referral(
    State(state): State<AppState>,
    payload: Result<Json<ProcessReferralRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let result = state
        .process_referral_handler()
        .handle(ProcessReferralCommand {
            referrer_id: req.referrer_id,
            user_id: req.user_id,
            purchase_type: req.purchase_type,
        })
        .await?;
    Ok(Json(ProcessReferralResponse::from(result)))
}
