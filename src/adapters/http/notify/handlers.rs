//! HTTP handlers for best-effort notifications.
//!
//! These endpoints never return an error body: a malformed payload or a
//! delivery failure is reported as `{success:false, error}` with status 500.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::state::AppState;
use crate::domain::notification::{CheckoutEvent, DispatchOutcome};

use super::dto::{CheckoutCancelledRequest, PurchaseSuccessRequest};

/// POST /notify/purchase-success
pub async fn purchase_success(
    State(state): State<AppState>,
    payload: Result<Json<PurchaseSuccessRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(req)) => dispatch(&state, req.into()).await,
        Err(rejection) => outcome_response(DispatchOutcome::failed(rejection.body_text())),
    }
}

/// POST /notify/checkout-cancelled
pub async fn checkout_cancelled(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutCancelledRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(req)) => dispatch(&state, req.into()).await,
        Err(rejection) => outcome_response(DispatchOutcome::failed(rejection.body_text())),
    }
}

async fn dispatch(state: &AppState, event: CheckoutEvent) -> Response {
    let outcome = state.notification_dispatcher().dispatch(event).await;
    outcome_response(outcome)
}

fn outcome_response(outcome: DispatchOutcome) -> Response {
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(outcome)).into_response()
}
