//! HTTP handlers for checkout endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    CreateCheckoutSessionCommand, GetPriceQuery, QuotePriceQuery, ResolveCouponQuery,
};

use super::dto::{
    CheckoutSessionResponse, CouponResponse, CreateCheckoutSessionRequest, GetPriceParams,
    PriceQuoteRequest, PriceQuoteResponse, ValidateCouponParams,
};

/// GET /validate-coupon?code=... - Resolve a coupon code
pub async fn validate_coupon(
    State(state): State<AppState>,
    params: Result<Query<ValidateCouponParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let coupon = state
        .resolve_coupon_handler()
        .handle(ResolveCouponQuery { code: params.code })
        .await?;
    Ok(Json(CouponResponse::from(coupon)))
}

/// GET /get-price?priceId=... - Fetch a price
pub async fn get_price(
    State(state): State<AppState>,
    params: Result<Query<GetPriceParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let price = state
        .get_price_handler()
        .handle(GetPriceQuery {
            price_id: params.price_id,
        })
        .await?;
    Ok(Json(price))
}

/// POST /price-quote - Compute a display price with all discounts
pub async fn price_quote(
    State(state): State<AppState>,
    payload: Result<Json<PriceQuoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let result = state
        .quote_price_handler()
        .handle(QuotePriceQuery {
            price_id: req.price_id,
            quantity: req.quantity,
            coupon_code: req.coupon_code,
            add_on_quantity: req.tshirt_quantity,
            referral_category: req.referral_category,
        })
        .await?;
    Ok(Json(PriceQuoteResponse::from(result)))
}

/// POST /checkout-sessions - Create a payment checkout session
pub async fn create_checkout_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateCheckoutSessionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let result = state
        .create_checkout_session_handler()
        .handle(CreateCheckoutSessionCommand {
            price_id: req.price_id,
            quantity: req.quantity,
            email: req.email,
            coupon_code: req.coupon_code,
            add_on_quantity: req.tshirt_quantity,
            referral_category: req.referral_category,
        })
        .await?;
    Ok(Json(CheckoutSessionResponse::from(result)))
}
