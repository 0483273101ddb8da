//! Mapping from [`CheckoutError`] to HTTP responses.
//!
//! Provider and internal failures are logged where they happen; the client
//! only ever receives the redacted message carried by the error.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{CheckoutError, ErrorCode};

/// Message returned for every unexpected failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Standard error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// Error returned by every HTTP handler.
#[derive(Debug)]
pub struct ApiError(pub CheckoutError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            CheckoutError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CheckoutError::NotFound(_) => StatusCode::NOT_FOUND,
            CheckoutError::Unauthorized => StatusCode::UNAUTHORIZED,
            CheckoutError::Provider { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            CheckoutError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            CheckoutError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CheckoutError::invalid_input(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(CheckoutError::invalid_input(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let CheckoutError::Internal(detail) = &self.0 {
            tracing::error!(detail = %detail, "Request failed with internal error");
        }
        let status = self.status();
        let code: ErrorCode = self.0.code();
        let body = ErrorResponse::new(code.to_string(), self.message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CheckoutError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn taxonomy_maps_to_statuses() {
        assert_eq!(status_of(CheckoutError::invalid_input("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(CheckoutError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(CheckoutError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(CheckoutError::internal("db on fire")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn provider_status_is_passed_through() {
        assert_eq!(
            status_of(CheckoutError::provider(Some(402), "card declined")),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            status_of(CheckoutError::provider(None, "unreachable")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        // Non-error statuses are never forwarded
        assert_eq!(
            status_of(CheckoutError::provider(Some(302), "redirect")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = ApiError(CheckoutError::internal("secret path /etc/x"));
        assert_eq!(err.message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn unauthorized_message_is_generic() {
        let err = ApiError(CheckoutError::Unauthorized);
        assert_eq!(err.message(), "Invalid or expired token");
    }

    #[test]
    fn error_response_serializes_camel_case() {
        let json = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "Invalid coupon code")).unwrap();
        assert_eq!(json["errorCode"], "NOT_FOUND");
        assert_eq!(json["message"], "Invalid coupon code");
    }
}
