//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait over Stripe's REST API: coupon and
//! price lookups plus one-time payment checkout sessions.
//!
//! # Security
//!
//! - The API key is held as `secrecy::SecretString` and only exposed to build
//!   the basic-auth header
//! - Raw Stripe error bodies are logged server-side and never returned to callers
//! - Object IDs reach URL paths only as `ProviderId`/`CouponCode`, which admit
//!   no path separators
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key);
//! let adapter = StripePaymentAdapter::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::domain::checkout::{Coupon, CouponCode, Price, ProviderId};
use crate::ports::{
    CheckoutSession, CheckoutSessionDetails, CreateCheckoutRequest, PaymentError,
    PaymentErrorCode, PaymentProvider,
};

use super::api_types::{StripeCheckoutSession, StripeCoupon, StripeErrorEnvelope, StripePrice};

/// Default Stripe API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Per-request timeout.
    timeout: Duration,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(SecretString::new(api_key.into()))
    }

    /// Create a configuration from an already-wrapped key.
    pub fn from_secret(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<T, PaymentError> {
        let response = self
            .http_client
            .get(self.url(path))
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(operation, error = %e, "Stripe request failed");
                PaymentError::network(e.to_string())
            })?;

        Self::parse_response(operation, response).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, PaymentError> {
        let response = self
            .http_client
            .post(self.url(path))
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(operation, error = %e, "Stripe request failed");
                PaymentError::network(e.to_string())
            })?;

        Self::parse_response(operation, response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<T, PaymentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_from_body(operation, status.as_u16(), &body));
        }

        response.json().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to parse Stripe response");
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })
    }

    /// Map a non-2xx Stripe response into a `PaymentError`, logging the raw body.
    fn error_from_body(operation: &'static str, status: u16, body: &str) -> PaymentError {
        let api_error = serde_json::from_str::<StripeErrorEnvelope>(body)
            .ok()
            .map(|e| e.error);

        tracing::error!(
            operation,
            status,
            stripe_code = api_error.as_ref().and_then(|e| e.code.as_deref()),
            stripe_type = api_error.as_ref().and_then(|e| e.error_type.as_deref()),
            error = %body,
            "Stripe API error"
        );

        let code = match api_error.as_ref().and_then(|e| e.code.as_deref()) {
            Some("resource_missing") => PaymentErrorCode::NotFound,
            _ => PaymentErrorCode::from_status(status),
        };
        let message = api_error
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| format!("Stripe API error ({})", status));

        let mut err = PaymentError::new(code, message).with_status(status);
        if let Some(provider_code) = api_error.and_then(|e| e.code) {
            err = err.with_provider_code(provider_code);
        }
        err
    }

    /// Form parameters for a payment-mode checkout session.
    fn checkout_params(request: &CreateCheckoutRequest) -> Vec<(String, String)> {
        let mut params = vec![("mode".to_string(), "payment".to_string())];

        match &request.charge {
            Some(charge) => params.extend([
                (
                    "line_items[0][price_data][currency]".to_string(),
                    charge.currency.as_str().to_string(),
                ),
                (
                    "line_items[0][price_data][unit_amount]".to_string(),
                    charge.amount.to_string(),
                ),
                (
                    "line_items[0][price_data][product_data][name]".to_string(),
                    charge.description.clone(),
                ),
                ("line_items[0][quantity]".to_string(), "1".to_string()),
            ]),
            None => params.extend([
                (
                    "line_items[0][price]".to_string(),
                    request.price_id.to_string(),
                ),
                (
                    "line_items[0][quantity]".to_string(),
                    request.quantity.to_string(),
                ),
            ]),
        }

        params.push(("success_url".to_string(), request.success_url.clone()));
        params.push(("cancel_url".to_string(), request.cancel_url.clone()));

        if let Some(email) = &request.email {
            params.push(("customer_email".to_string(), email.clone()));
        }

        if let Some(coupon) = &request.coupon_code {
            params.push(("discounts[0][coupon]".to_string(), coupon.as_str().to_string()));
        }

        let mut metadata: Vec<_> = request.metadata.iter().collect();
        metadata.sort();
        for (key, value) in metadata {
            params.push((format!("metadata[{}]", key), value.clone()));
        }

        params
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn retrieve_coupon(&self, code: &CouponCode) -> Result<Coupon, PaymentError> {
        let stripe_coupon: StripeCoupon = self
            .get("retrieve_coupon", &format!("/v1/coupons/{}", code.as_str()))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PaymentError::not_found("Coupon")
                } else {
                    e
                }
            })?;

        tracing::debug!(coupon_id = %stripe_coupon.id, valid = stripe_coupon.valid, "Coupon retrieved");
        stripe_coupon.into_coupon(code)
    }

    async fn retrieve_price(&self, price_id: &ProviderId) -> Result<Price, PaymentError> {
        let stripe_price: StripePrice = self
            .get("retrieve_price", &format!("/v1/prices/{}", price_id))
            .await?;

        Price::try_from(stripe_price)
    }

    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let params = Self::checkout_params(&request);
        let session: StripeCheckoutSession = self
            .post_form("create_checkout_session", "/v1/checkout/sessions", &params)
            .await?;

        let url = session.url.ok_or_else(|| {
            tracing::error!(session_id = %session.id, "Stripe session created without a URL");
            PaymentError::provider("Checkout session has no redirect URL")
        })?;

        tracing::info!(
            session_id = %session.id,
            price_id = %request.price_id,
            quantity = request.quantity,
            charge = request.charge.as_ref().map(|c| c.amount),
            coupon = request.coupon_code.as_ref().map(|c| c.as_str()),
            "Checkout session created"
        );

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }

    async fn retrieve_checkout_session(
        &self,
        session_id: &ProviderId,
    ) -> Result<CheckoutSessionDetails, PaymentError> {
        let session: StripeCheckoutSession = self
            .get(
                "retrieve_checkout_session",
                &format!("/v1/checkout/sessions/{}", session_id),
            )
            .await?;

        Ok(session.into())
    }
}

impl std::fmt::Debug for StripePaymentAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripePaymentAdapter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::application::handlers::{GetPriceHandler, GetPriceQuery};
    use crate::domain::foundation::{CheckoutError, Currency};
    use crate::ports::CheckoutCharge;
    use wiremock::matchers::{body_string_contains, header_exists, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn adapter_for(server: &MockServer) -> StripePaymentAdapter {
        let config = StripeConfig::new("sk_test_123").with_base_url(server.uri());
        StripePaymentAdapter::new(config).unwrap()
    }

    fn checkout_request() -> CreateCheckoutRequest {
        let mut metadata = HashMap::new();
        metadata.insert("couponCode".to_string(), "SPRING20".to_string());
        metadata.insert("priceId".to_string(), "price_123".to_string());
        CreateCheckoutRequest {
            price_id: ProviderId::try_new("priceId", "price_123").unwrap(),
            quantity: 3,
            charge: None,
            email: Some("ada@example.com".to_string()),
            coupon_code: Some(CouponCode::try_new("SPRING20").unwrap()),
            success_url: "https://site.test/success?session_id={CHECKOUT_SESSION_ID}".to_string(),
            cancel_url: "https://site.test/cancel".to_string(),
            metadata,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Request Building Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn checkout_params_include_discount_and_metadata() {
        let params = StripePaymentAdapter::checkout_params(&checkout_request());
        let find = |k: &str| params.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());

        assert_eq!(find("mode"), Some("payment"));
        assert_eq!(find("line_items[0][quantity]"), Some("3"));
        assert_eq!(find("discounts[0][coupon]"), Some("SPRING20"));
        assert_eq!(find("metadata[couponCode]"), Some("SPRING20"));
        assert_eq!(find("customer_email"), Some("ada@example.com"));
    }

    #[test]
    fn custom_charge_replaces_catalog_line() {
        let mut request = checkout_request();
        request.charge = Some(CheckoutCharge {
            description: "3 × Ticket".to_string(),
            amount: 27_000,
            currency: Currency::try_new("CAD").unwrap(),
        });
        let params = StripePaymentAdapter::checkout_params(&request);
        let find = |k: &str| params.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());

        assert_eq!(find("line_items[0][price]"), None);
        assert_eq!(find("line_items[0][price_data][unit_amount]"), Some("27000"));
        assert_eq!(find("line_items[0][price_data][currency]"), Some("cad"));
        assert_eq!(find("line_items[0][price_data][product_data][name]"), Some("3 × Ticket"));
        assert_eq!(find("line_items[0][quantity]"), Some("1"));
        assert_eq!(find("discounts[0][coupon]"), Some("SPRING20"));
    }

    #[test]
    fn checkout_params_omit_absent_optionals() {
        let mut request = checkout_request();
        request.email = None;
        request.coupon_code = None;
        let params = StripePaymentAdapter::checkout_params(&request);

        assert!(!params.iter().any(|(k, _)| k == "customer_email"));
        assert!(!params.iter().any(|(k, _)| k == "discounts[0][coupon]"));
    }

    #[test]
    fn error_body_resource_missing_maps_to_not_found() {
        let body = r#"{"error": {"code": "resource_missing", "message": "No such price: 'price_x'", "type": "invalid_request_error"}}"#;
        let err = StripePaymentAdapter::error_from_body("retrieve_price", 400, body);
        assert_eq!(err.code, PaymentErrorCode::NotFound);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.provider_code.as_deref(), Some("resource_missing"));
    }

    #[test]
    fn non_json_error_body_falls_back_to_status() {
        let err = StripePaymentAdapter::error_from_body("retrieve_price", 502, "<html>");
        assert_eq!(err.code, PaymentErrorCode::ProviderError);
        assert_eq!(err.status, Some(502));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = StripeConfig::new("sk_test_secret_value");
        assert!(!format!("{:?}", config).contains("sk_test_secret_value"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // HTTP Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn retrieve_coupon_hits_coupon_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/coupons/SPRING20"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "SPRING20",
                "object": "coupon",
                "percent_off": 20.0,
                "valid": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = adapter_for(&server).await;
        let coupon = adapter
            .retrieve_coupon(&CouponCode::try_new("SPRING20").unwrap())
            .await
            .unwrap();

        assert_eq!(coupon.code, "SPRING20");
        assert!(coupon.is_valid);
    }

    #[tokio::test]
    async fn missing_coupon_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/coupons/DOESNOTEXIST"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {
                    "code": "resource_missing",
                    "message": "No such coupon: 'DOESNOTEXIST'",
                    "type": "invalid_request_error"
                }
            })))
            .mount(&server)
            .await;

        let adapter = adapter_for(&server).await;
        let err = adapter
            .retrieve_coupon(&CouponCode::try_new("DOESNOTEXIST").unwrap())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.status, Some(404));
    }

    #[tokio::test]
    async fn create_checkout_session_returns_redirect_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(body_string_contains("discounts%5B0%5D%5Bcoupon%5D=SPRING20"))
            .and(body_string_contains("metadata%5BcouponCode%5D=SPRING20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cs_test_1",
                "object": "checkout.session",
                "url": "https://checkout.stripe.com/c/pay/cs_test_1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = adapter_for(&server).await;
        let session = adapter
            .create_checkout_session(checkout_request())
            .await
            .unwrap();

        assert_eq!(session.id, "cs_test_1");
        assert_eq!(session.url, "https://checkout.stripe.com/c/pay/cs_test_1");
    }

    #[tokio::test]
    async fn rejected_session_keeps_provider_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "message": "No such price: 'price_123'",
                    "type": "invalid_request_error"
                }
            })))
            .mount(&server)
            .await;

        let adapter = adapter_for(&server).await;
        let err = adapter
            .create_checkout_session(checkout_request())
            .await
            .unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::InvalidRequest);
        assert_eq!(err.status, Some(400));
    }

    #[tokio::test]
    async fn retrieve_checkout_session_reads_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_test_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cs_test_1",
                "amount_total": 21600,
                "currency": "cad",
                "metadata": {"couponCode": "SPRING20"}
            })))
            .mount(&server)
            .await;

        let adapter = adapter_for(&server).await;
        let details = adapter
            .retrieve_checkout_session(&ProviderId::try_new("sessionId", "cs_test_1").unwrap())
            .await
            .unwrap();

        assert_eq!(details.coupon_code(), Some("SPRING20"));
        assert_eq!(details.amount_total, Some(21600));
    }

    #[tokio::test]
    async fn path_like_price_id_never_reaches_stripe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(".*"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cus_secret",
                "object": "customer"
            })))
            .expect(0)
            .mount(&server)
            .await;

        let adapter = adapter_for(&server).await;
        let handler = GetPriceHandler::new(Arc::new(adapter));
        let err = handler
            .handle(GetPriceQuery {
                price_id: Some("../customers/cus_secret".to_string()),
            })
            .await
            .unwrap_err();

        assert_eq!(err, CheckoutError::invalid_input("Invalid priceId"));
        let received = server.received_requests().await.unwrap_or_default();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn retrieve_price_stays_under_prices_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/prices/price_1NxAbc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "price_1NxAbc",
                "object": "price",
                "unit_amount": 10000,
                "currency": "cad",
                "type": "one_time"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = adapter_for(&server).await;
        let price = adapter
            .retrieve_price(&ProviderId::try_new("priceId", "price_1NxAbc").unwrap())
            .await
            .unwrap();

        assert_eq!(price.unit_amount, 10_000);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Type Safety Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn stripe_adapter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StripePaymentAdapter>();
    }
}
