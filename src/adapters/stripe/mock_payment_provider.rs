//! Mock payment provider for testing.
//!
//! Provides a configurable in-memory implementation of `PaymentProvider` for
//! unit and integration tests. Supports:
//! - Pre-configured coupons and prices
//! - Sessions that can be read back with their metadata and charged total
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::checkout::{Coupon, CouponCode, Price, ProviderId};
use crate::domain::pricing::apply_coupon;
use crate::ports::{
    CheckoutSession, CheckoutSessionDetails, CreateCheckoutRequest, PaymentError,
    PaymentProvider,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.add_coupon(Coupon::percent_off("SPRING20", "SPRING20", dec!(20)));
/// mock.set_method_error("retrieve_price", PaymentError::network("down"));
///
/// let coupon = mock.retrieve_coupon(&code).await?;
/// assert_eq!(mock.call_count("retrieve_coupon"), 1);
/// ```
#[derive(Default)]
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Coupons keyed by code.
    coupons: HashMap<String, Coupon>,

    /// Prices keyed by ID.
    prices: HashMap<String, Price>,

    /// Sessions created or added, keyed by ID.
    sessions: HashMap<String, CheckoutSessionDetails>,

    /// Checkout requests in the order received.
    checkout_requests: Vec<CreateCheckoutRequest>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Make a coupon resolvable by its code.
    pub fn add_coupon(&self, coupon: Coupon) {
        let code = coupon.code.clone();
        self.state().coupons.insert(code, coupon);
    }

    /// Make a price resolvable by its ID.
    pub fn add_price(&self, price: Price) {
        let id = price.id.clone();
        self.state().prices.insert(id, price);
    }

    /// Add a session to the "provider".
    pub fn add_session(&self, session: CheckoutSessionDetails) {
        let id = session.id.clone();
        self.state().sessions.insert(id, session);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.state().method_errors.insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| c.method == method)
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// The most recent checkout request, if any.
    pub fn last_checkout_request(&self) -> Option<CreateCheckoutRequest> {
        self.state().checkout_requests.last().cloned()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.state().call_log.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.state().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.state();

        // Check method-specific error first
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Check global error (consumes it)
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockPaymentProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn retrieve_coupon(&self, code: &CouponCode) -> Result<Coupon, PaymentError> {
        self.record_call("retrieve_coupon", vec![code.to_string()]);
        self.check_error("retrieve_coupon")?;

        self.state()
            .coupons
            .get(code.as_str())
            .cloned()
            .ok_or_else(|| PaymentError::not_found("Coupon"))
    }

    async fn retrieve_price(&self, price_id: &ProviderId) -> Result<Price, PaymentError> {
        self.record_call("retrieve_price", vec![price_id.to_string()]);
        self.check_error("retrieve_price")?;

        self.state()
            .prices
            .get(price_id.as_str())
            .cloned()
            .ok_or_else(|| PaymentError::not_found("Price"))
    }

    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.record_call(
            "create_checkout_session",
            vec![
                request.price_id.to_string(),
                request.quantity.to_string(),
                request.email.clone().unwrap_or_default(),
            ],
        );
        self.check_error("create_checkout_session")?;

        let mut state = self.state();

        // A custom charge replaces the catalog line; the coupon then applies on top.
        let (subtotal, currency) = match &request.charge {
            Some(charge) => (charge.amount, charge.currency.clone()),
            None => {
                let price = state.prices.get(request.price_id.as_str()).ok_or_else(|| {
                    PaymentError::invalid_request(format!("No such price: '{}'", request.price_id))
                        .with_status(400)
                })?;
                (price.unit_amount * i64::from(request.quantity), price.currency.clone())
            }
        };

        let amount_total = match &request.coupon_code {
            Some(code) => {
                let coupon = state.coupons.get(code.as_str()).ok_or_else(|| {
                    PaymentError::invalid_request(format!("No such coupon: '{}'", code))
                        .with_status(400)
                })?;
                apply_coupon(subtotal, coupon, &currency)
            }
            None => subtotal,
        };

        let id = format!("cs_mock_{}", uuid::Uuid::new_v4().simple());
        state.sessions.insert(
            id.clone(),
            CheckoutSessionDetails {
                id: id.clone(),
                metadata: request.metadata.clone(),
                amount_total: Some(amount_total),
                currency: Some(currency),
                customer_email: request.email.clone(),
            },
        );
        state.checkout_requests.push(request);

        Ok(CheckoutSession {
            url: format!("https://checkout.stripe.com/c/pay/{}", id),
            id,
        })
    }

    async fn retrieve_checkout_session(
        &self,
        session_id: &ProviderId,
    ) -> Result<CheckoutSessionDetails, PaymentError> {
        self.record_call("retrieve_checkout_session", vec![session_id.to_string()]);
        self.check_error("retrieve_checkout_session")?;

        self.state()
            .sessions
            .get(session_id.as_str())
            .cloned()
            .ok_or_else(|| PaymentError::not_found("Checkout session"))
    }
}
