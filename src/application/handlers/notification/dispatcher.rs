//! NotificationDispatcher - best-effort delivery of checkout events.
//!
//! Never returns an error. Every failure is logged and folded into the
//! returned [`DispatchOutcome`] so a notification problem cannot turn into a
//! checkout failure.

use std::sync::Arc;

use crate::domain::checkout::ProviderId;
use crate::domain::notification::{format_message, CheckoutEvent, DiscountInfo, DispatchOutcome};
use crate::ports::{OpsNotifier, PaymentProvider};

/// Dispatches checkout lifecycle events to the operations channel.
pub struct NotificationDispatcher {
    notifier: Arc<dyn OpsNotifier>,
    provider: Arc<dyn PaymentProvider>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn OpsNotifier>, provider: Arc<dyn PaymentProvider>) -> Self {
        Self { notifier, provider }
    }

    pub async fn dispatch(&self, event: CheckoutEvent) -> DispatchOutcome {
        let discount = match &event {
            CheckoutEvent::PurchaseSuccess { session_id, .. } => {
                self.discount_info(session_id).await
            }
            CheckoutEvent::CheckoutCancelled { .. } => None,
        };
        let message = format_message(&event, discount.as_ref());

        match self.notifier.send(&message).await {
            Ok(()) => {
                tracing::info!(event = %event.kind(), "Notification delivered");
                DispatchOutcome::delivered()
            }
            Err(e) => {
                tracing::warn!(event = %event.kind(), error = %e, "Notification delivery failed");
                DispatchOutcome::failed(e.to_string())
            }
        }
    }

    /// Re-reads the session for coupon and amount. Any failure degrades to `None`.
    async fn discount_info(&self, session_id: &str) -> Option<DiscountInfo> {
        if session_id.trim().is_empty() {
            return None;
        }
        let session_id = match ProviderId::try_new("sessionId", session_id) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed session ID, sending without discount info");
                return None;
            }
        };

        match self.provider.retrieve_checkout_session(&session_id).await {
            Ok(session) => Some(DiscountInfo {
                coupon_code: session.coupon_code().map(str::to_string),
                amount_total: session.amount_total,
                currency: session.currency,
            }),
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "Could not read checkout session for notification"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notifications::RecordingNotifier;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::foundation::Currency;
    use crate::ports::{CheckoutSessionDetails, NotifyError, PaymentError};
    use std::collections::HashMap;

    fn purchase(session_id: &str) -> CheckoutEvent {
        CheckoutEvent::PurchaseSuccess {
            session_id: session_id.to_string(),
            workshop_id: "rust-101".to_string(),
            email: Some("ada@example.com".to_string()),
        }
    }

    fn cancelled() -> CheckoutEvent {
        CheckoutEvent::CheckoutCancelled {
            workshop_id: "rust-101".to_string(),
            workshop_title: Some("Rust 101".to_string()),
            reason: Some("changed mind".to_string()),
            email: None,
        }
    }

    fn session_with_coupon() -> CheckoutSessionDetails {
        let mut metadata = HashMap::new();
        metadata.insert("couponCode".to_string(), "SPRING20".to_string());
        CheckoutSessionDetails {
            id: "cs_test_1".to_string(),
            metadata,
            amount_total: Some(21_600),
            currency: Some(Currency::try_new("cad").unwrap()),
            customer_email: Some("ada@example.com".to_string()),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn purchase_message_carries_session_coupon() {
        let notifier = RecordingNotifier::new();
        let provider = MockPaymentProvider::new();
        provider.add_session(session_with_coupon());
        let dispatcher = NotificationDispatcher::new(Arc::new(notifier.clone()), Arc::new(provider));

        let outcome = dispatcher.dispatch(purchase("cs_test_1")).await;

        assert_eq!(outcome, DispatchOutcome::delivered());
        let message = notifier.last_message().unwrap();
        assert!(message.contains("Coupon: SPRING20"));
        assert!(message.contains("CAD 216.00"));
    }

    #[tokio::test]
    async fn unreadable_session_degrades_to_no_discount_info() {
        let notifier = RecordingNotifier::new();
        let provider = MockPaymentProvider::new();
        provider.set_error(PaymentError::network("connection reset"));
        let dispatcher = NotificationDispatcher::new(Arc::new(notifier.clone()), Arc::new(provider));

        let outcome = dispatcher.dispatch(purchase("cs_test_1")).await;

        assert!(outcome.success);
        assert!(notifier.last_message().unwrap().contains("no discount info"));
    }

    #[tokio::test]
    async fn empty_session_id_skips_lookup() {
        let notifier = RecordingNotifier::new();
        let provider = MockPaymentProvider::new();
        let dispatcher =
            NotificationDispatcher::new(Arc::new(notifier.clone()), Arc::new(provider.clone()));

        dispatcher.dispatch(purchase("  ")).await;

        assert!(provider.calls().is_empty());
        assert_eq!(notifier.messages().len(), 1);
    }

    #[tokio::test]
    async fn malformed_session_id_never_reaches_provider() {
        let notifier = RecordingNotifier::new();
        let provider = MockPaymentProvider::new();
        let dispatcher =
            NotificationDispatcher::new(Arc::new(notifier.clone()), Arc::new(provider.clone()));

        let outcome = dispatcher.dispatch(purchase("../../v1/customers/cus_x")).await;

        assert!(outcome.success);
        assert!(provider.calls().is_empty());
        assert!(notifier.last_message().unwrap().contains("no discount info"));
    }

    #[tokio::test]
    async fn cancellation_does_not_touch_provider() {
        let notifier = RecordingNotifier::new();
        let provider = MockPaymentProvider::new();
        let dispatcher =
            NotificationDispatcher::new(Arc::new(notifier.clone()), Arc::new(provider.clone()));

        let outcome = dispatcher.dispatch(cancelled()).await;

        assert!(outcome.success);
        assert!(provider.calls().is_empty());
        assert!(notifier.last_message().unwrap().contains("Rust 101"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn delivery_failure_is_reported_not_raised() {
        let notifier = RecordingNotifier::failing(NotifyError::Rejected { status: 500 });
        let dispatcher =
            NotificationDispatcher::new(Arc::new(notifier), Arc::new(MockPaymentProvider::new()));

        let outcome = dispatcher.dispatch(cancelled()).await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("500"));
    }
}
