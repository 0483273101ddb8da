//! Request DTOs for notification endpoints.

use serde::Deserialize;

use crate::domain::notification::CheckoutEvent;

/// Body of `POST /notify/purchase-success`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseSuccessRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub workshop_id: String,
    pub email: Option<String>,
}

impl From<PurchaseSuccessRequest> for CheckoutEvent {
    fn from(req: PurchaseSuccessRequest) -> Self {
        CheckoutEvent::PurchaseSuccess {
            session_id: req.session_id,
            workshop_id: req.workshop_id,
            email: req.email,
        }
    }
}

/// Body of `POST /notify/checkout-cancelled`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutCancelledRequest {
    #[serde(default)]
    pub workshop_id: String,
    pub workshop_title: Option<String>,
    pub reason: Option<String>,
    pub email: Option<String>,
}

impl From<CheckoutCancelledRequest> for CheckoutEvent {
    fn from(req: CheckoutCancelledRequest) -> Self {
        CheckoutEvent::CheckoutCancelled {
            workshop_id: req.workshop_id,
            workshop_title: req.workshop_title,
            reason: req.reason,
            email: req.email,
        }
    }
}
