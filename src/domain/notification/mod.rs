//! Checkout lifecycle events and their operator-facing messages.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Currency;
use crate::domain::pricing::format_amount;

/// A checkout lifecycle event reported to the operations channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutEvent {
    PurchaseSuccess {
        session_id: String,
        workshop_id: String,
        email: Option<String>,
    },
    CheckoutCancelled {
        workshop_id: String,
        workshop_title: Option<String>,
        reason: Option<String>,
        email: Option<String>,
    },
}

impl CheckoutEvent {
    pub fn kind(&self) -> CheckoutEventKind {
        match self {
            CheckoutEvent::PurchaseSuccess { .. } => CheckoutEventKind::PurchaseSuccess,
            CheckoutEvent::CheckoutCancelled { .. } => CheckoutEventKind::CheckoutCancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckoutEventKind {
    PurchaseSuccess,
    CheckoutCancelled,
}

impl fmt::Display for CheckoutEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutEventKind::PurchaseSuccess => write!(f, "purchase-success"),
            CheckoutEventKind::CheckoutCancelled => write!(f, "checkout-cancelled"),
        }
    }
}

/// Discount details recovered from the provider's session metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscountInfo {
    pub coupon_code: Option<String>,
    pub amount_total: Option<i64>,
    pub currency: Option<Currency>,
}

/// Formats the message for `event`.
///
/// `discount` is only consulted for purchases. `None` means the session
/// could not be re-read and renders as "no discount info".
pub fn format_message(event: &CheckoutEvent, discount: Option<&DiscountInfo>) -> String {
    match event {
        CheckoutEvent::PurchaseSuccess {
            session_id,
            workshop_id,
            email,
        } => {
            let mut lines = vec![
                "🎉 New purchase".to_string(),
                format!("Workshop: {}", workshop_id),
                format!("Customer: {}", email.as_deref().unwrap_or("unknown")),
                format!("Session: {}", session_id),
            ];
            match discount {
                Some(info) => {
                    if let (Some(amount), Some(currency)) = (info.amount_total, &info.currency) {
                        lines.push(format!("Amount: {}", format_amount(amount, currency)));
                    }
                    lines.push(match &info.coupon_code {
                        Some(code) => format!("Coupon: {}", code),
                        None => "Coupon: none".to_string(),
                    });
                }
                None => lines.push("Coupon: no discount info".to_string()),
            }
            lines.join("\n")
        }
        CheckoutEvent::CheckoutCancelled {
            workshop_id,
            workshop_title,
            reason,
            email,
        } => {
            let workshop = match workshop_title {
                Some(title) => format!("{} ({})", title, workshop_id),
                None => workshop_id.clone(),
            };
            [
                "⚠️ Checkout cancelled".to_string(),
                format!("Workshop: {}", workshop),
                format!("Customer: {}", email.as_deref().unwrap_or("unknown")),
                format!("Reason: {}", reason.as_deref().unwrap_or("not given")),
            ]
            .join("\n")
        }
    }
}

/// Result of a best-effort dispatch. Always returned, never an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchOutcome {
    pub fn delivered() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
