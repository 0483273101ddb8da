//! Operations notification port.
//!
//! Delivers short plain-text messages to the channel operators watch (a Slack
//! incoming webhook in production). Delivery is best-effort; callers decide
//! how to report a failure and must never fail a checkout because of one.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from notification delivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// The channel could not be reached.
    #[error("Notification channel unreachable: {0}")]
    Unreachable(String),

    /// The channel answered with a non-success status.
    #[error("Notification channel rejected message with status {status}")]
    Rejected { status: u16 },
}

/// Port for sending operator-facing messages.
#[async_trait]
pub trait OpsNotifier: Send + Sync {
    /// Send one message.
    async fn send(&self, message: &str) -> Result<(), NotifyError>;
}
