//! Operations notification configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Notification configuration (Slack incoming webhook)
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Incoming webhook URL. When unset, messages are only logged.
    pub slack_webhook_url: Option<SecretString>,

    /// Delivery timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl NotificationConfig {
    /// Webhook URL if one is configured and non-empty
    pub fn webhook_url(&self) -> Option<&SecretString> {
        self.slack_webhook_url
            .as_ref()
            .filter(|url| !url.expose_secret().trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate notification configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        if let Some(url) = self.webhook_url() {
            if production && !url.expose_secret().starts_with("https://") {
                return Err(ValidationError::MustBeHttps("Slack webhook URL"));
            }
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            slack_webhook_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    5
}
