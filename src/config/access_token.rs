//! Capability token configuration

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::access::DEFAULT_TOKEN_TTL_DAYS;

/// Minimum HS256 secret length
pub const MIN_SECRET_LEN: usize = 32;

/// Signing configuration for feedback links
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenConfig {
    /// HS256 signing secret
    pub secret: SecretString,

    /// Token lifetime in days
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
}

impl AccessTokenConfig {
    pub fn ttl(&self) -> Duration {
        Duration::days(self.ttl_days)
    }

    /// Validate token configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("ACCESS_TOKEN__SECRET"));
        }
        if secret.len() < MIN_SECRET_LEN {
            return Err(ValidationError::SecretTooShort(MIN_SECRET_LEN));
        }
        if !(1..=365).contains(&self.ttl_days) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

fn default_ttl_days() -> i64 {
    DEFAULT_TOKEN_TTL_DAYS
}
