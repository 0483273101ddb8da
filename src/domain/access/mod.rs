//! Capability token types.
//!
//! A capability token grants login-free access to exactly one resource until
//! it expires. Tokens are self-contained: there is no server-side record, so
//! they cannot be revoked individually and expire by time only.
//!
//! These types carry no signing details. Any signer can produce them via the
//! `AccessTokenService` port.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::CheckoutError;

/// Default lifetime of a feedback link.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// The only token discriminator this service issues.
pub const SPEAKER_FEEDBACK_TOKEN_TYPE: &str = "speaker-feedback";

/// Why a token was rejected.
///
/// Callers must not reveal which variant occurred; both map to the same
/// generic unauthorized response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Bad signature, malformed structure or unexpected token type.
    #[error("Invalid token")]
    Invalid,

    /// Signature verified but the expiry has passed.
    #[error("Token expired")]
    Expired,
}

impl From<TokenError> for CheckoutError {
    fn from(_: TokenError) -> Self {
        CheckoutError::Unauthorized
    }
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub subject_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// The decoded contents of a token that passed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedToken {
    pub subject_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl VerifiedToken {
    /// Time left before the token stops verifying.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}

/// Token lifetime. Negative values produce tokens that are already expired.
pub fn default_ttl() -> Duration {
    Duration::days(DEFAULT_TOKEN_TTL_DAYS)
}
