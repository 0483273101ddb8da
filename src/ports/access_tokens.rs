//! Capability token port.
//!
//! Issues and verifies signed, time-bound tokens that grant login-free
//! access to one resource.
//!
//! # Contract
//!
//! Implementations must:
//! - Reject any token whose signature does not verify with `TokenError::Invalid`
//! - Reject tokens of any type other than the one they issue with `TokenError::Invalid`
//! - Reject tokens at or past their expiry with `TokenError::Expired`
//! - Never panic on malformed input

use chrono::Duration;

use crate::domain::access::{IssuedToken, TokenError, VerifiedToken};

/// Issues and verifies capability tokens.
pub trait AccessTokenService: Send + Sync {
    /// Sign a token for `subject_id` valid for `ttl`. A negative `ttl` yields
    /// a token that is already expired.
    fn issue(&self, subject_id: &str, ttl: Duration) -> Result<IssuedToken, TokenError>;

    /// Verify a token against the current time.
    fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError>;
}
