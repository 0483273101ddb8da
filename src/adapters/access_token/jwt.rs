//! HS256 JWT capability tokens.
//!
//! Implements the `AccessTokenService` port with a single shared secret.
//! Tokens carry `{speakerId, type, iat, exp}` and nothing else.
//!
//! # Security
//!
//! - Only HS256 is accepted; the header algorithm cannot downgrade verification
//! - The `type` claim must equal `speaker-feedback`
//! - Expiry is checked as `now < exp` with no leeway
//! - Every decode failure maps to `TokenError::Invalid`

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::access::{IssuedToken, TokenError, VerifiedToken, SPEAKER_FEEDBACK_TOKEN_TYPE};
use crate::ports::AccessTokenService;

/// JWT claims for feedback links.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackClaims {
    /// The speaker this token grants access to.
    speaker_id: String,

    /// Token discriminator.
    #[serde(rename = "type")]
    token_type: String,

    /// Issued at (Unix epoch seconds).
    iat: i64,

    /// Expiry (Unix epoch seconds).
    exp: i64,
}

/// Signs and verifies feedback-link tokens with a shared HS256 secret.
pub struct JwtAccessTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtAccessTokenService {
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an injectable clock in `verify_at`.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }

    /// Issue a token as of `now`.
    pub fn issue_at(
        &self,
        subject_id: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let issued_at = now;
        let expires_at = now + ttl;
        let claims = FeedbackClaims {
            speaker_id: subject_id.to_string(),
            token_type: SPEAKER_FEEDBACK_TOKEN_TYPE.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                tracing::error!(error = %e, "Failed to sign access token");
                TokenError::Invalid
            },
        )?;

        Ok(IssuedToken {
            token,
            subject_id: subject_id.to_string(),
            issued_at,
            expires_at,
        })
    }

    /// Verify a token as of `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<VerifiedToken, TokenError> {
        let data = decode::<FeedbackClaims>(token, &self.decoding_key, &Self::validation())
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token failed verification");
                TokenError::Invalid
            })?;
        let claims = data.claims;

        if claims.token_type != SPEAKER_FEEDBACK_TOKEN_TYPE {
            tracing::warn!(token_type = %claims.token_type, "Access token has unexpected type");
            return Err(TokenError::Invalid);
        }

        let expires_at = timestamp(claims.exp)?;
        if now >= expires_at {
            tracing::debug!(speaker_id = %claims.speaker_id, "Access token expired");
            return Err(TokenError::Expired);
        }

        Ok(VerifiedToken {
            subject_id: claims.speaker_id,
            issued_at: timestamp(claims.iat)?,
            expires_at,
        })
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, TokenError> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or(TokenError::Invalid)
}

impl AccessTokenService for JwtAccessTokenService {
    fn issue(&self, subject_id: &str, ttl: Duration) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject_id, ttl, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.verify_at(token, Utc::now())
    }
}

impl std::fmt::Debug for JwtAccessTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAccessTokenService")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::default_ttl;

    fn service() -> JwtAccessTokenService {
        JwtAccessTokenService::new(&SecretString::new(
            "a-test-secret-that-is-long-enough-to-sign".to_string(),
        ))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Round Trip
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn verify_returns_subject_immediately_after_issue() {
        let service = service();
        let issued = service.issue("spk-ada", default_ttl()).unwrap();
        let verified = service.verify(&issued.token).unwrap();

        assert_eq!(verified.subject_id, "spk-ada");
        assert_eq!(verified.expires_at.timestamp(), issued.expires_at.timestamp());
    }

    #[test]
    fn token_is_valid_until_just_before_expiry() {
        let service = service();
        let now = Utc::now();
        let issued = service.issue_at("spk-ada", Duration::hours(1), now).unwrap();

        assert!(service
            .verify_at(&issued.token, now + Duration::minutes(59))
            .is_ok());
        assert_eq!(
            service.verify_at(&issued.token, now + Duration::hours(1)),
            Err(TokenError::Expired)
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Rejection
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn negative_ttl_is_expired() {
        let service = service();
        let issued = service.issue("spk-ada", Duration::seconds(-1)).unwrap();
        assert_eq!(service.verify(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn any_flipped_character_is_invalid() {
        let service = service();
        let token = service.issue("spk-ada", default_ttl()).unwrap().token;

        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            assert_eq!(
                service.verify(&tampered),
                Err(TokenError::Invalid),
                "flipping position {} was accepted",
                i
            );
        }
    }

    #[test]
    fn token_from_other_secret_is_invalid() {
        let other = JwtAccessTokenService::new(&SecretString::new(
            "a-completely-different-secret-value-here".to_string(),
        ));
        let token = other.issue("spk-ada", default_ttl()).unwrap().token;
        assert_eq!(service().verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn expired_token_from_other_secret_is_invalid_not_expired() {
        let other = JwtAccessTokenService::new(&SecretString::new(
            "a-completely-different-secret-value-here".to_string(),
        ));
        let token = other.issue("spk-ada", Duration::seconds(-60)).unwrap().token;
        assert_eq!(service().verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn wrong_token_type_is_invalid() {
        let service = service();
        let now = Utc::now();
        let claims = FeedbackClaims {
            speaker_id: "spk-ada".to_string(),
            token_type: "admin".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &service.encoding_key).unwrap();
        assert_eq!(service.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_is_invalid() {
        let service = service();
        assert_eq!(service.verify(""), Err(TokenError::Invalid));
        assert_eq!(service.verify("not.a.token"), Err(TokenError::Invalid));
        assert_eq!(service.verify("🦀"), Err(TokenError::Invalid));
    }

    #[test]
    fn service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JwtAccessTokenService>();
    }
}
