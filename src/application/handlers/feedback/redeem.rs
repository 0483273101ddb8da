//! RedeemFeedbackHandler - Query handler behind a feedback link.
//!
//! Tokens can be redeemed any number of times until they expire.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::handlers::input::require;
use crate::domain::foundation::CheckoutError;
use crate::domain::speaker::{FeedbackEntry, FeedbackSummary, Speaker};
use crate::ports::{AccessTokenService, SpeakerDirectory};

/// Query carrying the token from the link.
#[derive(Debug, Clone)]
pub struct RedeemFeedbackQuery {
    pub token: Option<String>,
}

/// Feedback visible to the token holder.
#[derive(Debug, Clone)]
pub struct RedeemFeedbackResult {
    pub speaker: Speaker,
    pub feedback: Vec<FeedbackEntry>,
    pub summary: FeedbackSummary,
    pub expires_at: DateTime<Utc>,
}

/// Handler for redeeming feedback links.
pub struct RedeemFeedbackHandler {
    directory: Arc<dyn SpeakerDirectory>,
    tokens: Arc<dyn AccessTokenService>,
}

impl RedeemFeedbackHandler {
    pub fn new(directory: Arc<dyn SpeakerDirectory>, tokens: Arc<dyn AccessTokenService>) -> Self {
        Self { directory, tokens }
    }

    pub async fn handle(&self, query: RedeemFeedbackQuery) -> Result<RedeemFeedbackResult, CheckoutError> {
        let token = require(query.token.as_deref(), "Missing token")?;

        let verified = self.tokens.verify(token).map_err(|e| {
            tracing::info!(reason = %e, "Feedback token rejected");
            CheckoutError::from(e)
        })?;

        let speaker = self
            .directory
            .find_speaker(&verified.subject_id)
            .await?
            .ok_or_else(|| CheckoutError::not_found("Speaker not found"))?;
        let feedback = self.directory.feedback_for(&speaker.id).await?;
        let summary = FeedbackSummary::from_entries(&feedback);

        Ok(RedeemFeedbackResult {
            speaker,
            feedback,
            summary,
            expires_at: verified.expires_at,
        })
    }
}
