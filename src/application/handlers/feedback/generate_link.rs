//! GenerateFeedbackLinkHandler - Command handler issuing a speaker feedback link.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::application::handlers::input::require;
use crate::domain::foundation::CheckoutError;
use crate::domain::speaker::Speaker;
use crate::ports::{AccessTokenService, SpeakerDirectory};

/// Command to generate a feedback link for a speaker.
#[derive(Debug, Clone)]
pub struct GenerateFeedbackLinkCommand {
    pub speaker_id: Option<String>,
}

/// Result of generating a feedback link.
#[derive(Debug, Clone)]
pub struct GenerateFeedbackLinkResult {
    pub token: String,
    pub feedback_url: String,
    pub speaker: Speaker,
    pub expires_at: DateTime<Utc>,
}

/// Handler for issuing feedback links.
pub struct GenerateFeedbackLinkHandler {
    directory: Arc<dyn SpeakerDirectory>,
    tokens: Arc<dyn AccessTokenService>,
    base_url: String,
    ttl: Duration,
}

impl GenerateFeedbackLinkHandler {
    pub fn new(
        directory: Arc<dyn SpeakerDirectory>,
        tokens: Arc<dyn AccessTokenService>,
        base_url: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            directory,
            tokens,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ttl,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateFeedbackLinkCommand,
    ) -> Result<GenerateFeedbackLinkResult, CheckoutError> {
        let speaker_id = require(cmd.speaker_id.as_deref(), "Missing speakerId")?;

        let speaker = self
            .directory
            .find_speaker(speaker_id)
            .await?
            .ok_or_else(|| CheckoutError::not_found("Speaker not found"))?;

        let issued = self.tokens.issue(&speaker.id, self.ttl).map_err(|e| {
            tracing::error!(speaker_id = %speaker.id, error = %e, "Failed to sign feedback token");
            CheckoutError::internal("failed to sign feedback token")
        })?;

        tracing::info!(
            speaker_id = %speaker.id,
            expires_at = %issued.expires_at,
            "Feedback link issued"
        );

        Ok(GenerateFeedbackLinkResult {
            feedback_url: format!("{}/feedback/speaker/{}", self.base_url, issued.token),
            token: issued.token,
            speaker,
            expires_at: issued.expires_at,
        })
    }
}
