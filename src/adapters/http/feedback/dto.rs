//! Request and response DTOs for speaker feedback endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::{GenerateFeedbackLinkResult, RedeemFeedbackResult};
use crate::domain::speaker::{FeedbackEntry, FeedbackSummary};

/// Body of `POST /generate-feedback-link`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFeedbackLinkRequest {
    pub speaker_id: Option<String>,
}

/// Speaker as shown to the operator issuing a link.
#[derive(Debug, Clone, Serialize)]
pub struct SpeakerContact {
    pub name: String,
    pub email: String,
}

/// Speaker as shown to the link holder. Never includes the email.
#[derive(Debug, Clone, Serialize)]
pub struct SpeakerProfile {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackLinkResponse {
    pub token: String,
    pub feedback_url: String,
    pub speaker: SpeakerContact,
    pub expires_at: DateTime<Utc>,
}

impl From<GenerateFeedbackLinkResult> for FeedbackLinkResponse {
    fn from(result: GenerateFeedbackLinkResult) -> Self {
        Self {
            token: result.token,
            feedback_url: result.feedback_url,
            speaker: SpeakerContact {
                name: result.speaker.name,
                email: result.speaker.email,
            },
            expires_at: result.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerFeedbackResponse {
    pub speaker: SpeakerProfile,
    pub feedback: Vec<FeedbackEntry>,
    pub summary: FeedbackSummary,
    pub expires_at: DateTime<Utc>,
}

impl From<RedeemFeedbackResult> for SpeakerFeedbackResponse {
    fn from(result: RedeemFeedbackResult) -> Self {
        Self {
            speaker: SpeakerProfile {
                id: result.speaker.id,
                name: result.speaker.name,
            },
            feedback: result.feedback,
            summary: result.summary,
            expires_at: result.expires_at,
        }
    }
}
