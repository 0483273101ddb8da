//! Speaker directory port.
//!
//! Read-only access to speakers and the feedback attendees left for them.

use async_trait::async_trait;

use crate::domain::foundation::CheckoutError;
use crate::domain::speaker::{FeedbackEntry, Speaker};

/// Port for looking up speakers and their feedback.
#[async_trait]
pub trait SpeakerDirectory: Send + Sync {
    /// Find a speaker by ID. Returns `Ok(None)` when no such speaker exists.
    async fn find_speaker(&self, speaker_id: &str) -> Result<Option<Speaker>, CheckoutError>;

    /// All feedback entries for a speaker, newest first.
    async fn feedback_for(&self, speaker_id: &str) -> Result<Vec<FeedbackEntry>, CheckoutError>;
}
