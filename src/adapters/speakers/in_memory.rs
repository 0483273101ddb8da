//! In-memory speaker directory for tests and local development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::CheckoutError;
use crate::domain::speaker::{FeedbackEntry, Speaker};
use crate::ports::SpeakerDirectory;

#[derive(Debug, Default)]
struct Entry {
    speaker: Option<Speaker>,
    feedback: Vec<FeedbackEntry>,
}

/// Speaker directory held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpeakerDirectory {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemorySpeakerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_speaker(&self, speaker: Speaker) {
        let id = speaker.id.clone();
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.entry(id).or_default().speaker = Some(speaker);
    }

    pub fn add_feedback(&self, speaker_id: &str, entry: FeedbackEntry) {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries
            .entry(speaker_id.to_string())
            .or_default()
            .feedback
            .push(entry);
    }
}

#[async_trait]
impl SpeakerDirectory for InMemorySpeakerDirectory {
    async fn find_speaker(&self, speaker_id: &str) -> Result<Option<Speaker>, CheckoutError> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        Ok(entries.get(speaker_id).and_then(|e| e.speaker.clone()))
    }

    async fn feedback_for(&self, speaker_id: &str) -> Result<Vec<FeedbackEntry>, CheckoutError> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        let mut feedback = entries
            .get(speaker_id)
            .map(|e| e.feedback.clone())
            .unwrap_or_default();
        feedback.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(feedback)
    }
}
