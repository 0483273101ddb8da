//! File-based speaker directory.
//!
//! Reads speakers and their feedback from a YAML file on every lookup, so
//! edits to the file are visible without a restart.
//!
//! ```yaml
//! speakers:
//!   - id: spk-ada
//!     name: Ada Lovelace
//!     email: ada@example.com
//!     feedback:
//!       - rating: 5
//!         comment: Loved the live demo
//!         sessionTitle: Engines of Tomorrow
//!         submittedAt: 2024-05-01T10:00:00Z
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;

use crate::domain::foundation::CheckoutError;
use crate::domain::speaker::{FeedbackEntry, Speaker};
use crate::ports::SpeakerDirectory;

#[derive(Debug, Deserialize)]
struct SpeakerFile {
    #[serde(default)]
    speakers: Vec<SpeakerRecord>,
}

#[derive(Debug, Deserialize)]
struct SpeakerRecord {
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    feedback: Vec<FeedbackEntry>,
}

/// Speaker directory backed by a YAML file.
#[derive(Debug, Clone)]
pub struct YamlSpeakerDirectory {
    path: PathBuf,
}

impl YamlSpeakerDirectory {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn load(&self) -> Result<SpeakerFile, CheckoutError> {
        let yaml = fs::read_to_string(&self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to read speaker file");
            CheckoutError::internal(format!("Failed to read speaker file: {}", e))
        })?;

        serde_yaml::from_str(&yaml).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to parse speaker file");
            CheckoutError::internal(format!("Failed to parse speaker file: {}", e))
        })
    }
}

#[async_trait]
impl SpeakerDirectory for YamlSpeakerDirectory {
    async fn find_speaker(&self, speaker_id: &str) -> Result<Option<Speaker>, CheckoutError> {
        let file = self.load().await?;
        Ok(file
            .speakers
            .into_iter()
            .find(|s| s.id == speaker_id)
            .map(|s| Speaker {
                id: s.id,
                name: s.name,
                email: s.email,
            }))
    }

    async fn feedback_for(&self, speaker_id: &str) -> Result<Vec<FeedbackEntry>, CheckoutError> {
        let file = self.load().await?;
        let mut feedback = file
            .speakers
            .into_iter()
            .find(|s| s.id == speaker_id)
            .map(|s| s.feedback)
            .unwrap_or_default();
        feedback.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(feedback)
    }
}
