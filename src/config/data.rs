//! Speaker directory and referral ledger data files

use serde::Deserialize;
use std::path::PathBuf;

/// Locations of the YAML data files
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Speakers and their feedback
    #[serde(default = "default_speakers_path")]
    pub speakers_path: PathBuf,

    /// Referrer accounts. When unset the ledger starts empty.
    pub referrers_path: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            speakers_path: default_speakers_path(),
            referrers_path: None,
        }
    }
}

fn default_speakers_path() -> PathBuf {
    PathBuf::from("data/speakers.yaml")
}
