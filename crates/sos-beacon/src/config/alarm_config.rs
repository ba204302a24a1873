use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Alarm playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmConfig {
    /// Path to the WAV alarm asset played on every trigger.
    pub sound_path: PathBuf,
}
