use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ambient-recording output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Directory recordings are written into, one WAV per session.
    pub output_dir: PathBuf,
}
