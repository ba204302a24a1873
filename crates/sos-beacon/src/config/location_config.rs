use crate::config::default_update_interval_secs;

use serde::{Deserialize, Serialize};

/// Position feed configuration.
///
/// The bundled feed replays these coordinates; leaving them unset makes
/// the feed behave like a refused platform capability, which exercises
/// the same degraded path a real denial would.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude reported by the bundled feed (None = no capability).
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude reported by the bundled feed (None = no capability).
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Seconds between feed updates.
    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,
}
