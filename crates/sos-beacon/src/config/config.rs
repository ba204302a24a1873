//! Configuration management for sos-beacon.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, lazy validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{
        AlarmConfig, AlertConfig, DEFAULT_DESKTOP_NOTIFICATIONS, DEFAULT_MESSAGE,
        DEFAULT_UPDATE_INTERVAL_SECS, LocationConfig, RecordingConfig,
    },
};

use std::{fs, io::Write, panic::Location, path::PathBuf};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Alarm playback configuration.
    pub alarm: AlarmConfig,
    /// Ambient-recording output configuration.
    pub recording: RecordingConfig,
    /// Position feed configuration.
    pub location: LocationConfig,
    /// Alert dispatch configuration.
    pub alert: AlertConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    ///
    /// Note: This does NOT validate that the alarm asset exists. Call
    /// `validate_alarm_asset()` separately; the coordinator can run and
    /// dispatch alerts even when the alarm sound is not in place yet.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to parse config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Validate that the alarm asset exists at the configured path.
    ///
    /// Kept out of `load()` so a missing sound degrades the alarm step
    /// of a trigger instead of preventing startup.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn validate_alarm_asset(&self) -> AppResult<()> {
        if !self.alarm.sound_path.exists() {
            return Err(AppError::ConfigError {
                reason: format!(
                    "Alarm sound not found at: {:?}. Place a WAV file there or configure alarm.sound_path.",
                    self.alarm.sound_path
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "sos-beacon", "SOS-Beacon").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let proj_dirs = ProjectDirs::from("com", "sos-beacon", "SOS-Beacon").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let data_dir = proj_dirs.data_dir();
        let sound_path = data_dir.join("sounds").join("alarm.wav");

        let config = Config {
            alarm: AlarmConfig {
                sound_path: sound_path.clone(),
            },
            recording: RecordingConfig {
                output_dir: data_dir.join("recordings"),
            },
            location: LocationConfig {
                latitude: None,
                longitude: None,
                update_interval_secs: DEFAULT_UPDATE_INTERVAL_SECS,
            },
            alert: AlertConfig {
                message: DEFAULT_MESSAGE.to_string(),
                desktop_notifications: DEFAULT_DESKTOP_NOTIFICATIONS,
            },
        };

        config.save()?;

        warn!(
            sound_path = ?sound_path,
            "Default config created. Place an alarm WAV at the configured path for audible alerts."
        );

        Ok(config)
    }
}
