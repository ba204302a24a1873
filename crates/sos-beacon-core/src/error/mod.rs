use error_location::ErrorLocation;
use thiserror::Error;

/// Alert-coordination errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Contact name or number was empty after trimming.
    #[error("Invalid contact: {reason} {location}")]
    InvalidContact {
        /// Which field was rejected and why.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No audio input device available, or the capture capability was denied.
    #[error("Audio capture unavailable: {reason} {location}")]
    CaptureUnavailable {
        /// Description of the capability failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recording output destination or capture stream could not be set up.
    #[error("Recording resource error: {reason} {location}")]
    ResourceError {
        /// Description of the resource failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// `stop()` was called while no recording was active.
    #[error("No active recording session {location}")]
    NoActiveRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// `start()` was called while a recording was already active.
    #[error("A recording session is already active {location}")]
    RecordingActive {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The alarm sound asset could not be located or read.
    #[error("Alarm asset missing at path: {path:?} {location}")]
    AssetMissing {
        /// Path to the missing alarm asset.
        path: std::path::PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The platform audio output could not be initialized or started.
    #[error("Alarm playback error: {reason} {location}")]
    PlaybackError {
        /// Description of the playback failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A single contact notification could not be delivered.
    ///
    /// Never propagated out of a trigger; carried inside the per-contact
    /// dispatch outcome instead.
    #[error("Dispatch failed: {reason} {location}")]
    DispatchError {
        /// Description of the delivery failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Alarm asset sample-rate conversion failed.
    #[error("Resampling error: {reason} {location}")]
    ResamplingError {
        /// Description of the resampling error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
