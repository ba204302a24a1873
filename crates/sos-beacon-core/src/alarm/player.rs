use crate::{CoreError, CoreResult, alarm::convert_rate};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    sync::Arc,
};

use cpal::{
    Stream,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use hound::SampleFormat;
use tracing::{debug, info, instrument, warn};

/// Something that can sound an audible alarm on demand.
///
/// The orchestrator's seam for alarm playback: the default implementation
/// is [`AlarmPlayer`], alternative sounders (or test doubles) stand in
/// behind this trait.
pub trait Alarm {
    /// Start alarm playback.
    ///
    /// Fire-and-forget by contract: returns once playback has started,
    /// not once it finishes.
    fn play(&mut self) -> CoreResult<()>;
}

/// Plays a fixed WAV alarm asset through the default output device.
///
/// The active output stream is held by the player so playback continues
/// after `play()` returns; a subsequent `play()` replaces it.
pub struct AlarmPlayer {
    asset_path: PathBuf,
    stream: Option<Stream>,
}

impl AlarmPlayer {
    /// Create a player for the alarm asset at `asset_path`.
    ///
    /// The asset is not validated here; a missing file surfaces as
    /// [`CoreError::AssetMissing`] when the alarm first plays.
    pub fn new<P: Into<PathBuf>>(asset_path: P) -> Self {
        Self {
            asset_path: asset_path.into(),
            stream: None,
        }
    }

    /// Decode the WAV asset to a mono f32 buffer and its sample rate.
    #[track_caller]
    fn load_asset(path: &Path) -> CoreResult<(Vec<f32>, u32)> {
        let mut reader = hound::WavReader::open(path).map_err(|_| CoreError::AssetMissing {
            path: path.to_path_buf(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|_| CoreError::AssetMissing {
                    path: path.to_path_buf(),
                    location: ErrorLocation::from(Location::caller()),
                })?,
            SampleFormat::Int => {
                let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()
                    .map_err(|_| CoreError::AssetMissing {
                        path: path.to_path_buf(),
                        location: ErrorLocation::from(Location::caller()),
                    })?
            }
        };

        // Mix down to mono for playback on any channel layout.
        let mono: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect();

        debug!(
            path = ?path,
            sample_rate = spec.sample_rate,
            channels = channels,
            samples = mono.len(),
            "Alarm asset loaded"
        );

        Ok((mono, spec.sample_rate))
    }
}

impl Alarm for AlarmPlayer {
    /// Load the asset and start playback on the default output device.
    ///
    /// Fails with [`CoreError::AssetMissing`] if the asset cannot be
    /// read, or [`CoreError::PlaybackError`] if the output device or
    /// stream cannot be initialized.
    #[instrument(skip(self))]
    fn play(&mut self) -> CoreResult<()> {
        let (samples, asset_rate) = Self::load_asset(&self.asset_path)?;

        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or(CoreError::PlaybackError {
                reason: "no output device available".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config: cpal::StreamConfig = device
            .default_output_config()
            .map_err(|e| CoreError::PlaybackError {
                reason: format!("failed to get output config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .into();

        let samples = Arc::new(convert_rate(&samples, asset_rate, config.sample_rate)?);
        let channels = config.channels.max(1) as usize;

        let mut position = 0usize;
        let playback = Arc::clone(&samples);
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels) {
                        // Silence after the asset ends; the stream stays
                        // alive until the next play() replaces it.
                        let sample = playback.get(position).copied().unwrap_or(0.0);
                        for out in frame.iter_mut() {
                            *out = sample;
                        }
                        if position < playback.len() {
                            position += 1;
                        }
                    }
                },
                |err| {
                    warn!("Alarm output stream error: {}", err);
                },
                None,
            )
            .map_err(|e| CoreError::PlaybackError {
                reason: format!("failed to build output stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| CoreError::PlaybackError {
            reason: format!("failed to start output stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Replaces any previous playback stream.
        self.stream = Some(stream);

        info!(samples = samples.len(), "Alarm playback started");

        Ok(())
    }
}
