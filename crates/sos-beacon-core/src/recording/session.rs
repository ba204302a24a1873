use crate::{CoreError, CoreResult};

use std::{
    fs,
    io::BufWriter,
    panic::Location,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use cpal::{
    Stream,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

type SharedWavWriter = Arc<Mutex<Option<WavWriter<BufWriter<fs::File>>>>>;

/// Lifecycle state of a [`RecordingSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    /// Not currently recording.
    Idle,
    /// Currently capturing audio.
    Recording {
        /// When capture started.
        started_at: Instant,
        /// Unique session ID for log correlation.
        session_id: Uuid,
    },
}

/// A finalized recording, returned by [`RecordingSession::stop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingArtifact {
    /// Session ID the artifact belongs to.
    pub session_id: Uuid,
    /// Where the WAV file was written.
    pub path: PathBuf,
    /// How long the session was recording.
    pub duration: Duration,
}

/// Manages exactly one audio-capture lifecycle at a time.
///
/// The session owns and validates its own `Idle -> Recording -> Idle`
/// transitions; callers cannot drive it into an invalid state by holding
/// a stale flag of their own. While Recording, the session exclusively
/// owns the capture stream and the WAV output resource.
///
/// Not thread-safe: start/stop are serialized by the single command loop
/// that owns the session, not by internal locking.
pub struct RecordingSession {
    state: RecordingState,
    stream: Option<Stream>,
    writer: SharedWavWriter,
    output_path: Option<PathBuf>,
    /// Signals the audio callback to stop writing. Set to `true` before
    /// dropping the stream so no in-flight callback writes after the
    /// writer is finalized in `stop()`.
    shutdown: Arc<AtomicBool>,
}

impl RecordingSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self {
            state: RecordingState::Idle,
            stream: None,
            writer: Arc::new(Mutex::new(None)),
            output_path: None,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RecordingState {
        self.state
    }

    /// Acquire the capture device and output file, then begin recording.
    ///
    /// Fails with [`CoreError::RecordingActive`] if already Recording,
    /// [`CoreError::CaptureUnavailable`] if no input device can be
    /// acquired, or [`CoreError::ResourceError`] if the output file or
    /// capture stream cannot be set up. On success the session
    /// transitions to Recording and returns the new session ID.
    #[track_caller]
    #[instrument(skip(self, output_dir))]
    pub fn start(&mut self, output_dir: &Path) -> CoreResult<Uuid> {
        if let RecordingState::Recording { session_id, .. } = self.state {
            debug!(session_id = %session_id, "Start refused, session already recording");
            return Err(CoreError::RecordingActive {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or(CoreError::CaptureUnavailable {
                reason: "no input device available".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config: cpal::StreamConfig = device
            .default_input_config()
            .map_err(|e| CoreError::CaptureUnavailable {
                reason: format!("failed to get input config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .into();

        fs::create_dir_all(output_dir).map_err(|e| CoreError::ResourceError {
            reason: format!("failed to create output directory: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let session_id = Uuid::new_v4();
        let path = output_dir.join(format!("sos-recording-{}.wav", session_id));

        let spec = WavSpec {
            channels: config.channels,
            sample_rate: config.sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };

        let wav_writer = WavWriter::create(&path, spec).map_err(|e| CoreError::ResourceError {
            reason: format!("failed to create output file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        {
            let mut guard = self.writer.lock().unwrap_or_else(|e| e.into_inner());
            *guard = Some(wav_writer);
        }

        // Reset shutdown flag for the new session
        self.shutdown.store(false, Ordering::Release);

        let writer = Arc::clone(&self.writer);
        let shutdown = Arc::clone(&self.shutdown);

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Check shutdown flag before acquiring the lock: once
                    // stop() sets it, no sample is written even if the
                    // backend fires one more callback before the stream
                    // is dropped.
                    if shutdown.load(Ordering::Acquire) {
                        return;
                    }
                    // Recover from lock poison rather than dropping audio.
                    let mut guard = writer.lock().unwrap_or_else(|e| {
                        error!("Recording writer lock poisoned, recovering: {}", e);
                        e.into_inner()
                    });
                    if let Some(w) = guard.as_mut() {
                        for &sample in data {
                            if let Err(e) = w.write_sample(sample) {
                                error!("Failed to write sample, stopping capture: {}", e);
                                shutdown.store(true, Ordering::Release);
                                return;
                            }
                        }
                    }
                },
                |err| {
                    error!("Recording stream error: {}", err);
                },
                None,
            )
            .map_err(|e| CoreError::ResourceError {
                reason: format!("failed to build capture stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| CoreError::ResourceError {
            reason: format!("failed to start capture stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.stream = Some(stream);
        self.output_path = Some(path.clone());
        self.state = RecordingState::Recording {
            started_at: Instant::now(),
            session_id,
        };

        info!(session_id = %session_id, path = ?path, "Recording started");

        Ok(session_id)
    }

    /// Finalize the output file and return the session to Idle.
    ///
    /// Fails with [`CoreError::NoActiveRecording`] if the session is
    /// Idle. The state check runs before any device interaction, so an
    /// invalid stop never touches hardware.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CoreResult<RecordingArtifact> {
        let RecordingState::Recording {
            started_at,
            session_id,
        } = self.state
        else {
            return Err(CoreError::NoActiveRecording {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        // Signal the callback to stop writing BEFORE dropping the stream,
        // so no write races the writer finalization below.
        self.shutdown.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            drop(stream);
            // Brief yield so any in-flight callback observes the shutdown
            // flag before the writer is taken.
            std::thread::sleep(Duration::from_millis(5));
        }

        let wav_writer = {
            let mut guard = self.writer.lock().unwrap_or_else(|e| e.into_inner());
            guard.take()
        };

        if let Some(w) = wav_writer {
            w.finalize().map_err(|e| CoreError::ResourceError {
                reason: format!("failed to finalize output file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        let duration = started_at.elapsed();
        let path = self.output_path.take().unwrap_or_default();
        self.state = RecordingState::Idle;

        info!(
            session_id = %session_id,
            duration_ms = duration.as_millis(),
            path = ?path,
            "Recording stopped"
        );

        Ok(RecordingArtifact {
            session_id,
            path,
            duration,
        })
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}
