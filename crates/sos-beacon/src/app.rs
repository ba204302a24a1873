use crate::{AppCommand, AppResult, SmsGateway};

use std::path::PathBuf;

use sos_beacon_core::{
    AlarmPlayer, AlertOrchestrator, LocationFix, RecordingSession, RecordingState,
};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, instrument, warn};

/// Main application state.
///
/// Owns the orchestrator and the recording session and executes
/// console commands against them one at a time, so all start/stop
/// transitions are naturally serialized.
pub(crate) struct App {
    pub(crate) orchestrator: AlertOrchestrator<SmsGateway, AlarmPlayer>,
    pub(crate) recorder: RecordingSession,
    pub(crate) recording_dir: PathBuf,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("SOS-Beacon starting");

        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        AppCommand::TriggerAlert => self.trigger_alert(),
                        AppCommand::StartRecording => {
                            if let Err(e) = self.start_recording() {
                                error!(error = ?e, "Failed to start recording");
                            }
                        }
                        AppCommand::StopRecording => {
                            if let Err(e) = self.stop_recording() {
                                error!(error = ?e, "Failed to stop recording");
                            }
                        }
                        AppCommand::AddContact { name, number } => {
                            if let Err(e) = self.add_contact(&name, &number) {
                                error!(error = ?e, "Failed to add contact");
                            }
                        }
                        AppCommand::ListContacts => self.list_contacts(),
                        AppCommand::Shutdown => {
                            info!("Shutdown requested");
                            break;
                        }
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        // Finalize an in-flight recording so the file is not left open.
        if matches!(self.recorder.state(), RecordingState::Recording { .. }) {
            match self.recorder.stop() {
                Ok(artifact) => {
                    info!(path = ?artifact.path, "Recording finalized on shutdown");
                }
                Err(e) => error!(error = ?e, "Failed to finalize recording on shutdown"),
            }
        }

        self.orchestrator.shutdown();

        let _ = self.shutdown_tx.send(true);
        info!("SOS-Beacon shut down successfully");

        Ok(())
    }

    /// Run one alert and log the operator-facing summary.
    ///
    /// The trigger itself is infallible; whatever partially failed is
    /// reported from the aggregated result.
    #[instrument(skip(self))]
    fn trigger_alert(&mut self) {
        let result = self.orchestrator.trigger();

        let location = match &result.fix {
            LocationFix::Fix(_) => "known",
            LocationFix::Denied => "denied",
            LocationFix::Unavailable => "unavailable",
        };

        info!(
            alert_id = %result.alert_id,
            contacts_delivered = result.contacts_delivered(),
            contacts_total = result.contacts_total(),
            location = location,
            alarm_sounded = result.alarm.sounded,
            "SOS alert completed"
        );

        for dispatch in result.dispatches.iter().filter(|d| !d.delivered) {
            warn!(
                name = %dispatch.contact.name,
                number = %dispatch.contact.number,
                "Contact was not notified"
            );
        }

        if let Some(e) = &result.alarm.error {
            warn!(error = %e, "Alarm did not sound");
        }
    }

    /// Start the ambient recording session.
    #[instrument(skip(self))]
    fn start_recording(&mut self) -> AppResult<()> {
        let session_id = self.recorder.start(&self.recording_dir)?;
        info!(session_id = %session_id, "Recording started");
        Ok(())
    }

    /// Stop the ambient recording session and report the artifact.
    #[instrument(skip(self))]
    fn stop_recording(&mut self) -> AppResult<()> {
        let artifact = self.recorder.stop()?;
        info!(
            session_id = %artifact.session_id,
            path = ?artifact.path,
            duration_ms = artifact.duration.as_millis(),
            "Recording saved"
        );
        Ok(())
    }

    /// Register an emergency contact.
    #[instrument(skip(self))]
    fn add_contact(&mut self, name: &str, number: &str) -> AppResult<()> {
        self.orchestrator.add_contact(name, number)?;
        info!(name = %name, "Emergency contact registered");
        Ok(())
    }

    /// Log the registered contacts in insertion order.
    #[instrument(skip(self))]
    fn list_contacts(&self) {
        let contacts = self.orchestrator.contacts();

        if contacts.is_empty() {
            info!("No emergency contacts registered");
            return;
        }

        for (index, contact) in contacts.iter().enumerate() {
            info!(
                index = index + 1,
                name = %contact.name,
                number = %contact.number,
                "Emergency contact"
            );
        }
    }
}
