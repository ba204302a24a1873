//! SOS-Beacon: personal-safety alert coordinator with console control.

mod app;
mod app_command;
mod config;
mod console_handler;
mod error;
mod notifier;
mod position_feed;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    console_handler::ConsoleHandler,
    error::{AppError, Result as AppResult},
    notifier::SmsGateway,
    position_feed::ConfiguredPositionFeed,
};

use crate::config::Config;

use sos_beacon_core::{AlarmPlayer, AlertOrchestrator, LocationTracker, RecordingSession};
use tokio::sync::{mpsc, watch};
use tracing::{error, warn};

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("sos_beacon=debug")
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    // A missing alarm sound degrades the alarm step of a trigger; it is
    // not a reason to refuse to start.
    if let Err(e) = config.validate_alarm_asset() {
        warn!("Alarm asset check failed: {:?}", e);
    }

    let mut feed = ConfiguredPositionFeed::new(&config.location);
    let mut tracker = LocationTracker::new();
    tracker.start(&mut feed);

    let notifier = SmsGateway::new(config.alert.desktop_notifications);
    let alarm = AlarmPlayer::new(&config.alarm.sound_path);
    let orchestrator =
        AlertOrchestrator::new(tracker, notifier, alarm, config.alert.message.clone());

    let (command_tx, command_rx) = mpsc::channel(32);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        let console_handler = ConsoleHandler::new(command_tx);

        let app = App {
            orchestrator,
            recorder: RecordingSession::new(),
            recording_dir: config.recording.output_dir.clone(),
            command_rx,
            shutdown_tx,
        };

        tokio::join!(
            async {
                if let Err(e) = console_handler.run(shutdown_rx).await {
                    error!(error = ?e, "Console handler error");
                }
            },
            async {
                if let Err(e) = app.run().await {
                    error!(error = ?e, "App error");
                }
            }
        );
    });
}
