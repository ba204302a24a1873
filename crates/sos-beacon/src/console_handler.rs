//! Console control surface.
//!
//! Reads operator commands line by line from stdin and forwards them to
//! the main application over an async channel. The grammar mirrors the
//! actions a panic-button UI would expose: trigger, recording toggle,
//! contact management, shutdown.

use crate::{AppCommand, AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{mpsc, watch},
};
use tracing::{info, instrument, warn};

/// Forwards parsed console commands to the main application.
pub(crate) struct ConsoleHandler {
    command_tx: mpsc::Sender<AppCommand>,
}

impl ConsoleHandler {
    /// Create a handler that sends into `command_tx`.
    pub(crate) fn new(command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self { command_tx }
    }

    /// Run the console read loop.
    ///
    /// Terminates on a shutdown signal, on end of input, or after
    /// forwarding a Shutdown command.
    #[instrument(skip(self))]
    pub(crate) async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        print_help();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Console handler shutting down");
                    break;
                }
                line = lines.next_line() => {
                    match line {
                        Ok(Some(input)) => {
                            if self.handle_line(&input).await? {
                                break;
                            }
                        }
                        Ok(None) => {
                            // stdin closed; treat like an explicit quit.
                            let _ = self.command_tx.send(AppCommand::Shutdown).await;
                            break;
                        }
                        Err(e) => return Err(AppError::from(e)),
                    }
                }
            }
        }

        Ok(())
    }

    /// Forward one input line. Returns `true` when the loop should end.
    async fn handle_line(&self, input: &str) -> AppResult<bool> {
        let Some(command) = parse_command(input) else {
            if !input.trim().is_empty() {
                warn!(input = %input.trim(), "Unrecognized command");
                print_help();
            }
            return Ok(false);
        };

        let is_shutdown = command == AppCommand::Shutdown;

        self.command_tx
            .send(command)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send console command: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(is_shutdown)
    }
}

/// Parse one console line into a command.
///
/// Contact names may contain spaces; the number is always the last
/// token of an `add` line.
pub(crate) fn parse_command(line: &str) -> Option<AppCommand> {
    let mut parts = line.split_whitespace();

    match parts.next()? {
        "sos" | "trigger" => Some(AppCommand::TriggerAlert),
        "record" => Some(AppCommand::StartRecording),
        "stop" => Some(AppCommand::StopRecording),
        "add" => {
            let rest: Vec<&str> = parts.collect();
            if rest.len() < 2 {
                return None;
            }
            let number = rest[rest.len() - 1].to_string();
            let name = rest[..rest.len() - 1].join(" ");
            Some(AppCommand::AddContact { name, number })
        }
        "contacts" => Some(AppCommand::ListContacts),
        "quit" | "exit" => Some(AppCommand::Shutdown),
        _ => None,
    }
}

fn print_help() {
    println!("Commands:");
    println!("  sos                  send an SOS alert to all contacts");
    println!("  record               start ambient audio recording");
    println!("  stop                 stop ambient audio recording");
    println!("  add <name> <number>  register an emergency contact");
    println!("  contacts             list registered contacts");
    println!("  quit                 exit");
}
