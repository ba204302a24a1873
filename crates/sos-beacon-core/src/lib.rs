//! SOS-Beacon Core Library
//!
//! Personal-safety alert coordination: contact fan-out, location
//! tracking, alarm playback, and audio-capture session lifecycle,
//! built on CPAL and Hound.
//!
//! # Example
//!
//! ```no_run
//! use sos_beacon_core::{
//!     AlarmPlayer, AlertOrchestrator, AlertPayload, Contact, CoreResult, LocationTracker,
//!     Notifier,
//! };
//!
//! struct PrintNotifier;
//!
//! impl Notifier for PrintNotifier {
//!     fn send(&mut self, contact: &Contact, payload: &AlertPayload) -> CoreResult<()> {
//!         println!("notify {}: {}", contact.number, payload.message);
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> CoreResult<()> {
//!     let tracker = LocationTracker::new();
//!     let alarm = AlarmPlayer::new("assets/alarm.wav");
//!     let mut orchestrator =
//!         AlertOrchestrator::new(tracker, PrintNotifier, alarm, "I need help!".to_string());
//!
//!     orchestrator.add_contact("Alice", "555-1234")?;
//!     let result = orchestrator.trigger();
//!
//!     println!(
//!         "{} of {} contacts notified",
//!         result.contacts_delivered(),
//!         result.contacts_total()
//!     );
//!     Ok(())
//! }
//! ```

mod alarm;
mod alert;
mod contacts;
mod error;
mod location;
mod recording;

pub use {
    alarm::{Alarm, AlarmPlayer},
    alert::{AlarmOutcome, AlertOrchestrator, AlertPayload, AlertResult, DispatchOutcome, Notifier},
    contacts::{Contact, ContactRegistry},
    error::CoreError,
    error::Result as CoreResult,
    location::{
        FeedEvent, FeedSink, LocationFix, LocationTracker, Position, PositionSource, SourceError,
        Subscription,
    },
    recording::{RecordingArtifact, RecordingSession, RecordingState},
};

#[cfg(test)]
mod tests;
