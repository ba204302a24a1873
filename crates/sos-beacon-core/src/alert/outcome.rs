use crate::{CoreError, contacts::Contact, location::LocationFix};

use uuid::Uuid;

/// Result of one dispatch attempt to one contact.
#[derive(Debug)]
pub struct DispatchOutcome {
    /// The contact the attempt was made for.
    pub contact: Contact,
    /// Whether the transport accepted the notification.
    pub delivered: bool,
    /// The failure, when delivery did not happen.
    pub error: Option<CoreError>,
}

/// Result of the alarm invocation within a trigger.
#[derive(Debug)]
pub struct AlarmOutcome {
    /// Whether playback started.
    pub sounded: bool,
    /// The failure, when playback did not start.
    pub error: Option<CoreError>,
}

/// Aggregated outcome of a single trigger.
///
/// Created fresh per trigger and handed to the caller; never persisted.
/// Every subsystem failure during the trigger is captured here as data.
#[derive(Debug)]
pub struct AlertResult {
    /// Unique ID of this trigger, for log correlation.
    pub alert_id: Uuid,
    /// Per-contact outcomes, in contact-list order.
    pub dispatches: Vec<DispatchOutcome>,
    /// The position state at trigger time.
    pub fix: LocationFix,
    /// The alarm outcome.
    pub alarm: AlarmOutcome,
}

impl AlertResult {
    /// How many contacts were dispatched to.
    pub fn contacts_total(&self) -> usize {
        self.dispatches.len()
    }

    /// How many dispatches the transport accepted.
    pub fn contacts_delivered(&self) -> usize {
        self.dispatches.iter().filter(|d| d.delivered).count()
    }
}
