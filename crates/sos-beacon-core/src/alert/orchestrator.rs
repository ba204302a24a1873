use crate::{
    CoreResult,
    alarm::Alarm,
    alert::{AlarmOutcome, AlertPayload, AlertResult, DispatchOutcome, Notifier},
    contacts::{Contact, ContactRegistry},
    location::LocationTracker,
};

use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Coordinates a single trigger end-to-end.
///
/// On trigger: snapshot the contact list, read the current fix, fan the
/// notification out to every contact, sound the alarm, and hand back one
/// aggregated result. No subsystem failure aborts another: every failure
/// becomes a field of the result, never an `Err` or a panic, because an
/// emergency action must always complete from the caller's perspective.
///
/// Recording is not part of the trigger: it is a separately toggled,
/// longer-lived activity owned by the caller.
pub struct AlertOrchestrator<N: Notifier, A: Alarm> {
    contacts: ContactRegistry,
    tracker: LocationTracker,
    notifier: N,
    alarm: A,
    message: String,
}

impl<N: Notifier, A: Alarm> AlertOrchestrator<N, A> {
    /// Assemble an orchestrator from its collaborators.
    ///
    /// The tracker should already be started; the orchestrator only
    /// takes snapshot reads from it.
    pub fn new(tracker: LocationTracker, notifier: N, alarm: A, message: String) -> Self {
        Self {
            contacts: ContactRegistry::new(),
            tracker,
            notifier,
            alarm,
            message,
        }
    }

    /// Add an emergency contact. See [`ContactRegistry::add`].
    pub fn add_contact(&mut self, name: &str, number: &str) -> CoreResult<()> {
        self.contacts.add(name, number)
    }

    /// Snapshot of the registered contacts in insertion order.
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.list()
    }

    /// Run one alert end-to-end and return the aggregated result.
    ///
    /// Infallible by signature: dispatch failures are isolated
    /// per-contact, the position read never blocks (whatever fix is
    /// known at call time rides along), and an alarm failure is recorded
    /// without touching the dispatch outcomes.
    #[instrument(skip(self))]
    pub fn trigger(&mut self) -> AlertResult {
        let alert_id = Uuid::new_v4();

        let contacts = self.contacts.list();
        let fix = self.tracker.current();

        let payload = AlertPayload {
            message: self.message.clone(),
            position: fix.position().cloned(),
        };

        let mut dispatches = Vec::with_capacity(contacts.len());
        for contact in contacts {
            match self.notifier.send(&contact, &payload) {
                Ok(()) => {
                    dispatches.push(DispatchOutcome {
                        contact,
                        delivered: true,
                        error: None,
                    });
                }
                Err(e) => {
                    warn!(alert_id = %alert_id, name = %contact.name, error = %e, "Dispatch failed");
                    dispatches.push(DispatchOutcome {
                        contact,
                        delivered: false,
                        error: Some(e),
                    });
                }
            }
        }

        let alarm = match self.alarm.play() {
            Ok(()) => AlarmOutcome {
                sounded: true,
                error: None,
            },
            Err(e) => {
                warn!(alert_id = %alert_id, error = %e, "Alarm failed to sound");
                AlarmOutcome {
                    sounded: false,
                    error: Some(e),
                }
            }
        };

        let result = AlertResult {
            alert_id,
            dispatches,
            fix,
            alarm,
        };

        info!(
            alert_id = %alert_id,
            contacts_total = result.contacts_total(),
            contacts_delivered = result.contacts_delivered(),
            has_position = result.fix.position().is_some(),
            alarm_sounded = result.alarm.sounded,
            "Alert triggered"
        );

        result
    }

    /// Stop location tracking. Used on coordinator shutdown.
    pub fn shutdown(&mut self) {
        self.tracker.stop();
    }
}
