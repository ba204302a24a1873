//! Notification transport for alert dispatch.
//!
//! The carrier-side SMS transport lives outside this binary; this
//! adapter logs each dispatch the way a gateway client would and can
//! additionally raise a desktop notification per contact so dispatches
//! are visible on the local machine.

use std::panic::Location;

use error_location::ErrorLocation;
use sos_beacon_core::{AlertPayload, Contact, CoreError, CoreResult, Notifier};
use tracing::{info, instrument};

/// Single-attempt dispatch adapter for the alert fan-out.
pub(crate) struct SmsGateway {
    desktop_notifications: bool,
}

impl SmsGateway {
    /// Create a gateway; `desktop_notifications` mirrors the config flag.
    pub(crate) fn new(desktop_notifications: bool) -> Self {
        Self {
            desktop_notifications,
        }
    }

    /// Render the message body a contact receives.
    pub(crate) fn format_body(payload: &AlertPayload) -> String {
        match &payload.position {
            Some(p) => format!(
                "{} Location: {:.5}, {:.5}",
                payload.message, p.latitude, p.longitude
            ),
            None => format!("{} Location unavailable.", payload.message),
        }
    }
}

impl Notifier for SmsGateway {
    #[instrument(skip(self, payload))]
    fn send(&mut self, contact: &Contact, payload: &AlertPayload) -> CoreResult<()> {
        let body = Self::format_body(payload);

        info!(
            name = %contact.name,
            number = %contact.number,
            body = %body,
            "Dispatching SOS notification"
        );

        if self.desktop_notifications {
            notify_rust::Notification::new()
                .summary(&format!("SOS sent to {}", contact.name))
                .body(&body)
                .show()
                .map_err(|e| CoreError::DispatchError {
                    reason: format!("desktop notification failed: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        Ok(())
    }
}
