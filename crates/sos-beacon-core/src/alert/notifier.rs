use crate::{CoreResult, contacts::Contact, location::Position};

/// What gets delivered to each contact on a trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertPayload {
    /// Human-readable alert message.
    pub message: String,
    /// The current position, when one is known. Dispatch proceeds
    /// without it otherwise.
    pub position: Option<Position>,
}

/// The notification transport seam.
///
/// The core depends only on this narrow contract; the real transport
/// (SMS gateway, push service, desktop notification) lives outside.
/// Exactly one attempt is made per contact per trigger; there are no
/// retries.
pub trait Notifier {
    /// Attempt to deliver `payload` to `contact`.
    fn send(&mut self, contact: &Contact, payload: &AlertPayload) -> CoreResult<()>;
}
