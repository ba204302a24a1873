use crate::location::{FeedEvent, FeedSink, LocationFix, PositionSource, SourceError, Subscription};

use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, instrument, warn};

/// Maintains the freshest known device position from a continuous feed.
///
/// The stored fix is the only value in the core written by an
/// asynchronous callback and read by the trigger flow, so it lives
/// behind a mutex: a reader observes either the previous fix or the
/// fully written new one, never a torn coordinate pair.
#[derive(Debug, Default)]
pub struct LocationTracker {
    fix: Arc<Mutex<LocationFix>>,
    subscription: Option<Subscription>,
}

impl LocationTracker {
    /// Create a tracker with no position yet.
    pub fn new() -> Self {
        Self {
            fix: Arc::new(Mutex::new(LocationFix::Unavailable)),
            subscription: None,
        }
    }

    /// Subscribe to a position feed and begin tracking.
    ///
    /// Idempotent: a second call while a subscription is live is a
    /// logged no-op, leaving the existing subscription in place.
    ///
    /// Never raises. A denied capability records [`LocationFix::Denied`],
    /// any other subscribe failure leaves the fix unchanged; both are
    /// logged, and `current()` keeps returning whatever is known.
    #[instrument(skip(self, source))]
    pub fn start<S: PositionSource>(&mut self, source: &mut S) {
        if self.subscription.is_some() {
            debug!("Location tracker already started, ignoring");
            return;
        }

        let fix = Arc::clone(&self.fix);
        let sink: FeedSink = Arc::new(move |event| match event {
            FeedEvent::Fix(position) => {
                // Last writer wins, in feed-delivery order.
                let mut guard = fix.lock().unwrap_or_else(|e| e.into_inner());
                *guard = LocationFix::Fix(position);
            }
            FeedEvent::Error(reason) => {
                // Transient errors keep the last good fix.
                warn!(reason = %reason, "Position feed error");
            }
        });

        match source.subscribe(sink) {
            Ok(subscription) => {
                self.subscription = Some(subscription);
                info!("Location tracking started");
            }
            Err(SourceError::PermissionDenied) => {
                let mut guard = self.fix.lock().unwrap_or_else(|e| e.into_inner());
                *guard = LocationFix::Denied;
                warn!("Location capability denied");
            }
            Err(SourceError::Failed(reason)) => {
                error!(reason = %reason, "Position feed could not be started");
            }
        }
    }

    /// The last received fix. Non-blocking; never waits for a fresh one.
    pub fn current(&self) -> LocationFix {
        self.fix.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// End the feed subscription, keeping the last known fix.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        if self.subscription.take().is_some() {
            info!("Location tracking stopped");
        }
    }
}
