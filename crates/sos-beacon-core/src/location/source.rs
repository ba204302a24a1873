use crate::location::Position;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use thiserror::Error;
use tracing::debug;

/// An update delivered by a platform position feed.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A new position fix.
    Fix(Position),
    /// A transient feed error. Delivery continues afterwards.
    Error(String),
}

/// Callback through which a feed delivers [`FeedEvent`]s to the tracker.
///
/// Invoked from whatever thread the feed runs on; implementations must
/// be cheap and must not block the feed.
pub type FeedSink = Arc<dyn Fn(FeedEvent) + Send + Sync>;

/// Why a feed subscription could not be established.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The platform refused the location capability.
    #[error("location permission denied")]
    PermissionDenied,
    /// The feed could not be started for another reason.
    #[error("position feed failed: {0}")]
    Failed(String),
}

/// Guard for an active feed subscription.
///
/// Dropping the subscription signals the feed to stop delivering events.
/// Feeds observe this through the shared cancellation flag handed to
/// [`Subscription::new`].
#[derive(Debug)]
pub struct Subscription {
    cancelled: Arc<AtomicBool>,
}

impl Subscription {
    /// Create a subscription guard around a feed's cancellation flag.
    pub fn new(cancelled: Arc<AtomicBool>) -> Self {
        Self { cancelled }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        debug!("Position feed subscription cancelled");
    }
}

/// A continuous platform position feed.
///
/// The single seam between the tracker and the platform: real feeds wrap
/// an OS location service, tests drive the sink directly. Permission is
/// resolved once, at subscribe time.
pub trait PositionSource {
    /// Begin delivering updates to `sink`.
    ///
    /// Returns [`SourceError::PermissionDenied`] if the platform refuses
    /// the capability, or [`SourceError::Failed`] if the feed cannot be
    /// started. Implementations may invoke the sink before returning.
    fn subscribe(&mut self, sink: FeedSink) -> Result<Subscription, SourceError>;
}
