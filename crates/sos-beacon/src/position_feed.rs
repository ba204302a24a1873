//! Bundled position feed driven by static configuration.
//!
//! A stand-in for a platform location service: it emits the configured
//! coordinates on a fixed interval from a background thread. Integrators
//! replace it with a real feed behind the same `PositionSource` seam.

use crate::config::LocationConfig;

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, SystemTime},
};

use sos_beacon_core::{FeedEvent, FeedSink, Position, PositionSource, SourceError, Subscription};
use tracing::{debug, info};

/// Emits the configured coordinates on a fixed interval.
///
/// Coordinates absent from the config are treated as a refused
/// capability, exercising the same degraded path a real platform
/// denial would.
pub(crate) struct ConfiguredPositionFeed {
    latitude: Option<f64>,
    longitude: Option<f64>,
    interval: Duration,
}

impl ConfiguredPositionFeed {
    /// Build the feed from the `[location]` config section.
    pub(crate) fn new(config: &LocationConfig) -> Self {
        Self {
            latitude: config.latitude,
            longitude: config.longitude,
            interval: Duration::from_secs(config.update_interval_secs.max(1)),
        }
    }
}

impl PositionSource for ConfiguredPositionFeed {
    fn subscribe(&mut self, sink: FeedSink) -> Result<Subscription, SourceError> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(SourceError::PermissionDenied);
        };

        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let interval = self.interval;

        thread::Builder::new()
            .name("position-feed".to_string())
            .spawn(move || {
                debug!("Position feed thread started");
                while !flag.load(Ordering::Acquire) {
                    sink(FeedEvent::Fix(Position {
                        latitude,
                        longitude,
                        timestamp: SystemTime::now(),
                    }));
                    thread::sleep(interval);
                }
                debug!("Position feed thread stopped");
            })
            .map_err(|e| SourceError::Failed(format!("failed to spawn feed thread: {}", e)))?;

        info!(
            interval_secs = interval.as_secs(),
            "Configured position feed subscribed"
        );

        Ok(Subscription::new(cancelled))
    }
}
