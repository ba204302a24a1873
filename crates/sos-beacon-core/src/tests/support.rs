//! Shared test doubles for the coordination tests.

use crate::{
    Alarm, AlertPayload, Contact, CoreError, CoreResult, FeedEvent, FeedSink, Notifier, Position,
    PositionSource, SourceError, Subscription,
};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::SystemTime,
};

use error_location::ErrorLocation;

pub(crate) fn position(latitude: f64, longitude: f64) -> Position {
    Position {
        latitude,
        longitude,
        timestamp: SystemTime::now(),
    }
}

/// Feed that delivers one fix synchronously at subscribe time.
pub(crate) struct StaticFeed {
    pub(crate) fix: Position,
    pub(crate) cancelled: Arc<AtomicBool>,
    pub(crate) subscribe_calls: Arc<AtomicUsize>,
}

impl StaticFeed {
    pub(crate) fn new(fix: Position) -> Self {
        Self {
            fix,
            cancelled: Arc::new(AtomicBool::new(false)),
            subscribe_calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl PositionSource for StaticFeed {
    fn subscribe(&mut self, sink: FeedSink) -> Result<Subscription, SourceError> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        sink(FeedEvent::Fix(self.fix.clone()));
        Ok(Subscription::new(Arc::clone(&self.cancelled)))
    }
}

/// Feed whose capability is always refused.
pub(crate) struct DeniedFeed;

impl PositionSource for DeniedFeed {
    fn subscribe(&mut self, _sink: FeedSink) -> Result<Subscription, SourceError> {
        Err(SourceError::PermissionDenied)
    }
}

/// Feed that fails to start for a non-permission reason.
pub(crate) struct BrokenFeed;

impl PositionSource for BrokenFeed {
    fn subscribe(&mut self, _sink: FeedSink) -> Result<Subscription, SourceError> {
        Err(SourceError::Failed("feed offline".to_string()))
    }
}

/// Feed that hands its sink to the test so events can be pushed later.
pub(crate) struct ManualFeed {
    pub(crate) sink: Arc<Mutex<Option<FeedSink>>>,
    pub(crate) cancelled: Arc<AtomicBool>,
}

impl ManualFeed {
    pub(crate) fn new() -> Self {
        Self {
            sink: Arc::new(Mutex::new(None)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn emit(&self, event: FeedEvent) {
        let guard = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(sink) = guard.as_ref() {
            sink(event);
        }
    }
}

impl PositionSource for ManualFeed {
    fn subscribe(&mut self, sink: FeedSink) -> Result<Subscription, SourceError> {
        let mut guard = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(sink);
        Ok(Subscription::new(Arc::clone(&self.cancelled)))
    }
}

/// Notifier that records every payload and fails for selected numbers.
pub(crate) struct TestNotifier {
    pub(crate) sent: Arc<Mutex<Vec<(Contact, AlertPayload)>>>,
    pub(crate) fail_numbers: Vec<String>,
}

impl TestNotifier {
    pub(crate) fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_numbers: Vec::new(),
        }
    }

    pub(crate) fn failing_for(numbers: &[&str]) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_numbers: numbers.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl Notifier for TestNotifier {
    fn send(&mut self, contact: &Contact, payload: &AlertPayload) -> CoreResult<()> {
        if self.fail_numbers.contains(&contact.number) {
            return Err(CoreError::DispatchError {
                reason: format!("transport rejected {}", contact.number),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        let mut guard = self.sent.lock().unwrap_or_else(|e| e.into_inner());
        guard.push((contact.clone(), payload.clone()));
        Ok(())
    }
}

/// Alarm double counting plays, optionally failing.
pub(crate) struct TestAlarm {
    pub(crate) plays: Arc<AtomicUsize>,
    pub(crate) fail: bool,
}

impl TestAlarm {
    pub(crate) fn new() -> Self {
        Self {
            plays: Arc::new(AtomicUsize::new(0)),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            plays: Arc::new(AtomicUsize::new(0)),
            fail: true,
        }
    }
}

impl Alarm for TestAlarm {
    fn play(&mut self) -> CoreResult<()> {
        if self.fail {
            return Err(CoreError::PlaybackError {
                reason: "output device refused".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
