use crate::{config::LocationConfig, position_feed::ConfiguredPositionFeed};

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use sos_beacon_core::{FeedEvent, FeedSink, PositionSource, SourceError};

fn config(latitude: Option<f64>, longitude: Option<f64>) -> LocationConfig {
    LocationConfig {
        latitude,
        longitude,
        update_interval_secs: 1,
    }
}

/// WHAT: Missing coordinates behave like a refused capability
/// WHY: The denial path must be exercisable without a real platform feed
#[test]
fn given_missing_coordinates_when_subscribing_then_permission_denied() {
    // Given: A feed with no coordinates configured
    let mut feed = ConfiguredPositionFeed::new(&config(None, None));
    let sink: FeedSink = Arc::new(|_event| {});

    // When: Subscribing
    let result = feed.subscribe(sink);

    // Then: The subscription is refused as a permission denial
    assert!(matches!(result, Err(SourceError::PermissionDenied)));
}

/// WHAT: Configured coordinates are delivered to the sink
/// WHY: The bundled feed is the binary's only source of positions
#[test]
#[allow(clippy::unwrap_used)]
fn given_configured_coordinates_when_subscribing_then_fix_delivered() {
    // Given: A feed with coordinates and a collecting sink
    let mut feed = ConfiguredPositionFeed::new(&config(Some(48.8566), Some(2.3522)));
    let received = Arc::new(Mutex::new(Vec::new()));
    let collector = Arc::clone(&received);
    let sink: FeedSink = Arc::new(move |event| {
        if let FeedEvent::Fix(position) = event {
            let mut guard = collector.lock().unwrap_or_else(|e| e.into_inner());
            guard.push(position);
        }
    });

    // When: Subscribing and letting the feed emit
    let subscription = feed.subscribe(sink).unwrap();
    std::thread::sleep(Duration::from_millis(100));

    // Then: At least one fix with the configured coordinates arrived
    {
        let guard = received.lock().unwrap_or_else(|e| e.into_inner());
        assert!(!guard.is_empty());
        assert!((guard[0].latitude - 48.8566).abs() < f64::EPSILON);
        assert!((guard[0].longitude - 2.3522).abs() < f64::EPSILON);
    }

    drop(subscription);
}
