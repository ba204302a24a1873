use crate::{
    AlertOrchestrator, CoreError, LocationFix, LocationTracker,
    tests::support::{DeniedFeed, StaticFeed, TestAlarm, TestNotifier, position},
};

use std::sync::{Arc, atomic::Ordering};

fn orchestrator(
    tracker: LocationTracker,
    notifier: TestNotifier,
    alarm: TestAlarm,
) -> AlertOrchestrator<TestNotifier, TestAlarm> {
    AlertOrchestrator::new(tracker, notifier, alarm, "I need help!".to_string())
}

/// WHAT: Exactly one dispatch outcome per contact, in list order
/// WHY: The fan-out contract the UI layer reports against
#[test]
#[allow(clippy::unwrap_used)]
fn given_contacts_when_triggering_then_outcome_per_contact_in_order() {
    // Given: Three registered contacts
    let mut orch = orchestrator(LocationTracker::new(), TestNotifier::new(), TestAlarm::new());
    orch.add_contact("Alice", "555-0001").unwrap();
    orch.add_contact("Bob", "555-0002").unwrap();
    orch.add_contact("Carol", "555-0003").unwrap();

    // When: Triggering an alert
    let result = orch.trigger();

    // Then: One outcome per contact, in insertion order, all delivered
    assert_eq!(result.contacts_total(), 3);
    assert_eq!(result.contacts_delivered(), 3);
    let numbers: Vec<&str> = result
        .dispatches
        .iter()
        .map(|d| d.contact.number.as_str())
        .collect();
    assert_eq!(numbers, vec!["555-0001", "555-0002", "555-0003"]);
}

/// WHAT: A failing contact never aborts the fan-out loop
/// WHY: Dispatch failures are isolated per contact by contract
#[test]
#[allow(clippy::unwrap_used)]
fn given_failing_contact_when_triggering_then_loop_continues() {
    // Given: Three contacts, the middle one rejected by the transport
    let notifier = TestNotifier::failing_for(&["555-0002"]);
    let mut orch = orchestrator(LocationTracker::new(), notifier, TestAlarm::new());
    orch.add_contact("Alice", "555-0001").unwrap();
    orch.add_contact("Bob", "555-0002").unwrap();
    orch.add_contact("Carol", "555-0003").unwrap();

    // When: Triggering an alert
    let result = orch.trigger();

    // Then: All three outcomes recorded, only the middle one failed
    assert_eq!(result.contacts_total(), 3);
    assert_eq!(result.contacts_delivered(), 2);
    assert!(result.dispatches[0].delivered);
    assert!(!result.dispatches[1].delivered);
    assert!(matches!(
        result.dispatches[1].error,
        Some(CoreError::DispatchError { .. })
    ));
    assert!(result.dispatches[2].delivered);
}

/// WHAT: An empty registry still yields a well-formed result
/// WHY: trigger() always completes, even with nobody to notify
#[test]
fn given_empty_registry_when_triggering_then_well_formed_result() {
    // Given: No contacts registered
    let alarm = TestAlarm::new();
    let plays = Arc::clone(&alarm.plays);
    let mut orch = orchestrator(LocationTracker::new(), TestNotifier::new(), alarm);

    // When: Triggering an alert
    let result = orch.trigger();

    // Then: Zero dispatches, alarm outcome present and sounded
    assert_eq!(result.contacts_total(), 0);
    assert_eq!(result.contacts_delivered(), 0);
    assert!(result.alarm.sounded);
    assert_eq!(plays.load(Ordering::SeqCst), 1);
}

/// WHAT: Triggering with no position completes with fix Unavailable
/// WHY: The trigger never blocks waiting for a location fix
#[test]
#[allow(clippy::unwrap_used)]
fn given_no_position_when_triggering_then_fix_unavailable() {
    // Given: A tracker that never received an update
    let notifier = TestNotifier::new();
    let sent = Arc::clone(&notifier.sent);
    let mut orch = orchestrator(LocationTracker::new(), notifier, TestAlarm::new());
    orch.add_contact("Alice", "555-0001").unwrap();

    // When: Triggering an alert
    let result = orch.trigger();

    // Then: The result marks the position unavailable and the payload
    // carried no position
    assert_eq!(result.fix, LocationFix::Unavailable);
    assert_eq!(result.contacts_delivered(), 1);
    let guard = sent.lock().unwrap_or_else(|e| e.into_inner());
    assert!(guard[0].1.position.is_none());
}

/// WHAT: A known fix rides along in the dispatch payload
/// WHY: Contacts receive the position the tracker last observed
#[test]
#[allow(clippy::unwrap_used)]
fn given_tracked_position_when_triggering_then_payload_carries_position() {
    // Given: A tracker fed one fix
    let mut feed = StaticFeed::new(position(40.7128, -74.0060));
    let mut tracker = LocationTracker::new();
    tracker.start(&mut feed);

    let notifier = TestNotifier::new();
    let sent = Arc::clone(&notifier.sent);
    let mut orch = orchestrator(tracker, notifier, TestAlarm::new());
    orch.add_contact("Alice", "555-0001").unwrap();

    // When: Triggering an alert
    let result = orch.trigger();

    // Then: Result and payload both carry the fix
    assert!(matches!(result.fix, LocationFix::Fix(_)));
    let guard = sent.lock().unwrap_or_else(|e| e.into_inner());
    let payload_position = guard[0].1.position.as_ref().unwrap();
    assert!((payload_position.latitude - 40.7128).abs() < f64::EPSILON);
}

/// WHAT: A denied location capability does not block dispatch
/// WHY: An emergency alert goes out with or without a position
#[test]
#[allow(clippy::unwrap_used)]
fn given_denied_location_when_triggering_then_dispatch_proceeds() {
    // Given: A tracker whose capability was refused
    let mut feed = DeniedFeed;
    let mut tracker = LocationTracker::new();
    tracker.start(&mut feed);

    let mut orch = orchestrator(tracker, TestNotifier::new(), TestAlarm::new());
    orch.add_contact("Alice", "555-0001").unwrap();

    // When: Triggering an alert
    let result = orch.trigger();

    // Then: Dispatch succeeded and the result reports the denial
    assert_eq!(result.fix, LocationFix::Denied);
    assert_eq!(result.contacts_delivered(), 1);
}

/// WHAT: An alarm failure never affects the dispatch outcomes
/// WHY: Failure isolation between subsystems is the orchestrator's job
#[test]
#[allow(clippy::unwrap_used)]
fn given_alarm_failure_when_triggering_then_dispatches_unaffected() {
    // Given: Two contacts and an alarm that cannot sound
    let mut orch = orchestrator(
        LocationTracker::new(),
        TestNotifier::new(),
        TestAlarm::failing(),
    );
    orch.add_contact("Alice", "555-0001").unwrap();
    orch.add_contact("Bob", "555-0002").unwrap();

    // When: Triggering an alert
    let result = orch.trigger();

    // Then: All dispatches delivered, alarm failure captured as data
    assert_eq!(result.contacts_delivered(), 2);
    assert!(!result.alarm.sounded);
    assert!(matches!(
        result.alarm.error,
        Some(CoreError::PlaybackError { .. })
    ));
}

/// WHAT: Each trigger gets a distinct alert ID
/// WHY: Alert events are created fresh per trigger, never reused
#[test]
fn given_repeated_triggers_when_comparing_then_distinct_alert_ids() {
    // Given: An orchestrator
    let mut orch = orchestrator(LocationTracker::new(), TestNotifier::new(), TestAlarm::new());

    // When: Triggering twice
    let first = orch.trigger();
    let second = orch.trigger();

    // Then: The alert IDs differ
    assert_ne!(first.alert_id, second.alert_id);
}
