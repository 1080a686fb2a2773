//! Integration tests using the `TestSession` harness.
//!
//! These spin up a headless Bevy App with `SimulationPlugin` and drive it
//! through `SessionRequest` events, the same way the UI does.

mod journey_tests;

use crate::motion::DriveInput;
use crate::notifications::StatusLevel;
use crate::session::SessionPhase;
use crate::test_harness::TestSession;
use crate::venues::{DestinationId, VenueRegistry};

// ===========================================================================
// 1. Harness bootstrap tests
// ===========================================================================

#[test]
fn new_session_is_idle() {
    let session = TestSession::new();
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.orchestrator().session().is_none());
    assert!(!session.orchestrator().vehicle_visible());
    assert!(session.arrivals().is_empty());
}

#[test]
fn venues_are_registered() {
    let session = TestSession::new();
    let venues = session.resource::<VenueRegistry>();
    for id in DestinationId::ALL {
        assert!(venues.get(id).is_some(), "missing venue {id:?}");
    }
}

#[test]
fn initial_status_prompts_for_destination() {
    let session = TestSession::new();
    let board = session.status_board();
    assert_eq!(board.current.level, StatusLevel::Info);
    assert!(board.history.is_empty());
}

#[test]
fn drive_input_is_cleared_each_frame() {
    let mut session = TestSession::new();
    session.hold_input(DriveInput {
        left: true,
        ..Default::default()
    });
    session.tick(1);
    assert!(session.resource::<DriveInput>().left);

    session.release_input();
    session.tick(1);
    assert_eq!(*session.resource::<DriveInput>(), DriveInput::default());
}

#[test]
fn selecting_destination_does_not_plan() {
    let session = TestSession::new().with_destination(DestinationId::Bride);
    assert_eq!(
        session.orchestrator().selected_destination(),
        Some(DestinationId::Bride)
    );
    assert_eq!(session.phase(), SessionPhase::Idle);
}
