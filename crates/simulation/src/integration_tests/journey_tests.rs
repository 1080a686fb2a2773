use crate::config::NavigationConfig;
use crate::motion::{DriveInput, TransportMode};
use crate::ribbon::RibbonStage;
use crate::session::{SessionPhase, SessionRequest};
use crate::test_harness::TestSession;
use crate::venues::DestinationId;

// ====================================================================
// End-to-end journeys
// ====================================================================

fn generated(destination: DestinationId) -> TestSession {
    let mut session = TestSession::new().with_destination(destination);
    session.request(SessionRequest::GenerateRoute);
    session.tick(1);
    assert_eq!(session.phase(), SessionPhase::Generated);
    session
}

#[test]
fn taxi_journey_reaches_wedding_venue() {
    let mut session = generated(DestinationId::Wedding);
    session.tick_until_phase(SessionPhase::Previewing, 400);
    session.tick_until(400, |s| s.orchestrator().ribbon().geometry().is_some());

    session.request(SessionRequest::StartJourney);
    session.tick(1);
    assert_eq!(session.phase(), SessionPhase::Navigating);
    assert_eq!(
        *session.orchestrator().ribbon().stage(),
        RibbonStage::Frozen
    );

    session.tick_until_phase(SessionPhase::Arrived, 20_000);
    assert_eq!(session.arrivals(), &[DestinationId::Wedding]);
    assert_eq!(
        session.status_board().current.message,
        "Arrived at the destination!"
    );
    assert!(session.orchestrator().ribbon().geometry().is_none());

    // Arrival fires once.
    session.tick(30);
    assert_eq!(session.arrivals().len(), 1);

    session.request(SessionRequest::DismissArrival);
    session.tick(1);
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.orchestrator().session().is_none());
}

#[test]
fn ribbon_fades_behind_taxi() {
    let mut session = generated(DestinationId::Groom);
    session.tick_until_phase(SessionPhase::Previewing, 400);
    session.tick_until(400, |s| s.orchestrator().ribbon().geometry().is_some());
    session.request(SessionRequest::StartJourney);
    session.tick_until(2_000, |s| s.orchestrator().ribbon().opacity_revision() > 0);

    let opacity = session.orchestrator().ribbon().opacity();
    assert!(opacity.iter().any(|&a| a < 1.0));
    assert!(opacity.iter().any(|&a| a == 1.0));
}

#[test]
fn manual_journey_moves_only_while_input_held() {
    let mut session = TestSession::new()
        .with_transport_mode(TransportMode::Manual)
        .with_destination(DestinationId::Bride);
    session.request(SessionRequest::GenerateRoute);
    session.request(SessionRequest::StartJourney);
    session.tick(1);
    assert_eq!(session.phase(), SessionPhase::Navigating);

    let parked = session.orchestrator().vehicle_pose();
    session.tick(20);
    assert_eq!(session.orchestrator().vehicle_pose(), parked);

    session.hold_input(DriveInput {
        forward: true,
        ..Default::default()
    });
    session.tick(30);
    let moved = session.orchestrator().vehicle_pose();
    assert!(moved.position.distance(parked.position) > 5.0);

    session.release_input();
    session.tick(1);
    let stopped = session.orchestrator().vehicle_pose();
    session.tick(20);
    assert_eq!(session.orchestrator().vehicle_pose(), stopped);
}

#[test]
fn manual_arrival_needs_movement() {
    let mut config = NavigationConfig::default();
    config.manual.arrival_distance = 10_000.0;
    let mut session = TestSession::with_config(config)
        .with_transport_mode(TransportMode::Manual)
        .with_destination(DestinationId::Groom);
    session.request(SessionRequest::GenerateRoute);
    session.request(SessionRequest::StartJourney);
    session.tick(10);
    assert_eq!(session.phase(), SessionPhase::Navigating);

    session.hold_input(DriveInput {
        right: true,
        ..Default::default()
    });
    session.tick(1);
    assert_eq!(session.phase(), SessionPhase::Arrived);
    assert_eq!(session.arrivals(), &[DestinationId::Groom]);
}

#[test]
fn camera_follows_vehicle_while_navigating() {
    let mut session = generated(DestinationId::Bride);
    session.request(SessionRequest::StartJourney);
    session.tick(200);
    let orchestrator = session.orchestrator();
    assert!(orchestrator.camera().is_following());
    let vehicle = orchestrator.vehicle_pose().translation();
    let camera = orchestrator.camera_pose().position;
    assert!(camera.y > vehicle.y);
    assert!(camera.distance(vehicle) < 120.0);
}
