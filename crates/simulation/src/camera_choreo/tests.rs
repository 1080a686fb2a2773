use std::time::Duration;

use bevy::prelude::*;

use crate::camera_choreo::*;
use crate::config::CameraConfig;
use crate::geometry::GridPoint;
use crate::motion::VehiclePose;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn start_pose() -> CameraPose {
    CameraPose::new(Vec3::new(100.0, 120.0, 150.0), Vec3::ZERO)
}

#[test]
fn test_transition_lands_exactly_on_target_and_completes_once() {
    let mut camera = CameraChoreographer::new(start_pose());
    let target = Vec3::new(0.0, 300.0, 50.0);
    let id = camera.transition_to(target, Vec3::ZERO, ms(2500), ms(1000));

    assert_eq!(camera.update(ms(1000)), None);
    assert_eq!(camera.pose().position, start_pose().position);

    let mut completions = 0;
    for t in (1016..=3600).step_by(16) {
        if let Some(done) = camera.update(ms(t)) {
            assert_eq!(done, id);
            assert!(t >= 3500, "completed early at {t}");
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(camera.pose().position, target);
    assert_eq!(camera.pose().look_at, Vec3::ZERO);
    assert_eq!(*camera.mode(), CameraMode::Hold);
}

#[test]
fn test_transition_at_exact_duration_has_no_residual() {
    let mut camera = CameraChoreographer::new(start_pose());
    let target = Vec3::new(-12.5, 33.0, 7.25);
    let look = Vec3::new(1.0, 2.0, 3.0);
    let id = camera.transition_to(target, look, ms(400), ms(0));
    assert_eq!(camera.update(ms(400)), Some(id));
    assert_eq!(camera.pose(), CameraPose::new(target, look));
}

#[test]
fn test_midpoint_is_halfway_under_symmetric_easing() {
    let mut camera = CameraChoreographer::new(start_pose());
    camera.transition_to(Vec3::new(0.0, 300.0, 50.0), Vec3::ZERO, ms(1000), ms(0));
    camera.update(ms(500));
    let mid = camera.pose().position;
    let expected = start_pose().position.lerp(Vec3::new(0.0, 300.0, 50.0), 0.5);
    assert!(mid.distance(expected) < 1e-3);
}

#[test]
fn test_new_transition_restarts_from_current_pose() {
    let mut camera = CameraChoreographer::new(start_pose());
    let first = camera.transition_to(Vec3::new(0.0, 300.0, 50.0), Vec3::ZERO, ms(1000), ms(0));
    camera.update(ms(500));
    let mid = camera.pose();

    let second = camera.transition_to(Vec3::new(50.0, 50.0, 50.0), Vec3::ONE, ms(1000), ms(500));
    assert_ne!(first, second);
    match camera.mode() {
        CameraMode::Transition(t) => assert_eq!(t.from, mid),
        other => panic!("expected transition, got {other:?}"),
    }

    // Only the second transition ever completes.
    let mut completed = Vec::new();
    for t in (500..=2000).step_by(50) {
        completed.extend(camera.update(ms(t)));
    }
    assert_eq!(completed, vec![second]);
}

#[test]
fn test_zero_duration_completes_on_first_update() {
    let mut camera = CameraChoreographer::new(start_pose());
    let id = camera.transition_to(Vec3::X, Vec3::Y, Duration::ZERO, ms(10));
    assert_eq!(camera.update(ms(10)), Some(id));
    assert_eq!(camera.pose().position, Vec3::X);
}

#[test]
fn test_follow_snaps_behind_subject() {
    let config = CameraConfig::default();
    let mut camera = CameraChoreographer::new(start_pose());
    let subject = VehiclePose::new(GridPoint::new(10.0, 20.0), 0.0);
    camera.follow(&subject, &config);

    assert!(camera.is_following());
    let pose = camera.pose();
    assert!(pose.position.distance(Vec3::new(10.0, 50.0, -30.0)) < 1e-4);
    assert!(pose.look_at.distance(Vec3::new(10.0, 1.0, 40.0)) < 1e-4);
}

#[test]
fn test_track_uses_distinct_lerp_factors() {
    let config = CameraConfig::default();
    let mut camera = CameraChoreographer::new(start_pose());
    let mut subject = VehiclePose::new(GridPoint::ORIGIN, 0.0);
    camera.follow(&subject, &config);
    let before = camera.pose();

    subject.position.z += 10.0;
    camera.track(&subject, &config);
    let after = camera.pose();

    assert!((after.position.z - before.position.z - 10.0 * config.follow_position_lerp).abs() < 1e-4);
    assert!((after.look_at.z - before.look_at.z - 10.0 * config.follow_look_at_lerp).abs() < 1e-4);
}

#[test]
fn test_follow_and_transition_are_exclusive() {
    let config = CameraConfig::default();
    let mut camera = CameraChoreographer::new(start_pose());
    let subject = VehiclePose::new(GridPoint::ORIGIN, 0.0);

    camera.transition_to(Vec3::Y * 300.0, Vec3::ZERO, ms(1000), ms(0));
    camera.follow(&subject, &config);
    assert_eq!(camera.in_flight(), None);
    assert_eq!(camera.update(ms(5000)), None);

    camera.transition_to(Vec3::Y * 300.0, Vec3::ZERO, ms(1000), ms(0));
    assert!(!camera.is_following());
    let pose = camera.pose();
    camera.track(&subject, &config);
    assert_eq!(camera.pose(), pose);
}

#[test]
fn test_orbit_round_trip_and_pitch_clamp() {
    let config = CameraConfig::default();
    let state = OrbitState::from_pose(start_pose());
    let back = state.to_pose();
    assert!(back.position.distance(start_pose().position) < 1e-3);

    let mut camera = CameraChoreographer::new(start_pose());
    camera.orbit_by(0.0, -10.0, 1.0, &config);
    let pose = camera.pose();
    let elevation = ((pose.position.y - pose.look_at.y) / pose.position.distance(pose.look_at)).asin();
    assert!((elevation - config.min_orbit_pitch).abs() < 1e-4);

    camera.orbit_by(0.0, 0.0, 1000.0, &config);
    assert!((camera.pose().position.distance(Vec3::ZERO) - config.max_orbit_distance).abs() < 1e-2);
}

#[test]
fn test_orbit_input_ignored_while_following() {
    let config = CameraConfig::default();
    let mut camera = CameraChoreographer::new(start_pose());
    camera.follow(&VehiclePose::default(), &config);
    let pose = camera.pose();
    camera.orbit_by(1.0, 0.2, 0.5, &config);
    assert_eq!(camera.pose(), pose);
}
