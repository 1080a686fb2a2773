use crate::config::NavigationConfig;
use crate::geometry::normalize_angle;
use crate::route_tracker::RouteProgress;

use super::{DriveInput, MotionOutcome, MotionStrategy, VehiclePose};

/// Arrow-key driving: fixed speed, fixed turn rate, clamped to the city.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualDriver;

impl MotionStrategy for ManualDriver {
    fn step(
        &mut self,
        pose: &mut VehiclePose,
        progress: &mut RouteProgress,
        input: &DriveInput,
        config: &NavigationConfig,
    ) -> MotionOutcome {
        let manual = &config.manual;

        if input.forward {
            pose.advance(manual.speed);
        }
        if input.back {
            pose.advance(-manual.speed);
        }
        if input.left {
            pose.heading = normalize_angle(pose.heading + manual.turn_rate);
        }
        if input.right {
            pose.heading = normalize_angle(pose.heading - manual.turn_rate);
        }

        pose.position.x = pose.position.x.clamp(-manual.bound, manual.bound);
        pose.position.z = pose.position.z.clamp(-manual.bound, manual.bound);

        let moved = input.any();
        let arrived = moved && progress.distance_to_final(pose.position) < manual.arrival_distance;
        MotionOutcome { moved, arrived }
    }
}
