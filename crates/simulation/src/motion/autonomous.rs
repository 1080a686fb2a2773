use crate::config::{NavigationConfig, SpeedConfig, SteeringConfig};
use crate::geometry::{normalize_angle, GridPoint};
use crate::route_tracker::RouteProgress;

use super::{DriveInput, MotionOutcome, MotionStrategy, VehiclePose};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrivePhase {
    #[default]
    Accelerating,
    Cruising,
    Decelerating,
    Stopped,
}

/// Route follower with a speed ramp and look-ahead pursuit steering.
#[derive(Debug, Clone)]
pub struct AutonomousDriver {
    phase: DrivePhase,
    actual_speed: f32,
    target_speed: f32,
}

impl AutonomousDriver {
    pub fn new(target_speed: f32) -> Self {
        Self {
            phase: DrivePhase::Accelerating,
            actual_speed: 0.0,
            target_speed,
        }
    }

    pub fn phase(&self) -> DrivePhase {
        self.phase
    }

    pub fn actual_speed(&self) -> f32 {
        self.actual_speed
    }

    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    pub fn is_decelerating(&self) -> bool {
        self.phase == DrivePhase::Decelerating
    }

    /// Ramp `actual_speed` for this tick. Deceleration latches the first time
    /// the destination is closer than `decel_distance`.
    fn ramp_speed(&mut self, distance_to_final: f32, speed: &SpeedConfig) {
        if self.phase != DrivePhase::Decelerating && distance_to_final < speed.decel_distance {
            self.phase = DrivePhase::Decelerating;
        }

        if self.phase == DrivePhase::Decelerating {
            let floor = speed.decel_floor.min(self.target_speed);
            if self.actual_speed > floor {
                self.actual_speed = (self.actual_speed - speed.deceleration).max(floor);
            } else if self.actual_speed < floor {
                self.actual_speed = (self.actual_speed + speed.acceleration).min(floor);
            }
        } else {
            self.actual_speed = (self.actual_speed + speed.acceleration).min(self.target_speed);
            self.phase = if self.actual_speed >= self.target_speed {
                DrivePhase::Cruising
            } else {
                DrivePhase::Accelerating
            };
        }
    }

    fn stop(&mut self) {
        self.phase = DrivePhase::Stopped;
        self.actual_speed = 0.0;
    }
}

impl MotionStrategy for AutonomousDriver {
    fn step(
        &mut self,
        pose: &mut VehiclePose,
        progress: &mut RouteProgress,
        _input: &DriveInput,
        config: &NavigationConfig,
    ) -> MotionOutcome {
        if self.phase == DrivePhase::Stopped {
            return MotionOutcome::default();
        }

        self.ramp_speed(progress.distance_to_final(pose.position), &config.speed);

        let step = progress.advance(pose.position);
        if step.all_complete {
            self.stop();
            return MotionOutcome {
                moved: false,
                arrived: true,
            };
        }
        if step.reached_index {
            return MotionOutcome::default();
        }

        let Some(target) = progress.current_target() else {
            return MotionOutcome::default();
        };
        let distance = pose.position.distance(target);
        let look_ahead = look_ahead_distance(self.target_speed, distance, &config.steering);
        let aim = look_ahead_point(
            progress.waypoints().points(),
            progress.index(),
            distance,
            look_ahead,
        )
        .unwrap_or(target);

        let desired = pose.position.heading_toward(aim);
        let delta = normalize_angle(desired - pose.heading);
        let steering = &config.steering;
        if delta.abs() > steering.heading_deadband {
            let turn = (delta.abs() * steering.turn_rate_gain).min(steering.max_turn_rate);
            pose.heading = normalize_angle(pose.heading + turn * delta.signum());
        }

        let multiplier = turn_speed_multiplier(delta.abs().to_degrees());
        pose.advance(self.actual_speed * multiplier);

        MotionOutcome {
            moved: true,
            arrived: false,
        }
    }
}

/// `clamp(speed * gain * sqrt(distance / reference), min, max)`.
pub fn look_ahead_distance(speed: f32, distance_to_target: f32, steering: &SteeringConfig) -> f32 {
    let raw = speed
        * steering.look_ahead_gain
        * (distance_to_target / steering.look_ahead_reference).sqrt();
    raw.clamp(steering.min_look_ahead, steering.max_look_ahead)
}

/// Walk forward from `index`, accumulating segment lengths on top of
/// `distance_to_target`, until `look_ahead` is covered or the route ends.
pub fn look_ahead_point(
    points: &[GridPoint],
    index: usize,
    distance_to_target: f32,
    look_ahead: f32,
) -> Option<GridPoint> {
    let mut aim = *points.get(index)?;
    let mut accumulated = distance_to_target;
    let mut i = index;
    while i + 1 < points.len() && accumulated < look_ahead {
        accumulated += points[i].distance(points[i + 1]);
        i += 1;
        aim = points[i];
    }
    Some(aim)
}

/// Forward speed scale for a heading error, in degrees.
pub fn turn_speed_multiplier(error_degrees: f32) -> f32 {
    match error_degrees {
        d if d > 60.0 => 0.5,
        d if d > 45.0 => 0.6,
        d if d > 30.0 => 0.7,
        d if d > 15.0 => 0.85,
        d if d > 5.0 => 0.95,
        _ => 1.0,
    }
}
