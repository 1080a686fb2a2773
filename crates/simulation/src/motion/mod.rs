//! Vehicle motion controller.
//!
//! A session picks one [`MotionStrategy`] when the journey starts and keeps it
//! until arrival: [`AutonomousDriver`] follows the planned route on its own,
//! [`ManualDriver`] turns the polled [`DriveInput`] into movement.

pub mod autonomous;
pub mod manual;

pub use autonomous::{turn_speed_multiplier, AutonomousDriver, DrivePhase};
pub use manual::ManualDriver;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{NavigationConfig, VEHICLE_ELEVATION};
use crate::geometry::{forward, GridPoint};
use crate::route_tracker::RouteProgress;

/// How the vehicle gets to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransportMode {
    /// Taxi: the vehicle drives itself along the route.
    #[default]
    Autonomous,
    /// Self-drive with the arrow keys or the on-screen pad.
    Manual,
}

impl TransportMode {
    pub fn label(self) -> &'static str {
        match self {
            TransportMode::Autonomous => "Taxi",
            TransportMode::Manual => "Self-drive",
        }
    }

    /// Minutes per kilometre used for the route summary estimate.
    pub fn minutes_per_km(self) -> f32 {
        match self {
            TransportMode::Autonomous => 1.5,
            TransportMode::Manual => 1.2,
        }
    }
}

/// Position and heading of the vehicle. Heading 0 faces +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehiclePose {
    pub position: GridPoint,
    pub elevation: f32,
    pub heading: f32,
}

impl Default for VehiclePose {
    fn default() -> Self {
        Self {
            position: GridPoint::ORIGIN,
            elevation: VEHICLE_ELEVATION,
            heading: 0.0,
        }
    }
}

impl VehiclePose {
    pub fn new(position: GridPoint, heading: f32) -> Self {
        Self {
            position,
            elevation: VEHICLE_ELEVATION,
            heading,
        }
    }

    /// Move `distance` along the current heading (negative reverses).
    pub fn advance(&mut self, distance: f32) {
        let dir = forward(self.heading);
        self.position.x += dir.x * distance;
        self.position.z += dir.z * distance;
    }

    pub fn forward(&self) -> GridPoint {
        forward(self.heading)
    }

    pub fn translation(&self) -> Vec3 {
        self.position.to_vec3(self.elevation)
    }
}

/// Directional input snapshot for manual driving, refreshed every frame.
///
/// Keyboard and on-screen pad write into the same flags.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl DriveInput {
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }

    pub fn merge(&mut self, other: DriveInput) {
        self.forward |= other.forward;
        self.back |= other.back;
        self.left |= other.left;
        self.right |= other.right;
    }
}

/// What a motion step did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionOutcome {
    /// The pose changed; camera follow and ribbon fade should update.
    pub moved: bool,
    pub arrived: bool,
}

pub trait MotionStrategy {
    fn step(
        &mut self,
        pose: &mut VehiclePose,
        progress: &mut RouteProgress,
        input: &DriveInput,
        config: &NavigationConfig,
    ) -> MotionOutcome;
}

/// The strategy chosen for a session.
#[derive(Debug, Clone)]
pub enum VehicleMotion {
    Autonomous(AutonomousDriver),
    Manual(ManualDriver),
}

impl VehicleMotion {
    pub fn for_mode(mode: TransportMode, config: &NavigationConfig) -> Self {
        match mode {
            TransportMode::Autonomous => {
                VehicleMotion::Autonomous(AutonomousDriver::new(config.speed.cruise_speed))
            }
            TransportMode::Manual => VehicleMotion::Manual(ManualDriver),
        }
    }

    pub fn mode(&self) -> TransportMode {
        match self {
            VehicleMotion::Autonomous(_) => TransportMode::Autonomous,
            VehicleMotion::Manual(_) => TransportMode::Manual,
        }
    }

    /// Current speed in units per tick; manual driving has no ramp and reports 0.
    pub fn actual_speed(&self) -> f32 {
        match self {
            VehicleMotion::Autonomous(driver) => driver.actual_speed(),
            VehicleMotion::Manual(_) => 0.0,
        }
    }

    pub fn target_speed(&self) -> f32 {
        match self {
            VehicleMotion::Autonomous(driver) => driver.target_speed(),
            VehicleMotion::Manual(_) => 0.0,
        }
    }
}

impl MotionStrategy for VehicleMotion {
    fn step(
        &mut self,
        pose: &mut VehiclePose,
        progress: &mut RouteProgress,
        input: &DriveInput,
        config: &NavigationConfig,
    ) -> MotionOutcome {
        match self {
            VehicleMotion::Autonomous(driver) => driver.step(pose, progress, input, config),
            VehicleMotion::Manual(driver) => driver.step(pose, progress, input, config),
        }
    }
}
