//! Camera choreography.
//!
//! One [`CameraChoreographer`] owns the camera pose and exactly one
//! [`CameraMode`] at a time:
//!
//! * **Orbit** – user-driven orbit around a focus point (idle / arrived).
//! * **Transition** – an eased move to a target pose; reports completion once.
//! * **Hold** – static pose after a transition finishes.
//! * **Follow** – exponential chase behind the vehicle while navigating.
//!
//! Time is passed in as the elapsed `Duration` of the host clock, so the
//! choreographer itself stays a plain value that tests can drive directly.

pub mod easing;
pub mod orbit;
#[cfg(test)]
mod tests;

pub use easing::ease_in_out_cubic;
pub use orbit::OrbitState;

use std::time::Duration;

use bevy::prelude::*;

use crate::config::CameraConfig;
use crate::motion::VehiclePose;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Chase pose behind `subject`: `follow_distance` back at `follow_height`,
    /// looking `follow_look_ahead` in front of it.
    pub fn behind(subject: &VehiclePose, config: &CameraConfig) -> Self {
        let fwd = subject.forward();
        let position = Vec3::new(
            subject.position.x - fwd.x * config.follow_distance,
            config.follow_height,
            subject.position.z - fwd.z * config.follow_distance,
        );
        let look_at = Vec3::new(
            subject.position.x + fwd.x * config.follow_look_ahead,
            subject.elevation,
            subject.position.z + fwd.z * config.follow_look_ahead,
        );
        Self { position, look_at }
    }
}

/// Identifies one `transition_to` call; superseded ids never complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionId(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub id: TransitionId,
    pub from: CameraPose,
    pub to: CameraPose,
    pub started: Duration,
    pub duration: Duration,
}

impl Transition {
    /// Linear progress in `[0, 1]`. A zero duration is complete immediately.
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: Duration) -> CameraPose {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        let eased = ease_in_out_cubic(t);
        CameraPose {
            position: self.from.position.lerp(self.to.position, eased),
            look_at: self.from.look_at.lerp(self.to.look_at, eased),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    Orbit(OrbitState),
    Transition(Transition),
    Hold,
    Follow,
}

#[derive(Debug, Clone)]
pub struct CameraChoreographer {
    pose: CameraPose,
    mode: CameraMode,
    next_id: u64,
}

impl CameraChoreographer {
    /// Starts in orbit mode around `pose.look_at`.
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            mode: CameraMode::Orbit(OrbitState::from_pose(pose)),
            next_id: 0,
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn mode(&self) -> &CameraMode {
        &self.mode
    }

    pub fn is_following(&self) -> bool {
        matches!(self.mode, CameraMode::Follow)
    }

    pub fn in_flight(&self) -> Option<TransitionId> {
        match self.mode {
            CameraMode::Transition(t) => Some(t.id),
            _ => None,
        }
    }

    /// Begin an eased move from the current pose. Replaces any other mode,
    /// including a transition already in flight.
    pub fn transition_to(
        &mut self,
        position: Vec3,
        look_at: Vec3,
        duration: Duration,
        now: Duration,
    ) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.mode = CameraMode::Transition(Transition {
            id,
            from: self.pose,
            to: CameraPose::new(position, look_at),
            started: now,
            duration,
        });
        id
    }

    /// Advance a running transition. Returns its id on the update that
    /// reaches progress 1, after which the camera holds the target pose.
    pub fn update(&mut self, now: Duration) -> Option<TransitionId> {
        let CameraMode::Transition(transition) = self.mode else {
            return None;
        };
        self.pose = transition.sample(now);
        if transition.progress(now) >= 1.0 {
            self.mode = CameraMode::Hold;
            return Some(transition.id);
        }
        None
    }

    /// Enter follow mode, snapping straight onto the chase pose.
    pub fn follow(&mut self, subject: &VehiclePose, config: &CameraConfig) {
        self.pose = CameraPose::behind(subject, config);
        self.mode = CameraMode::Follow;
    }

    /// Smooth the chase pose toward `subject`. No-op outside follow mode.
    pub fn track(&mut self, subject: &VehiclePose, config: &CameraConfig) {
        if !self.is_following() {
            return;
        }
        let target = CameraPose::behind(subject, config);
        self.pose.position += (target.position - self.pose.position) * config.follow_position_lerp;
        self.pose.look_at += (target.look_at - self.pose.look_at) * config.follow_look_at_lerp;
    }

    /// Hand the camera back to the user, orbiting the current look-at point.
    pub fn orbit(&mut self) {
        self.mode = CameraMode::Orbit(OrbitState::from_pose(self.pose));
    }

    /// Apply mouse orbit input. Ignored unless in orbit mode.
    pub fn orbit_by(&mut self, delta_yaw: f32, delta_pitch: f32, zoom_factor: f32, config: &CameraConfig) {
        if let CameraMode::Orbit(state) = &mut self.mode {
            state.orbit_by(delta_yaw, delta_pitch, zoom_factor, config);
            self.pose = state.to_pose();
        }
    }
}
