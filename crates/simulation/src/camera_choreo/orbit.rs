use bevy::prelude::*;

use crate::config::CameraConfig;

use super::CameraPose;

/// Orbital camera model: the camera orbits around a focus point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle above the horizon in radians
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
}

impl OrbitState {
    /// Recover orbit parameters from a position / look-at pair.
    pub fn from_pose(pose: CameraPose) -> Self {
        let offset = pose.position - pose.look_at;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return Self {
                focus: pose.look_at,
                yaw: 0.0,
                pitch: 0.0,
                distance: 0.0,
            };
        }
        Self {
            focus: pose.look_at,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
        }
    }

    pub fn to_pose(&self) -> CameraPose {
        // Spherical to cartesian offset from focus
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        CameraPose {
            position: self.focus + Vec3::new(x, y, z),
            look_at: self.focus,
        }
    }

    /// Drag rotation plus a multiplicative zoom, clamped to the configured limits.
    pub fn orbit_by(&mut self, delta_yaw: f32, delta_pitch: f32, zoom_factor: f32, config: &CameraConfig) {
        self.yaw += delta_yaw;
        self.pitch =
            (self.pitch + delta_pitch).clamp(config.min_orbit_pitch, config.max_orbit_pitch);
        self.distance = (self.distance * zoom_factor)
            .clamp(config.min_orbit_distance, config.max_orbit_distance);
    }
}
