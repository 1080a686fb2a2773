//! Planar math shared by the planner, the tracker and the motion controller.
//!
//! Heading convention: 0 rad faces +Z, positive rotation turns toward +X, so
//! the forward vector for heading `h` is `(sin h, cos h)`.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A position on the horizontal (XZ) plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: f32,
    pub z: f32,
}

impl GridPoint {
    pub const ORIGIN: GridPoint = GridPoint { x: 0.0, z: 0.0 };

    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn distance(self, other: GridPoint) -> f32 {
        (other.x - self.x).hypot(other.z - self.z)
    }

    pub fn lerp(self, other: GridPoint, t: f32) -> GridPoint {
        GridPoint {
            x: self.x + (other.x - self.x) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Heading that faces `target` from this point.
    pub fn heading_toward(self, target: GridPoint) -> f32 {
        (target.x - self.x).atan2(target.z - self.z)
    }

    pub fn to_vec3(self, y: f32) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }
}

impl From<(f32, f32)> for GridPoint {
    fn from((x, z): (f32, f32)) -> Self {
        Self { x, z }
    }
}

/// Wrap an angle into `(-PI, PI]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Unit forward vector on the XZ plane for a heading.
pub fn forward(heading: f32) -> GridPoint {
    GridPoint {
        x: heading.sin(),
        z: heading.cos(),
    }
}
