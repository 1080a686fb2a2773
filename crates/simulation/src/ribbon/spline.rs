//! Open centripetal Catmull-Rom curve with arc-length sampling.
//!
//! Centripetal parameterization (knot spacing `|p_i+1 - p_i|^0.5`) keeps the
//! curve from overshooting or looping at the tight grid corners.

use bevy::prelude::*;

/// Samples used to build the arc-length lookup table.
const ARC_LENGTH_DIVISIONS: usize = 200;
/// Knot intervals below this are treated as degenerate.
const MIN_KNOT_INTERVAL: f32 = 1e-4;

#[derive(Debug, Clone, Copy)]
struct CubicPoly {
    c0: f32,
    c1: f32,
    c2: f32,
    c3: f32,
}

impl CubicPoly {
    /// Hermite basis for `x0 -> x1` with tangents `t0`, `t1` on `[0, 1]`.
    fn hermite(x0: f32, x1: f32, t0: f32, t1: f32) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    /// Non-uniform Catmull-Rom segment between `x1` and `x2`.
    fn nonuniform(x0: f32, x1: f32, x2: f32, x3: f32, dt0: f32, dt1: f32, dt2: f32) -> Self {
        let t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        Self::hermite(x1, x2, t1 * dt1, t2 * dt1)
    }

    fn eval(&self, t: f32) -> f32 {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t2 * t
    }
}

#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    arc_lengths: Vec<f32>,
}

impl CatmullRomCurve {
    /// Returns `None` when fewer than two control points are given.
    pub fn centripetal(points: Vec<Vec3>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let mut curve = Self {
            points,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.compute_arc_lengths();
        Some(curve)
    }

    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at curve parameter `t` in `[0, 1]` (uniform per control segment).
    pub fn point(&self, t: f32) -> Vec3 {
        let points = &self.points;
        let l = points.len();
        let p = (l - 1) as f32 * t.clamp(0.0, 1.0);
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;
        if segment >= l - 1 {
            segment = l - 2;
            weight = 1.0;
        }

        let p1 = points[segment];
        let p2 = points[segment + 1];
        // Open curve: mirror the neighbours past each end.
        let p0 = if segment > 0 {
            points[segment - 1]
        } else {
            2.0 * points[0] - points[1]
        };
        let p3 = if segment + 2 < l {
            points[segment + 2]
        } else {
            2.0 * points[l - 1] - points[l - 2]
        };

        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < MIN_KNOT_INTERVAL {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_INTERVAL {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_INTERVAL {
            dt2 = dt1;
        }

        let axis = |f: fn(Vec3) -> f32| {
            CubicPoly::nonuniform(f(p0), f(p1), f(p2), f(p3), dt0, dt1, dt2).eval(weight)
        };
        Vec3::new(axis(|v| v.x), axis(|v| v.y), axis(|v| v.z))
    }

    /// Point at fraction `u` of the total arc length.
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.arc_to_param(u))
    }

    /// Unit tangent at arc-length fraction `u`, by central difference.
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        const DELTA: f32 = 1e-4;
        let u1 = (u - DELTA).max(0.0);
        let u2 = (u + DELTA).min(1.0);
        (self.point_at(u2) - self.point_at(u1)).normalize_or(Vec3::Z)
    }

    fn compute_arc_lengths(&self) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1);
        let mut last = self.point(0.0);
        let mut total = 0.0;
        lengths.push(0.0);
        for i in 1..=ARC_LENGTH_DIVISIONS {
            let current = self.point(i as f32 / ARC_LENGTH_DIVISIONS as f32);
            total += current.distance(last);
            lengths.push(total);
            last = current;
        }
        lengths
    }

    fn arc_to_param(&self, u: f32) -> f32 {
        let lengths = &self.arc_lengths;
        let last_index = lengths.len() - 1;
        let target = u.clamp(0.0, 1.0) * self.length();
        if self.length() <= 0.0 {
            return u.clamp(0.0, 1.0);
        }

        // Last index whose cumulative length does not exceed the target.
        let i = lengths
            .partition_point(|&len| len <= target)
            .saturating_sub(1)
            .min(last_index);
        if i == last_index {
            return 1.0;
        }

        let before = lengths[i];
        let segment = lengths[i + 1] - before;
        let fraction = if segment > 0.0 {
            (target - before) / segment
        } else {
            0.0
        };
        (i as f32 + fraction) / last_index as f32
    }
}
