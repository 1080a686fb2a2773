//! Grid path planner.
//!
//! Produces a deterministic "Z-shaped" route across the road grid by moving
//! along one axis at a time, one or two blocks per turn, then densifies the
//! raw corners into an evenly sampled polyline for the follower and the ribbon.

use bevy::prelude::*;

use crate::config::{GRID_BOUND, GRID_SPACING, MAX_RAW_WAYPOINTS, SEGMENTS_PER_SECTION};
use crate::geometry::GridPoint;

/// An immutable, non-empty route. First point is the start, last the destination.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointSequence {
    points: Vec<GridPoint>,
}

impl WaypointSequence {
    /// Returns `None` for an empty point list.
    pub fn from_points(points: Vec<GridPoint>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<GridPoint> {
        self.points.get(index).copied()
    }

    pub fn start(&self) -> GridPoint {
        self.points[0]
    }

    pub fn end(&self) -> GridPoint {
        self.points[self.points.len() - 1]
    }

    /// First point after the start that differs from it, if any.
    pub fn first_distinct_after_start(&self) -> Option<GridPoint> {
        let start = self.start();
        self.points.iter().skip(1).copied().find(|p| *p != start)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Z,
}

impl Axis {
    fn other(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    fn get(self, p: GridPoint) -> f32 {
        match self {
            Axis::X => p.x,
            Axis::Z => p.z,
        }
    }

    fn set(self, p: &mut GridPoint, value: f32) {
        match self {
            Axis::X => p.x = value,
            Axis::Z => p.z = value,
        }
    }
}

/// Advance `current` along `axis` toward `end` for one turn, pushing a raw
/// waypoint after every step.
fn move_along_axis(axis: Axis, current: &mut GridPoint, end: GridPoint, raw: &mut Vec<GridPoint>) {
    let target = axis.get(end);
    let remaining = (target - axis.get(*current)).abs();

    if remaining >= GRID_SPACING {
        let blocks = (remaining / GRID_SPACING).floor() as usize;
        let steps = blocks.min(if remaining > 2.0 * GRID_SPACING { 2 } else { 1 });
        for _ in 0..steps {
            let value = axis.get(*current);
            let step = if value < target {
                GRID_SPACING
            } else {
                -GRID_SPACING
            };
            axis.set(current, (value + step).clamp(-GRID_BOUND, GRID_BOUND));
            raw.push(*current);
        }
    } else if remaining > 0.0 {
        axis.set(current, target);
        raw.push(*current);
    }
}

/// Corner waypoints between `start` and `end`, starting on the X axis.
///
/// Gives up after [`MAX_RAW_WAYPOINTS`] and returns the partial path; that
/// only happens for destinations outside the grid bounds. Non-finite
/// endpoints yield just the start point.
pub fn plan_raw(start: GridPoint, end: GridPoint) -> Vec<GridPoint> {
    if !start.is_finite() || !end.is_finite() {
        warn!(
            "Route planner got a non-finite endpoint ({}, {}) -> ({}, {}); returning the start only",
            start.x, start.z, end.x, end.z
        );
        return vec![start];
    }

    let mut raw = vec![start];
    let mut current = start;
    let mut axis = Axis::X;
    // Every pass either moves or switches axis, so two passes per waypoint
    // bound the walk even if a pass fails to push.
    let max_passes = 2 * (MAX_RAW_WAYPOINTS + 1);

    for _ in 0..max_passes {
        if current == end {
            return raw;
        }
        if axis.get(current) == axis.get(end) {
            axis = axis.other();
            continue;
        }
        move_along_axis(axis, &mut current, end, &mut raw);
        axis = axis.other();

        if raw.len() > MAX_RAW_WAYPOINTS {
            break;
        }
    }

    if current != end {
        warn!(
            "Route planner hit the {} waypoint cap between ({}, {}) and ({}, {}); returning partial path",
            MAX_RAW_WAYPOINTS, start.x, start.z, end.x, end.z
        );
    }
    raw
}

/// Insert `segments_per_section - 1` evenly spaced points between each raw pair.
///
/// The first and last raw points are emitted unchanged.
pub fn densify(raw: &[GridPoint], segments_per_section: usize) -> Vec<GridPoint> {
    let Some(&last) = raw.last() else {
        return Vec::new();
    };
    let segments = segments_per_section.max(1);

    let mut dense = Vec::with_capacity((raw.len() - 1) * segments + 1);
    for pair in raw.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        dense.push(a);
        for j in 1..segments {
            dense.push(a.lerp(b, j as f32 / segments as f32));
        }
    }
    dense.push(last);
    dense
}

/// Plan and densify a route.
pub fn plan(start: GridPoint, end: GridPoint) -> WaypointSequence {
    if start == end {
        return WaypointSequence {
            points: vec![start],
        };
    }
    WaypointSequence {
        points: densify(&plan_raw(start, end), SEGMENTS_PER_SECTION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, z: f32) -> GridPoint {
        GridPoint::new(x, z)
    }

    #[test]
    fn test_wedding_route_raw_corners() {
        let raw = plan_raw(p(200.0, 200.0), p(-150.0, -100.0));
        assert_eq!(
            raw,
            vec![
                p(200.0, 200.0),
                p(100.0, 200.0),
                p(0.0, 200.0),
                p(0.0, 100.0),
                p(0.0, 0.0),
                p(-100.0, 0.0),
                p(-100.0, -100.0),
                p(-150.0, -100.0),
            ]
        );
    }

    #[test]
    fn test_wedding_route_is_axis_aligned_and_exact() {
        let start = p(200.0, 200.0);
        let end = p(-150.0, -100.0);
        let raw = plan_raw(start, end);
        for pair in raw.windows(2) {
            let dx = (pair[1].x - pair[0].x).abs();
            let dz = (pair[1].z - pair[0].z).abs();
            assert!(dx == 0.0 || dz == 0.0, "diagonal move {pair:?}");
            assert!(dx.max(dz) <= GRID_SPACING);
        }

        let route = plan(start, end);
        assert_eq!(route.len(), (raw.len() - 1) * SEGMENTS_PER_SECTION + 1);
        assert_eq!(route.start(), start);
        assert_eq!(route.end(), end);
    }

    #[test]
    fn test_all_grid_pairs_terminate_with_exact_endpoints() {
        let coords: Vec<f32> = (-3..=3).map(|i| i as f32 * GRID_SPACING).collect();
        for &sx in &coords {
            for &sz in &coords {
                for &ex in &coords {
                    for &ez in &coords {
                        let (start, end) = (p(sx, sz), p(ex, ez));
                        let raw = plan_raw(start, end);
                        assert!(raw.len() <= MAX_RAW_WAYPOINTS);
                        assert_eq!(*raw.last().unwrap(), end);
                        let route = plan(start, end);
                        assert_eq!(route.start(), start);
                        assert_eq!(route.end(), end);
                    }
                }
            }
        }
    }

    #[test]
    fn test_aligned_axis_switches_without_turn() {
        // Same X: the first move must already be along Z.
        let raw = plan_raw(p(0.0, 0.0), p(0.0, 300.0));
        assert_eq!(raw, vec![p(0.0, 0.0), p(0.0, 100.0), p(0.0, 200.0), p(0.0, 300.0)]);
    }

    #[test]
    fn test_start_equals_end_is_single_point() {
        let route = plan(p(50.0, 50.0), p(50.0, 50.0));
        assert_eq!(route.points(), &[p(50.0, 50.0)]);
        assert_eq!(route.first_distinct_after_start(), None);
    }

    #[test]
    fn test_out_of_bounds_target_hits_cap() {
        // Clamping pins z at the grid bound, so the target is never reached.
        let raw = plan_raw(p(0.0, 0.0), p(0.0, 1000.0));
        assert!(raw.len() > MAX_RAW_WAYPOINTS);
        assert!(raw.len() <= MAX_RAW_WAYPOINTS + 2);
        assert_eq!(*raw.last().unwrap(), p(0.0, GRID_BOUND));
    }

    #[test]
    fn test_non_finite_endpoints_return_start_only() {
        assert_eq!(plan_raw(p(f32::NAN, 0.0), p(0.0, 0.0)).len(), 1);
        assert_eq!(plan_raw(p(0.0, 0.0), p(0.0, f32::NAN)), vec![p(0.0, 0.0)]);
        assert_eq!(plan_raw(p(0.0, 0.0), p(f32::INFINITY, 0.0)), vec![p(0.0, 0.0)]);
        assert_eq!(plan(p(0.0, 0.0), p(f32::NEG_INFINITY, 100.0)).len(), 1);
    }

    #[test]
    fn test_densify_is_deterministic_and_preserves_ends() {
        let raw = vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, -50.0)];
        let a = densify(&raw, 10);
        let b = densify(&raw, 10);
        assert_eq!(a, b);
        assert_eq!(a.len(), 21);
        assert_eq!(a[0], raw[0]);
        assert_eq!(a[10], raw[1]);
        assert_eq!(*a.last().unwrap(), raw[2]);
        assert!((a[3].x - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_densify_degenerate_inputs() {
        assert!(densify(&[], 10).is_empty());
        assert_eq!(densify(&[p(1.0, 2.0)], 10), vec![p(1.0, 2.0)]);
    }

    #[test]
    fn test_first_distinct_after_start() {
        let route = plan(p(200.0, 200.0), p(-150.0, -100.0));
        assert_eq!(route.first_distinct_after_start(), Some(p(190.0, 200.0)));
    }
}
