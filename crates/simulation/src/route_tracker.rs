use crate::geometry::GridPoint;
use crate::route_planner::WaypointSequence;

/// Result of one [`RouteProgress::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressStep {
    pub reached_index: bool,
    pub all_complete: bool,
}

/// Progress of a vehicle along a [`WaypointSequence`].
///
/// `index` always stays in `[0, len]`; `index == len` means every waypoint
/// has been reached.
#[derive(Debug, Clone)]
pub struct RouteProgress {
    waypoints: WaypointSequence,
    index: usize,
    arrival_radius: f32,
}

impl RouteProgress {
    pub fn new(waypoints: WaypointSequence, arrival_radius: f32) -> Self {
        Self {
            waypoints,
            index: 0,
            arrival_radius,
        }
    }

    pub fn waypoints(&self) -> &WaypointSequence {
        &self.waypoints
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.waypoints.len()
    }

    pub fn current_target(&self) -> Option<GridPoint> {
        self.waypoints.get(self.index)
    }

    /// Moves at most one waypoint forward per call.
    pub fn advance(&mut self, position: GridPoint) -> ProgressStep {
        let Some(target) = self.current_target() else {
            return ProgressStep {
                reached_index: false,
                all_complete: true,
            };
        };

        if position.distance(target) >= self.arrival_radius {
            return ProgressStep::default();
        }

        self.index += 1;
        ProgressStep {
            reached_index: true,
            all_complete: self.is_complete(),
        }
    }

    pub fn distance_to(&self, index: usize, position: GridPoint) -> Option<f32> {
        self.waypoints.get(index).map(|p| position.distance(p))
    }

    /// Straight-line distance to the destination, not remaining path length.
    pub fn distance_to_final(&self, position: GridPoint) -> f32 {
        position.distance(self.waypoints.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route_planner::plan;

    fn straight_route() -> RouteProgress {
        let route = plan(GridPoint::new(0.0, 0.0), GridPoint::new(0.0, 100.0));
        RouteProgress::new(route, 5.0)
    }

    #[test]
    fn test_advance_only_within_radius() {
        let mut progress = straight_route();
        // Start point is waypoint 0.
        let step = progress.advance(GridPoint::new(0.0, 0.0));
        assert!(step.reached_index);
        assert_eq!(progress.index(), 1);

        // Waypoint 1 is at z = 10; 6 units short is outside the radius.
        let step = progress.advance(GridPoint::new(0.0, 4.0));
        assert!(!step.reached_index);
        assert_eq!(progress.index(), 1);
    }

    #[test]
    fn test_advances_at_most_one_per_call() {
        let mut progress = straight_route();
        progress.advance(GridPoint::new(0.0, 0.0));
        progress.advance(GridPoint::new(0.0, 10.0));
        assert_eq!(progress.index(), 2);
    }

    #[test]
    fn test_all_complete_at_end() {
        let mut progress = straight_route();
        let len = progress.waypoints().len();
        let mut last = ProgressStep::default();
        for i in 0..len {
            last = progress.advance(progress.waypoints().get(i).unwrap());
        }
        assert!(last.all_complete);
        assert_eq!(progress.index(), len);
        assert!(progress.current_target().is_none());
        // Further calls stay complete and never overflow the index.
        assert!(progress.advance(GridPoint::ORIGIN).all_complete);
        assert_eq!(progress.index(), len);
    }

    #[test]
    fn test_distance_to_final_is_euclidean() {
        let route = plan(GridPoint::new(0.0, 0.0), GridPoint::new(100.0, 100.0));
        let progress = RouteProgress::new(route, 5.0);
        let d = progress.distance_to_final(GridPoint::new(0.0, 0.0));
        assert!((d - 100.0 * 2f32.sqrt()).abs() < 1e-3);
        assert_eq!(progress.distance_to(0, GridPoint::new(3.0, 4.0)), Some(5.0));
        assert_eq!(progress.distance_to(10_000, GridPoint::ORIGIN), None);
    }
}
