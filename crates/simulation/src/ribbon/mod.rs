//! Route ribbon: a yellow tube over the planned path.
//!
//! The ribbon is drawn progressively while the route is previewed, frozen
//! when the journey starts, then erased behind the vehicle by lowering
//! per-vertex opacity. `revision` and `opacity_revision` bump whenever the
//! geometry or the opacity buffer change so the renderer can skip idle frames.

pub mod fade;
pub mod reveal;
pub mod spline;
pub mod tube;

pub use fade::RibbonVisibility;
pub use reveal::RibbonReveal;
pub use spline::CatmullRomCurve;
pub use tube::{build_tube, RibbonGeometry};

use std::time::Duration;

use crate::config::{RibbonConfig, RIBBON_HEIGHT};
use crate::geometry::GridPoint;
use crate::route_planner::WaypointSequence;

/// Build the tube through `points`. Fewer than two points yield no ribbon.
pub fn build_ribbon(points: &[GridPoint], config: &RibbonConfig) -> Option<RibbonGeometry> {
    let controls = points.iter().map(|p| p.to_vec3(RIBBON_HEIGHT)).collect();
    let curve = CatmullRomCurve::centripetal(controls)?;
    let segments = (points.len() * config.tubular_segments_per_point).max(config.min_tubular_segments);
    Some(build_tube(&curve, segments, config.radius, config.radial_segments))
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RibbonStage {
    #[default]
    Hidden,
    Revealing(RibbonReveal),
    /// Geometry fixed; only opacity changes from here on.
    Frozen,
}

#[derive(Debug, Clone, Default)]
pub struct RouteRibbon {
    stage: RibbonStage,
    geometry: Option<RibbonGeometry>,
    visibility: RibbonVisibility,
    revision: u64,
    opacity_revision: u64,
}

impl RouteRibbon {
    pub fn stage(&self) -> &RibbonStage {
        &self.stage
    }

    pub fn geometry(&self) -> Option<&RibbonGeometry> {
        self.geometry.as_ref()
    }

    pub fn opacity(&self) -> &[f32] {
        self.visibility.opacity()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn opacity_revision(&self) -> u64 {
        self.opacity_revision
    }

    /// Drop any previous ribbon and start drawing from the first waypoint.
    pub fn start_reveal(&mut self, now: Duration, config: &RibbonConfig) {
        self.clear();
        self.stage = RibbonStage::Revealing(RibbonReveal::new(now, config.reveal_duration()));
    }

    /// Extend the drawn prefix of `waypoints`. Returns whether geometry was rebuilt.
    pub fn reveal(&mut self, waypoints: &WaypointSequence, now: Duration, config: &RibbonConfig) -> bool {
        let RibbonStage::Revealing(reveal) = &mut self.stage else {
            return false;
        };
        let Some(index) = reveal.update(now, waypoints.len()) else {
            return false;
        };
        let Some(geometry) = build_ribbon(&waypoints.points()[..=index], config) else {
            return false;
        };
        self.visibility = RibbonVisibility::opaque(geometry.vertex_count());
        self.geometry = Some(geometry);
        self.revision += 1;
        true
    }

    pub fn is_revealing(&self) -> bool {
        matches!(self.stage, RibbonStage::Revealing(_))
    }

    /// Stop revealing and keep whatever has been drawn for fading.
    pub fn freeze(&mut self) {
        self.stage = RibbonStage::Frozen;
    }

    /// Erase the part of a frozen ribbon near the vehicle.
    pub fn fade(&mut self, vehicle: GridPoint, config: &RibbonConfig) -> bool {
        if self.stage != RibbonStage::Frozen {
            return false;
        }
        let Some(geometry) = &self.geometry else {
            return false;
        };
        let changed = self
            .visibility
            .fade(&geometry.positions, vehicle, config.fade_distance);
        if changed {
            self.opacity_revision += 1;
        }
        changed
    }

    pub fn clear(&mut self) {
        if self.geometry.is_some() {
            self.revision += 1;
        }
        self.geometry = None;
        self.visibility = RibbonVisibility::default();
        self.stage = RibbonStage::Hidden;
    }
}
