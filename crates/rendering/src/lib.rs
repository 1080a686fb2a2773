use bevy::prelude::*;

use simulation::{DriveInputWriters, NavigationSet};

pub mod camera;
pub mod city_layout;
pub mod decorations;
pub mod egui_input_guard;
pub mod input;
pub mod ribbon_render;
pub mod scene;
pub mod vehicle;

use camera::CameraOrbitDrag;
use ribbon_render::RibbonSync;

/// Draws the city and mirrors the navigation session into it.
///
/// Expects `SimulationPlugin` to be added first, and `bevy_egui::EguiPlugin`
/// somewhere in the app (the camera systems ask egui about pointer focus).
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraOrbitDrag>()
            .init_resource::<RibbonSync>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    scene::setup_lighting,
                    scene::setup_scene,
                    vehicle::spawn_vehicle,
                    ribbon_render::spawn_ribbon,
                    decorations::spawn_balloons,
                    decorations::spawn_venue_indicators,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    input::keyboard_drive_input.in_set(DriveInputWriters),
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                )
                    .in_set(NavigationSet::Input),
            )
            .add_systems(
                Update,
                (
                    camera::apply_session_camera,
                    vehicle::sync_vehicle,
                    vehicle::fallback_on_model_failure,
                    ribbon_render::sync_ribbon_mesh,
                    decorations::highlight_target_arrow,
                    decorations::animate_decorations,
                )
                    .in_set(NavigationSet::Present),
            );
    }
}
