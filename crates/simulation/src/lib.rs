use bevy::prelude::*;

pub mod camera_choreo;
pub mod config;
pub mod geometry;
pub mod motion;
pub mod notifications;
pub mod ribbon;
pub mod route_planner;
pub mod route_tracker;
pub mod session;
pub mod sim_rng;
pub mod simulation_sets;
pub mod venues;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::{DriveInputWriters, NavigationSet};

use config::NavigationConfig;
use motion::DriveInput;
use sim_rng::SimRng;
use venues::VenueRegistry;

/// Headless core of the navigation scene: session state machine, route
/// planning, vehicle motion, camera choreography and ribbon geometry.
///
/// Resources already present when the plugin is added (a loaded
/// `NavigationConfig`, a seeded `SimRng`) are kept.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                NavigationSet::Input,
                NavigationSet::Requests,
                NavigationSet::Tick,
                NavigationSet::Present,
            )
                .chain(),
        )
        .init_resource::<NavigationConfig>()
        .init_resource::<VenueRegistry>()
        .init_resource::<DriveInput>()
        .init_resource::<SimRng>()
        .add_systems(
            Update,
            reset_drive_input
                .in_set(NavigationSet::Input)
                .before(DriveInputWriters),
        )
        .add_plugins((notifications::NotificationsPlugin, session::SessionPlugin));
    }
}

/// Input is level-triggered: writers set flags each frame they are held.
fn reset_drive_input(mut input: ResMut<DriveInput>) {
    *input = DriveInput::default();
}
