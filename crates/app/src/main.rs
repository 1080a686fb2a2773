use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use simulation::config::NavigationConfig;
use simulation::sim_rng::SimRng;

/// Path to an optional JSON file overriding the navigation tuning.
const CONFIG_ENV: &str = "WEDDING_ROUTE_CONFIG";

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Wedding Route".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    // The camera and ribbon animate continuously, so keep redrawing.
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .insert_resource(SimRng::from_entropy());

    if let Some(config) = load_config_override() {
        app.insert_resource(config);
    }

    app.add_plugins((
        simulation::SimulationPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    app.run();
}

fn load_config_override() -> Option<NavigationConfig> {
    let path = std::env::var(CONFIG_ENV).ok()?;
    match NavigationConfig::load(&path) {
        Ok(config) => {
            info!("Loaded navigation config from {}", path);
            Some(config)
        }
        Err(e) => {
            warn!("Ignoring navigation config {}: {}", path, e);
            None
        }
    }
}
