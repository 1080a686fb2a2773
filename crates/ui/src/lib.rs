use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use simulation::{DriveInputWriters, NavigationSet};

pub mod arrival_modal;
pub mod control_panel;
pub mod countdown;
pub mod drive_pad;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_wedding_theme)
            .add_systems(
                Update,
                (
                    control_panel::control_panel_ui,
                    control_panel::status_box_ui,
                    arrival_modal::arrival_modal_ui,
                    drive_pad::drive_pad_ui.in_set(DriveInputWriters),
                )
                    .in_set(NavigationSet::Input),
            );
    }
}
