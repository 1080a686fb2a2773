//! On-screen arrow pad for self-drive journeys, for players without a keyboard.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::motion::{DriveInput, TransportMode};
use simulation::session::{SessionOrchestrator, SessionPhase};

const BUTTON_SIZE: egui::Vec2 = egui::Vec2::new(52.0, 52.0);

pub fn pad_visible(phase: SessionPhase, mode: TransportMode) -> bool {
    phase == SessionPhase::Navigating && mode == TransportMode::Manual
}

fn pad_button(ui: &mut egui::Ui, label: &str) -> bool {
    ui.add_sized(BUTTON_SIZE, egui::Button::new(egui::RichText::new(label).size(22.0)))
        .is_pointer_button_down_on()
}

/// Draw the pad and OR whatever is held into this frame's drive input.
pub fn drive_pad_ui(
    mut contexts: EguiContexts,
    orchestrator: Res<SessionOrchestrator>,
    mut input: ResMut<DriveInput>,
) {
    if !pad_visible(orchestrator.phase(), orchestrator.transport_mode()) {
        return;
    }
    let ctx = contexts.ctx_mut();

    let mut held = DriveInput::default();
    egui::Area::new(egui::Id::new("drive_pad"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-24.0, -24.0))
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);
            egui::Grid::new("drive_pad_grid").show(ui, |ui| {
                ui.label("");
                held.forward = pad_button(ui, "↑");
                ui.label("");
                ui.end_row();

                held.left = pad_button(ui, "←");
                held.back = pad_button(ui, "↓");
                held.right = pad_button(ui, "→");
                ui.end_row();
            });
        });

    input.merge(held);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_only_for_self_drive_journeys() {
        assert!(pad_visible(SessionPhase::Navigating, TransportMode::Manual));
        assert!(!pad_visible(SessionPhase::Navigating, TransportMode::Autonomous));
        assert!(!pad_visible(SessionPhase::Previewing, TransportMode::Manual));
        assert!(!pad_visible(SessionPhase::Arrived, TransportMode::Manual));
    }
}
