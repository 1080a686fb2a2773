//! Trip planner panel, route card and status box.
//!
//! The panel only ever sends `SessionRequest`s; everything it shows is read
//! back from the session and the status board.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::motion::TransportMode;
use simulation::notifications::{StatusBoard, StatusLevel};
use simulation::session::{SessionOrchestrator, SessionPhase, SessionRequest};
use simulation::venues::{DestinationId, VenueRegistry};

/// What the route card shows once a route exists.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCard {
    pub destination: String,
    pub distance_km: f32,
    pub minutes: u32,
    pub mode: TransportMode,
}

impl RouteCard {
    pub fn from_session(orchestrator: &SessionOrchestrator, venues: &VenueRegistry) -> Option<Self> {
        let session = orchestrator.session()?;
        let summary = session.summary();
        let destination = venues
            .get(session.destination())
            .map(|venue| venue.name.to_string())
            .unwrap_or_else(|| session.destination().label().to_string());
        Some(Self {
            destination,
            distance_km: summary.distance_km,
            minutes: summary.minutes,
            mode: session.transport_mode(),
        })
    }
}

/// The planner hides itself once the journey starts and comes back after the
/// arrival card is dismissed.
pub fn planner_visible(phase: SessionPhase) -> bool {
    !phase.is_journey_active()
}

pub fn start_enabled(phase: SessionPhase) -> bool {
    matches!(phase, SessionPhase::Generated | SessionPhase::Previewing)
}

fn status_color(level: StatusLevel) -> egui::Color32 {
    match level {
        StatusLevel::Info => egui::Color32::from_rgb(220, 220, 230),
        StatusLevel::Success => egui::Color32::from_rgb(120, 220, 140),
        StatusLevel::Warning => egui::Color32::from_rgb(255, 190, 90),
    }
}

pub fn control_panel_ui(
    mut contexts: EguiContexts,
    orchestrator: Res<SessionOrchestrator>,
    venues: Res<VenueRegistry>,
    mut requests: EventWriter<SessionRequest>,
) {
    let phase = orchestrator.phase();
    if !planner_visible(phase) {
        return;
    }
    let ctx = contexts.ctx_mut();

    egui::Window::new("Plan your trip")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .resizable(false)
        .collapsible(false)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.label("Transport");
            ui.horizontal(|ui| {
                let current = orchestrator.transport_mode();
                for mode in [TransportMode::Autonomous, TransportMode::Manual] {
                    if ui.selectable_label(current == mode, mode.label()).clicked()
                        && current != mode
                    {
                        requests.send(SessionRequest::SelectTransportMode(mode));
                    }
                }
            });

            ui.add_space(6.0);
            ui.label("Destination");
            let selected = orchestrator.selected_destination();
            let selected_text = selected.map_or("Choose a destination", DestinationId::label);
            egui::ComboBox::from_id_salt("destination_picker")
                .selected_text(selected_text)
                .width(220.0)
                .show_ui(ui, |ui| {
                    for id in DestinationId::ALL {
                        if ui.selectable_label(selected == Some(id), id.label()).clicked()
                            && selected != Some(id)
                        {
                            requests.send(SessionRequest::SelectDestination(id));
                        }
                    }
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Generate route").clicked() {
                    requests.send(SessionRequest::GenerateRoute);
                }
                if ui
                    .add_enabled(start_enabled(phase), egui::Button::new("Start journey"))
                    .clicked()
                {
                    requests.send(SessionRequest::StartJourney);
                }
            });

            if let Some(card) = RouteCard::from_session(&orchestrator, &venues) {
                ui.separator();
                ui.label(format!("Destination: {}", card.destination));
                ui.label(format!("Distance: {:.1} km", card.distance_km));
                ui.label(format!("Time: about {} min", card.minutes));
                ui.label(format!("Transport: {}", card.mode.label()));
            }
        });
}

/// Status box along the bottom-left edge; visible in every phase.
pub fn status_box_ui(mut contexts: EguiContexts, board: Res<StatusBoard>) {
    let ctx = contexts.ctx_mut();
    egui::Area::new(egui::Id::new("status_box"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(360.0);
                ui.label(
                    egui::RichText::new(&board.current.message)
                        .color(status_color(board.current.level)),
                );
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::config::NavigationConfig;
    use simulation::sim_rng::SimRng;
    use std::time::Duration;

    #[test]
    fn test_planner_hidden_during_journey() {
        assert!(planner_visible(SessionPhase::Idle));
        assert!(planner_visible(SessionPhase::Previewing));
        assert!(!planner_visible(SessionPhase::Navigating));
        assert!(!planner_visible(SessionPhase::Arrived));
    }

    #[test]
    fn test_start_needs_a_route() {
        assert!(!start_enabled(SessionPhase::Idle));
        assert!(start_enabled(SessionPhase::Generated));
        assert!(start_enabled(SessionPhase::Previewing));
        assert!(!start_enabled(SessionPhase::Navigating));
    }

    #[test]
    fn test_route_card_after_generation() {
        let config = NavigationConfig::default();
        let venues = VenueRegistry::default();
        let mut rng = SimRng::from_seed_u64(3);
        let mut orchestrator = SessionOrchestrator::new(&config);
        assert!(RouteCard::from_session(&orchestrator, &venues).is_none());

        orchestrator.select_destination(DestinationId::Bride);
        orchestrator
            .generate_route(&venues, &mut rng, &config, Duration::ZERO)
            .unwrap();
        let card = RouteCard::from_session(&orchestrator, &venues).unwrap();
        assert_eq!(
            card.destination,
            venues.get(DestinationId::Bride).unwrap().name
        );
        assert_eq!(card.mode, TransportMode::Autonomous);
        assert_eq!(
            card.minutes,
            (card.distance_km * TransportMode::Autonomous.minutes_per_km()).ceil() as u32
        );
    }
}
