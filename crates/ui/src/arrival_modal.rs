//! Arrival card shown once the vehicle reaches its destination.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::session::{SessionOrchestrator, SessionPhase, SessionRequest};
use simulation::venues::{DestinationId, VenueRegistry};

use crate::countdown::{marquee_offset, Countdown};

const MARQUEE_SPEED: f32 = 60.0;
const MARQUEE_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 60, 60);

pub struct ArrivalCopy {
    pub title: &'static str,
    pub body: &'static str,
    /// Only the wedding card carries the LED countdown.
    pub marquee: bool,
}

pub fn arrival_copy(destination: DestinationId) -> ArrivalCopy {
    match destination {
        DestinationId::Wedding => ArrivalCopy {
            title: "Welcome to the wedding!",
            body: "You made it to the ceremony. Find your seat, the couple will be with you shortly.",
            marquee: true,
        },
        DestinationId::Groom => ArrivalCopy {
            title: "The groom's home",
            body: "The groom's family is getting ready. Join them for tea before the convoy leaves.",
            marquee: false,
        },
        DestinationId::Bride => ArrivalCopy {
            title: "The bride's home",
            body: "The bride is almost ready. Wait downstairs with the bridesmaids for the door games.",
            marquee: false,
        },
    }
}

/// Scrolling LED strip with the anniversary countdown.
fn led_marquee(ui: &mut egui::Ui, text: &str, elapsed_secs: f32) {
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), 28.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, egui::CornerRadius::same(4), egui::Color32::BLACK);

    let galley = painter.layout_no_wrap(
        text.to_owned(),
        egui::FontId::monospace(16.0),
        MARQUEE_COLOR,
    );
    let offset = marquee_offset(
        elapsed_secs,
        MARQUEE_SPEED,
        galley.size().x,
        rect.width(),
    );
    let pos = egui::pos2(
        rect.left() + offset,
        rect.center().y - galley.size().y / 2.0,
    );
    painter.galley(pos, galley, MARQUEE_COLOR);
    ui.ctx().request_repaint();
}

pub fn arrival_modal_ui(
    mut contexts: EguiContexts,
    orchestrator: Res<SessionOrchestrator>,
    venues: Res<VenueRegistry>,
    time: Res<Time>,
    mut requests: EventWriter<SessionRequest>,
    mut countdown: Local<Option<Countdown>>,
) {
    if orchestrator.phase() != SessionPhase::Arrived {
        *countdown = None;
        return;
    }
    let Some(destination) = orchestrator.journey_destination() else {
        return;
    };
    let copy = arrival_copy(destination);
    let ctx = contexts.ctx_mut();

    // Clicking the backdrop dismisses the card too.
    let screen_rect = ctx.screen_rect();
    let mut dismiss = egui::Area::new(egui::Id::new("arrival_backdrop"))
        .fixed_pos(screen_rect.min)
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            ui.painter().rect_filled(
                screen_rect,
                egui::CornerRadius::ZERO,
                egui::Color32::from_black_alpha(120),
            );
            ui.allocate_rect(screen_rect, egui::Sense::click())
                .clicked()
        })
        .inner;

    egui::Window::new(copy.title)
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(380.0)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);
                ui.heading(copy.title);
                if let Some(venue) = venues.get(destination) {
                    ui.label(egui::RichText::new(venue.name).italics());
                }
                ui.add_space(6.0);
                ui.label(copy.body);

                if copy.marquee {
                    let text = countdown.get_or_insert_with(Countdown::today).marquee_text();
                    ui.add_space(8.0);
                    led_marquee(ui, &text, time.elapsed_secs());
                }

                ui.add_space(10.0);
                if ui
                    .add_sized(egui::vec2(120.0, 32.0), egui::Button::new("Close"))
                    .clicked()
                {
                    dismiss = true;
                }
                ui.add_space(6.0);
            });
        });

    if dismiss {
        requests.send(SessionRequest::DismissArrival);
    }
}
