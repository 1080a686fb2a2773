use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use simulation::config::NavigationConfig;
use simulation::session::SessionOrchestrator;

use crate::egui_input_guard::egui_wants_pointer;
use crate::scene::{hex_color, SKY_COLOR};

const ZOOM_SPEED: f32 = 0.15;
const ORBIT_SENSITIVITY: f32 = 0.005;
const FOG_START: f32 = 150.0;
const FOG_END: f32 = 500.0;
const FIELD_OF_VIEW_DEGREES: f32 = 75.0;
const FAR_PLANE: f32 = 10_000.0;

/// The one scene camera. Its transform mirrors the session's camera pose.
#[derive(Component)]
pub struct SceneCamera;

#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

pub fn setup_camera(mut commands: Commands, orchestrator: Res<SessionOrchestrator>) {
    let pose = orchestrator.camera_pose();

    commands.spawn((
        SceneCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEGREES.to_radians(),
            near: 0.1,
            far: FAR_PLANE,
            ..default()
        }),
        Transform::from_translation(pose.position).looking_at(pose.look_at, Vec3::Y),
        DistanceFog {
            color: hex_color(SKY_COLOR),
            falloff: FogFalloff::Linear {
                start: FOG_START,
                end: FOG_END,
            },
            ..default()
        },
    ));
}

/// System: apply the session's camera pose to the camera Transform each frame.
pub fn apply_session_camera(
    orchestrator: Res<SessionOrchestrator>,
    mut query: Query<&mut Transform, With<SceneCamera>>,
) {
    if !orchestrator.is_changed() {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    let pose = orchestrator.camera_pose();
    if pose.position.abs_diff_eq(pose.look_at, f32::EPSILON) {
        return;
    }
    *transform = Transform::from_translation(pose.position).looking_at(pose.look_at, Vec3::Y);
}

/// Right-mouse drag: orbit (horizontal = yaw, vertical = pitch).
///
/// Only has an effect while the camera is in orbit mode; the session ignores
/// orbit input during transitions and while following the vehicle.
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    mut drag: ResMut<CameraOrbitDrag>,
    mut orchestrator: ResMut<SessionOrchestrator>,
    config: Res<NavigationConfig>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Right) && !egui_wants_pointer(&mut contexts) {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }

    if buttons.just_released(MouseButton::Right) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            if delta != Vec2::ZERO {
                orchestrator.orbit_camera(
                    delta.x * ORBIT_SENSITIVITY,
                    -delta.y * ORBIT_SENSITIVITY,
                    1.0,
                    &config,
                );
            }
            drag.last_pos = pos;
        }
    }
}

/// Scroll wheel: zoom (change orbit distance).
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    mut orchestrator: ResMut<SessionOrchestrator>,
    config: Res<NavigationConfig>,
) {
    if egui_wants_pointer(&mut contexts) {
        scroll_evts.clear();
        return;
    }
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        let factor = 1.0 - dy * ZOOM_SPEED;
        orchestrator.orbit_camera(0.0, 0.0, factor, &config);
    }
}
