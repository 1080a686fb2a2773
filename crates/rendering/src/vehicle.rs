//! The vehicle: a glTF sports car, or a box-and-cylinder stand-in when the
//! model cannot be loaded.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::asset::LoadState;
use bevy::prelude::*;

use simulation::config::VEHICLE_ELEVATION;
use simulation::session::SessionOrchestrator;

use crate::scene::hex_color;

pub const VEHICLE_MODEL_PATH: &str = "models/ferrari.glb";
const MODEL_SCALE: f32 = 3.0;
/// Puts the wheels on the road surface (roads sit at y = 0.5).
const MODEL_OFFSET_Y: f32 = 0.5 - VEHICLE_ELEVATION;

/// Root entity; follows the session's vehicle pose.
#[derive(Component)]
pub struct VehicleRoot;

/// The glTF scene child, until it fails to load.
#[derive(Component)]
pub struct VehicleModel;

pub fn spawn_vehicle(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    orchestrator: Res<SessionOrchestrator>,
) {
    let pose = orchestrator.vehicle_pose();
    let scene: Handle<Scene> =
        asset_server.load(bevy::gltf::GltfAssetLabel::Scene(0).from_asset(VEHICLE_MODEL_PATH));

    commands
        .spawn((
            VehicleRoot,
            Name::new("Vehicle"),
            Transform::from_translation(pose.translation())
                .with_rotation(Quat::from_rotation_y(pose.heading)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                VehicleModel,
                SceneRoot(scene),
                // The model faces -Z; turn it to face the heading.
                Transform::from_xyz(0.0, MODEL_OFFSET_Y, 0.0)
                    .with_rotation(Quat::from_rotation_y(PI))
                    .with_scale(Vec3::splat(MODEL_SCALE)),
            ));
        });
}

/// Swap in the primitive car if the glTF model failed to load.
pub fn fallback_on_model_failure(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    models: Query<(Entity, &SceneRoot, &Parent), With<VehicleModel>>,
) {
    for (entity, scene, parent) in &models {
        if !matches!(asset_server.load_state(&scene.0), LoadState::Failed(_)) {
            continue;
        }
        warn!(
            "Vehicle model {} failed to load; using the primitive car",
            VEHICLE_MODEL_PATH
        );
        commands.entity(entity).despawn_recursive();
        commands.entity(parent.get()).with_children(|parent| {
            spawn_fallback_car(parent, &mut meshes, &mut materials);
        });
    }
}

fn spawn_fallback_car(
    parent: &mut ChildBuilder,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let body_material = materials.add(StandardMaterial {
        base_color: hex_color(0xff3333),
        emissive: LinearRgba::rgb(0.2, 0.0, 0.0),
        ..default()
    });
    let roof_material = materials.add(StandardMaterial {
        base_color: hex_color(0xcc0000),
        emissive: LinearRgba::rgb(0.08, 0.0, 0.0),
        ..default()
    });
    let wheel_material = materials.add(StandardMaterial {
        base_color: hex_color(0x333333),
        ..default()
    });

    // Body and roof, long axis along +Z
    parent.spawn((
        Mesh3d(meshes.add(Cuboid::new(3.0, 3.0, 6.0))),
        MeshMaterial3d(body_material),
        Transform::from_xyz(0.0, MODEL_OFFSET_Y + 1.5, 0.0),
    ));
    parent.spawn((
        Mesh3d(meshes.add(Cuboid::new(2.8, 1.5, 3.5))),
        MeshMaterial3d(roof_material),
        Transform::from_xyz(0.0, MODEL_OFFSET_Y + 3.2, -0.4),
    ));

    let wheel = meshes.add(Cylinder::new(1.0, 0.8));
    for (x, z) in [(-1.2, -1.8), (1.2, -1.8), (-1.2, 1.8), (1.2, 1.8)] {
        parent.spawn((
            Mesh3d(wheel.clone()),
            MeshMaterial3d(wheel_material.clone()),
            Transform::from_xyz(x, MODEL_OFFSET_Y + 1.0, z)
                .with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
        ));
    }
}

/// System: copy the session's vehicle pose and visibility onto the root.
pub fn sync_vehicle(
    orchestrator: Res<SessionOrchestrator>,
    mut query: Query<(&mut Transform, &mut Visibility), With<VehicleRoot>>,
) {
    if !orchestrator.is_changed() {
        return;
    }
    let pose = orchestrator.vehicle_pose();
    for (mut transform, mut visibility) in &mut query {
        transform.translation = pose.translation();
        transform.rotation = Quat::from_rotation_y(pose.heading);
        *visibility = if orchestrator.vehicle_visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
