//! Static city scene: ground, road grid, buildings, sky and lights.

use bevy::prelude::*;
use bevy::render::render_resource::Face;

use simulation::config::{GRID_SPACING, GROUND_SIZE, ROAD_INDEX_RANGE, ROAD_WIDTH};
use simulation::venues::VenueRegistry;

use crate::city_layout::CITY_BUILDINGS;

pub const SKY_COLOR: u32 = 0x87ceeb;
const GROUND_COLOR: u32 = 0x90ee90;
const ROAD_COLOR: u32 = 0x444444;
const LINE_COLOR: u32 = 0xffffff;
const ROAD_ELEVATION: f32 = 0.5;
const LINE_ELEVATION: f32 = 0.6;
const LINE_WIDTH: f32 = 0.5;
const SKY_RADIUS: f32 = 400.0;

/// Convert an sRGB hex triple like `0xff69b4` to a `Color`.
pub fn hex_color(rgb: u32) -> Color {
    Color::srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Marker for every static scene entity.
#[derive(Component)]
pub struct SceneryPart;

#[derive(Component, Debug, Clone, Copy)]
pub struct VenueBuilding(pub simulation::venues::DestinationId);

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    venues: Res<VenueRegistry>,
) {
    // Ground
    commands.spawn((
        SceneryPart,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex_color(GROUND_COLOR),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::IDENTITY,
    ));

    spawn_roads(&mut commands, &mut meshes, &mut materials);

    // Ordinary buildings
    for spec in CITY_BUILDINGS {
        commands.spawn((
            SceneryPart,
            Mesh3d(meshes.add(Cuboid::new(spec.width, spec.height, spec.depth))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: hex_color(spec.color),
                ..default()
            })),
            Transform::from_xyz(spec.x, spec.height / 2.0, spec.z),
        ));
    }

    // Venue buildings
    for venue in venues.iter() {
        let (width, depth) = venue.footprint;
        commands.spawn((
            SceneryPart,
            VenueBuilding(venue.id),
            Name::new(venue.name),
            Mesh3d(meshes.add(Cuboid::new(width, venue.height, depth))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: hex_color(venue.color),
                ..default()
            })),
            Transform::from_xyz(venue.position.x, venue.height / 2.0, venue.position.z),
        ));
    }

    // Sky dome, seen from inside
    commands.spawn((
        SceneryPart,
        Mesh3d(meshes.add(Sphere::new(SKY_RADIUS).mesh().uv(32, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex_color(SKY_COLOR),
            unlit: true,
            cull_mode: Some(Face::Front),
            fog_enabled: false,
            ..default()
        })),
        Transform::IDENTITY,
    ));
}

fn spawn_roads(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let road_material = materials.add(StandardMaterial {
        base_color: hex_color(ROAD_COLOR),
        perceptual_roughness: 0.9,
        ..default()
    });
    let line_material = materials.add(StandardMaterial {
        base_color: hex_color(LINE_COLOR),
        ..default()
    });
    let east_west = meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, ROAD_WIDTH));
    let north_south = meshes.add(Plane3d::default().mesh().size(ROAD_WIDTH, GROUND_SIZE));
    let east_west_line = meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, LINE_WIDTH));
    let north_south_line = meshes.add(Plane3d::default().mesh().size(LINE_WIDTH, GROUND_SIZE));

    for i in -ROAD_INDEX_RANGE..=ROAD_INDEX_RANGE {
        let offset = i as f32 * GRID_SPACING;
        for (mesh, line, road_pos, line_pos) in [
            (
                &east_west,
                &east_west_line,
                Vec3::new(0.0, ROAD_ELEVATION, offset),
                Vec3::new(0.0, LINE_ELEVATION, offset),
            ),
            (
                &north_south,
                &north_south_line,
                Vec3::new(offset, ROAD_ELEVATION, 0.0),
                Vec3::new(offset, LINE_ELEVATION, 0.0),
            ),
        ] {
            commands.spawn((
                SceneryPart,
                Mesh3d(mesh.clone()),
                MeshMaterial3d(road_material.clone()),
                Transform::from_translation(road_pos),
            ));
            commands.spawn((
                SceneryPart,
                Mesh3d(line.clone()),
                MeshMaterial3d(line_material.clone()),
                Transform::from_translation(line_pos),
            ));
        }
    }
}

pub fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(ClearColor(hex_color(SKY_COLOR)));

    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });

    // Sun from the (100, 100, 100) direction
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(100.0, 100.0, 100.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_channels() {
        let Color::Srgba(c) = hex_color(0xff69b4) else {
            panic!("expected sRGB color");
        };
        assert_eq!((c.red * 255.0).round() as u8, 0xff);
        assert_eq!((c.green * 255.0).round() as u8, 0x69);
        assert_eq!((c.blue * 255.0).round() as u8, 0xb4);
    }
}
