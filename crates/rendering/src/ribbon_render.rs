//! Route ribbon mesh: rebuilt when the session's ribbon geometry changes,
//! recoloured when only its per-vertex opacity changes.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use simulation::ribbon::RibbonGeometry;
use simulation::session::SessionOrchestrator;

use crate::scene::hex_color;

const RIBBON_COLOR: u32 = 0xffff00;
const RIBBON_ALPHA: f32 = 0.9;

#[derive(Component)]
pub struct RibbonMesh;

/// Which ribbon revisions are on the GPU right now.
#[derive(Resource, Default)]
pub struct RibbonSync {
    revision: u64,
    opacity_revision: u64,
}

/// Build a render mesh from the ribbon geometry, with opacity in the vertex
/// colour alpha.
pub fn ribbon_mesh(geometry: &RibbonGeometry, opacity: &[f32]) -> Mesh {
    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, geometry.positions.clone())
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, geometry.normals.clone())
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, geometry.uvs.clone())
    .with_inserted_attribute(
        Mesh::ATTRIBUTE_COLOR,
        vertex_colors(opacity, geometry.vertex_count()),
    )
    .with_inserted_indices(Indices::U32(geometry.indices.clone()))
}

/// White vertex colours carrying the opacity; missing entries are opaque.
pub fn vertex_colors(opacity: &[f32], vertex_count: usize) -> Vec<[f32; 4]> {
    (0..vertex_count)
        .map(|i| [1.0, 1.0, 1.0, opacity.get(i).copied().unwrap_or(1.0)])
        .collect()
}

pub fn spawn_ribbon(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
    commands.spawn((
        RibbonMesh,
        Name::new("Route ribbon"),
        Mesh3d::default(),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex_color(RIBBON_COLOR).with_alpha(RIBBON_ALPHA),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            cull_mode: None,
            double_sided: true,
            ..default()
        })),
        Transform::IDENTITY,
        Visibility::Hidden,
    ));
}

/// System: mirror the session's ribbon into the ribbon entity.
pub fn sync_ribbon_mesh(
    orchestrator: Res<SessionOrchestrator>,
    mut sync: ResMut<RibbonSync>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut query: Query<(&mut Mesh3d, &mut Visibility), With<RibbonMesh>>,
) {
    let ribbon = orchestrator.ribbon();
    let Ok((mut mesh, mut visibility)) = query.get_single_mut() else {
        return;
    };

    if ribbon.revision() != sync.revision {
        sync.revision = ribbon.revision();
        sync.opacity_revision = ribbon.opacity_revision();
        match ribbon.geometry() {
            Some(geometry) => {
                mesh.0 = meshes.add(ribbon_mesh(geometry, ribbon.opacity()));
                *visibility = Visibility::Inherited;
            }
            None => {
                mesh.0 = Handle::default();
                *visibility = Visibility::Hidden;
            }
        }
        return;
    }

    if ribbon.opacity_revision() != sync.opacity_revision {
        sync.opacity_revision = ribbon.opacity_revision();
        let (Some(geometry), Some(render_mesh)) = (ribbon.geometry(), meshes.get_mut(&mesh.0))
        else {
            return;
        };
        render_mesh.insert_attribute(
            Mesh::ATTRIBUTE_COLOR,
            vertex_colors(ribbon.opacity(), geometry.vertex_count()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::config::RibbonConfig;
    use simulation::geometry::GridPoint;
    use simulation::ribbon::build_ribbon;

    #[test]
    fn test_mesh_carries_every_vertex() {
        let points = [GridPoint::new(0.0, 0.0), GridPoint::new(0.0, 100.0)];
        let geometry = build_ribbon(&points, &RibbonConfig::default()).unwrap();
        let mesh = ribbon_mesh(&geometry, &[]);
        assert_eq!(mesh.count_vertices(), geometry.vertex_count());
        assert_eq!(
            mesh.indices().map(|i| i.len()),
            Some(geometry.indices.len())
        );
    }

    #[test]
    fn test_vertex_colors_use_opacity_alpha() {
        let colors = vertex_colors(&[0.25, 0.0], 3);
        assert_eq!(colors[0][3], 0.25);
        assert_eq!(colors[1][3], 0.0);
        assert_eq!(colors[2], [1.0, 1.0, 1.0, 1.0]);
    }
}
