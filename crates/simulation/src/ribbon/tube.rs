use std::f32::consts::TAU;

use bevy::prelude::*;

use super::spline::CatmullRomCurve;

/// Renderer-agnostic triangle mesh for the route tube.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonGeometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl RibbonGeometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// Sweep a circle of `radius` along `curve`.
///
/// Produces `(tubular_segments + 1) * (radial_segments + 1)` vertices; the
/// seam column is duplicated so UVs wrap cleanly.
pub fn build_tube(
    curve: &CatmullRomCurve,
    tubular_segments: usize,
    radius: f32,
    radial_segments: usize,
) -> RibbonGeometry {
    let tubular_segments = tubular_segments.max(1);
    let radial_segments = radial_segments.max(3);
    let ring = radial_segments + 1;
    let vertex_total = (tubular_segments + 1) * ring;

    let mut geometry = RibbonGeometry {
        positions: Vec::with_capacity(vertex_total),
        normals: Vec::with_capacity(vertex_total),
        uvs: Vec::with_capacity(vertex_total),
        indices: Vec::with_capacity(tubular_segments * radial_segments * 6),
    };

    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32;
        let center = curve.point_at(u);
        let tangent = curve.tangent_at(u);
        // The route lies flat on the ground, so world up gives a stable frame.
        let normal = Vec3::Y.cross(tangent).try_normalize().unwrap_or(Vec3::X);
        let binormal = tangent.cross(normal).normalize_or(Vec3::Y);

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = (v.sin(), -v.cos());
            let n = (normal * cos + binormal * sin).normalize_or(Vec3::Y);
            geometry.positions.push((center + n * radius).to_array());
            geometry.normals.push(n.to_array());
            geometry
                .uvs
                .push([u, j as f32 / radial_segments as f32]);
        }
    }

    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = (ring * (j - 1) + (i - 1)) as u32;
            let b = (ring * j + (i - 1)) as u32;
            let c = (ring * j + i) as u32;
            let d = (ring * (j - 1) + i) as u32;
            geometry.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    geometry
}
