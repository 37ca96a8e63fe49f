//! Primitive geometry builders.
//!
//! Vertices are shared between faces; renderers compute flat face normals
//! from triangle winding (counter-clockwise seen from outside).

use aviator_scene::Geometry;
use glam::Vec3;
use std::f32::consts::TAU;

/// Axis-aligned box centered on the origin.
pub fn box_geometry(width: f32, height: f32, depth: f32) -> Geometry {
    let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
    let positions = vec![
        Vec3::new(-x, -y, z),
        Vec3::new(x, -y, z),
        Vec3::new(x, y, z),
        Vec3::new(-x, y, z),
        Vec3::new(x, -y, -z),
        Vec3::new(-x, -y, -z),
        Vec3::new(-x, y, -z),
        Vec3::new(x, y, -z),
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2, 2, 3, 0, // +Z
        4, 5, 6, 6, 7, 4, // -Z
        1, 4, 7, 7, 2, 1, // +X
        5, 0, 3, 3, 6, 5, // -X
        3, 2, 7, 7, 6, 3, // +Y
        5, 4, 1, 1, 0, 5, // -Y
    ];
    Geometry::new(positions, indices)
}

/// Capped cylinder along Y, centered on the origin.
///
/// Rows run from the top (`+height/2`) down; the seam vertex is shared so
/// that per-vertex displacement keeps the surface closed.
pub fn cylinder_geometry(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    height_segments: u32,
) -> Geometry {
    let radial = radial_segments.max(3);
    let rows = height_segments.max(1);
    let half = height / 2.0;

    let mut positions = Vec::with_capacity(((rows + 1) * radial + 2) as usize);
    for row in 0..=rows {
        let v = row as f32 / rows as f32;
        let radius = radius_top + v * (radius_bottom - radius_top);
        let y = half - v * height;
        for seg in 0..radial {
            let theta = seg as f32 / radial as f32 * TAU;
            positions.push(Vec3::new(radius * theta.sin(), y, radius * theta.cos()));
        }
    }

    let ring = |row: u32, seg: u32| row * radial + seg % radial;
    let mut indices = Vec::with_capacity((rows * radial * 6 + radial * 6) as usize);
    for row in 0..rows {
        for seg in 0..radial {
            let a = ring(row, seg);
            let b = ring(row + 1, seg);
            let c = ring(row + 1, seg + 1);
            let d = ring(row, seg + 1);
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    let top_center = positions.len() as u32;
    positions.push(Vec3::new(0.0, half, 0.0));
    let bottom_center = positions.len() as u32;
    positions.push(Vec3::new(0.0, -half, 0.0));
    for seg in 0..radial {
        indices.extend_from_slice(&[top_center, ring(0, seg), ring(0, seg + 1)]);
        indices.extend_from_slice(&[bottom_center, ring(rows, seg + 1), ring(rows, seg)]);
    }

    Geometry::new(positions, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outward_ratio(g: &Geometry) -> f32 {
        let outward = g
            .triangles()
            .filter(|[a, b, c]| {
                let n = (*b - *a).cross(*c - *a);
                let center = (*a + *b + *c) / 3.0;
                n.dot(center) > 0.0
            })
            .count();
        outward as f32 / g.triangle_count() as f32
    }

    #[test]
    fn box_has_twelve_outward_triangles() {
        let g = box_geometry(20.0, 20.0, 20.0);
        assert_eq!(g.vertex_count(), 8);
        assert_eq!(g.triangle_count(), 12);
        assert_eq!(outward_ratio(&g), 1.0);
    }

    #[test]
    fn box_extents() {
        let g = box_geometry(80.0, 50.0, 50.0);
        let max_x = g.positions().iter().map(|p| p.x).fold(f32::MIN, f32::max);
        let min_y = g.positions().iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert_eq!(max_x, 40.0);
        assert_eq!(min_y, -25.0);
    }

    #[test]
    fn cylinder_counts() {
        let g = cylinder_geometry(600.0, 600.0, 800.0, 40, 10);
        assert_eq!(g.vertex_count(), 11 * 40 + 2);
        assert_eq!(g.triangle_count(), 10 * 40 * 2 + 40 * 2);
    }

    #[test]
    fn cylinder_faces_point_outward() {
        let g = cylinder_geometry(5.0, 5.0, 4.0, 12, 3);
        assert_eq!(outward_ratio(&g), 1.0);
    }

    #[test]
    fn cylinder_degenerate_segments_are_raised() {
        let g = cylinder_geometry(1.0, 1.0, 1.0, 1, 0);
        assert_eq!(g.vertex_count(), 2 * 3 + 2);
    }
}
