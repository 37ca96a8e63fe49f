use aviator_common::Color;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Indexed triangle geometry.
///
/// `revision` increases on every mutable access to the positions so that
/// renderers can tell when cached vertex data went stale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    revision: u64,
}

impl Geometry {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        debug_assert!(indices.len() % 3 == 0, "indices must form triangles");
        debug_assert!(indices.iter().all(|&i| (i as usize) < positions.len()));
        Self {
            positions,
            indices,
            revision: 0,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        self.revision += 1;
        &mut self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as vertex position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }

    /// Bake a matrix into the vertex positions.
    pub fn apply_matrix(&mut self, m: Mat4) {
        for p in self.positions_mut() {
            *p = m.transform_point3(*p);
        }
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.apply_matrix(Mat4::from_translation(offset));
    }
}

/// Flat-shaded surface material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
}

impl Material {
    pub fn opaque(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
        }
    }

    pub fn translucent(color: Color, opacity: f32) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
            transparent: true,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::opaque(Color::WHITE)
    }
}

/// Geometry plus material plus shadow participation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn casting_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    pub fn receiving_shadow(mut self) -> Self {
        self.receive_shadow = true;
        self
    }
}
