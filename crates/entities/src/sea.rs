use crate::geometry::cylinder_geometry;
use crate::names;
use crate::palette;
use aviator_common::NodeId;
use aviator_scene::{Material, Mesh, Node, SceneError, SceneGraph};
use glam::{Mat4, Vec3};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

const RADIUS: f32 = 600.0;
const LENGTH: f32 = 800.0;
const RADIAL_SEGMENTS: u32 = 40;
const LENGTH_SEGMENTS: u32 = 10;
const OPACITY: f32 = 0.6;

/// Per-vertex wave state. Each vertex circles its rest position.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Wave {
    rest: Vec3,
    angle: f32,
    amplitude: f32,
    speed: f32,
}

/// A translucent cylinder lying on its side whose vertices bob in circles.
#[derive(Debug, Clone)]
pub struct Sea {
    pub mesh: NodeId,
    waves: Vec<Wave>,
}

impl Sea {
    /// Build the sea mesh and add it to the top level of `scene`.
    pub fn spawn(scene: &mut SceneGraph, rng: &mut impl Rng) -> Self {
        let mut geometry =
            cylinder_geometry(RADIUS, RADIUS, LENGTH, RADIAL_SEGMENTS, LENGTH_SEGMENTS);
        geometry.apply_matrix(Mat4::from_rotation_x(-FRAC_PI_2));

        let waves = geometry
            .positions()
            .iter()
            .map(|&rest| Wave {
                rest,
                angle: rng.gen_range(0.0..TAU),
                amplitude: rng.gen_range(5.0..20.0),
                speed: rng.gen_range(0.016..0.048),
            })
            .collect();

        let mesh =
            Mesh::new(geometry, Material::translucent(palette::BLUE, OPACITY)).receiving_shadow();
        let mesh = scene.add(Node::mesh(names::SEA, mesh));
        tracing::debug!(node = %mesh.short(), "sea spawned");
        Self { mesh, waves }
    }

    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    /// Advance every vertex one step along its wave circle.
    pub fn move_waves(&mut self, scene: &mut SceneGraph) -> Result<(), SceneError> {
        let mesh = scene.mesh_mut(self.mesh)?;
        let positions = mesh.geometry.positions_mut();
        for (p, wave) in positions.iter_mut().zip(self.waves.iter_mut()) {
            p.x = wave.rest.x + wave.angle.cos() * wave.amplitude;
            p.y = wave.rest.y + wave.angle.sin() * wave.amplitude;
            wave.angle += wave.speed;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn spawn() -> (SceneGraph, Sea) {
        let mut scene = SceneGraph::new();
        let sea = Sea::spawn(&mut scene, &mut StdRng::seed_from_u64(7));
        (scene, sea)
    }

    #[test]
    fn sea_is_a_translucent_shadow_receiver() {
        let (scene, sea) = spawn();
        let mesh = scene.get(sea.mesh).unwrap().as_mesh().unwrap();
        assert!(mesh.material.transparent);
        assert_eq!(mesh.material.opacity, OPACITY);
        assert!(mesh.receive_shadow);
        assert_eq!(sea.wave_count(), mesh.geometry.vertex_count());
    }

    #[test]
    fn cylinder_axis_is_rotated_onto_z() {
        let (scene, sea) = spawn();
        let mesh = scene.get(sea.mesh).unwrap().as_mesh().unwrap();
        let max_z = mesh.geometry.positions().iter().map(|p| p.z).fold(f32::MIN, f32::max);
        let max_y = mesh.geometry.positions().iter().map(|p| p.y).fold(f32::MIN, f32::max);
        approx::assert_relative_eq!(max_z, LENGTH / 2.0, epsilon = 1e-3);
        approx::assert_relative_eq!(max_y, RADIUS, epsilon = 1e-2);
    }

    #[test]
    fn waves_stay_within_amplitude_of_rest() {
        let (mut scene, mut sea) = spawn();
        let rest: Vec<Vec3> = sea.waves.iter().map(|w| w.rest).collect();
        for _ in 0..50 {
            sea.move_waves(&mut scene).unwrap();
        }
        let mesh = scene.get(sea.mesh).unwrap().as_mesh().unwrap();
        for (p, r) in mesh.geometry.positions().iter().zip(&rest) {
            let d = (*p - *r).truncate().length();
            assert!(d <= 20.0 + 1e-3, "vertex drifted {d}");
            assert_eq!(p.z, r.z);
        }
    }

    #[test]
    fn moving_waves_bumps_geometry_revision() {
        let (mut scene, mut sea) = spawn();
        let before = scene.get(sea.mesh).unwrap().as_mesh().unwrap().geometry.revision();
        sea.move_waves(&mut scene).unwrap();
        let after = scene.get(sea.mesh).unwrap().as_mesh().unwrap().geometry.revision();
        assert_eq!(after, before + 1);
    }

    #[test]
    fn same_seed_same_waves() {
        let (_, a) = spawn();
        let (_, b) = spawn();
        assert_eq!(a.waves, b.waves);
    }
}
