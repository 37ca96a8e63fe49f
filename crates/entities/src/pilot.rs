use crate::geometry::box_geometry;
use crate::names;
use crate::palette;
use aviator_common::{Color, NodeId, Transform};
use aviator_scene::{Geometry, Material, Mesh, Node, SceneError, SceneGraph};
use glam::Vec3;

const HAIR_COUNT: usize = 12;
const HAIR_SWAY_SPEED: f32 = 0.16;

fn part(geometry: Geometry, color: Color) -> Mesh {
    Mesh::new(geometry, Material::opaque(color))
        .casting_shadow()
        .receiving_shadow()
}

/// Hair pivots at its base so vertical scaling grows upward.
fn hair_geometry(width: f32, height: f32, depth: f32) -> Geometry {
    let mut g = box_geometry(width, height, depth);
    g.translate(Vec3::new(0.0, height / 2.0, 0.0));
    g
}

/// The pilot sitting in the cockpit, with swaying hair.
#[derive(Debug, Clone)]
pub struct Pilot {
    pub mesh: NodeId,
    pub hairs_top: NodeId,
    hairs: Vec<NodeId>,
    angle_hairs: f32,
}

impl Pilot {
    pub fn spawn(
        scene: &mut SceneGraph,
        parent: NodeId,
        transform: Transform,
    ) -> Result<Self, SceneError> {
        let mesh = scene.add_child(parent, Node::group(names::PILOT).with_transform(transform))?;

        scene.add_child(
            mesh,
            Node::mesh("body", part(box_geometry(15.0, 15.0, 15.0), palette::BROWN))
                .with_transform(Transform::from_position(Vec3::new(2.0, -12.0, 0.0))),
        )?;
        scene.add_child(
            mesh,
            Node::mesh("face", part(box_geometry(10.0, 10.0, 10.0), palette::PINK)),
        )?;

        let hair_root = scene.add_child(
            mesh,
            Node::group("hair-root")
                .with_transform(Transform::from_position(Vec3::new(-5.0, 5.0, 0.0))),
        )?;
        let hairs_top = scene.add_child(hair_root, Node::group("hairs-top"))?;

        let mut hairs = Vec::with_capacity(HAIR_COUNT);
        for i in 0..HAIR_COUNT {
            let col = (i % 3) as f32;
            let row = (i / 3) as f32;
            let position = Vec3::new(-4.0 + row * 4.0, 0.0, -4.0 + col * 4.0);
            hairs.push(scene.add_child(
                hairs_top,
                Node::mesh(names::HAIR, part(hair_geometry(4.0, 4.0, 4.0), palette::BROWN))
                    .with_transform(Transform::from_position(position)),
            )?);
        }

        let mut side = box_geometry(12.0, 4.0, 2.0);
        side.translate(Vec3::new(-6.0, 0.0, 0.0));
        for z in [6.0, -6.0] {
            scene.add_child(
                hair_root,
                Node::mesh("hair-side", part(side.clone(), palette::BROWN))
                    .with_transform(Transform::from_position(Vec3::new(8.0, -2.0, z))),
            )?;
        }
        scene.add_child(
            hair_root,
            Node::mesh("hair-back", part(box_geometry(2.0, 8.0, 10.0), palette::BROWN))
                .with_transform(Transform::from_position(Vec3::new(-1.0, -4.0, 0.0))),
        )?;

        for z in [3.0, -3.0] {
            scene.add_child(
                mesh,
                Node::mesh("glass", part(box_geometry(5.0, 5.0, 5.0), palette::BROWN))
                    .with_transform(Transform::from_position(Vec3::new(6.0, 0.0, z))),
            )?;
        }
        scene.add_child(
            mesh,
            Node::mesh("glass-bridge", part(box_geometry(11.0, 1.0, 11.0), palette::BROWN)),
        )?;

        for z in [-6.0, 6.0] {
            scene.add_child(
                mesh,
                Node::mesh("ear", part(box_geometry(2.0, 3.0, 2.0), palette::PINK))
                    .with_transform(Transform::from_position(Vec3::new(0.0, 0.0, z))),
            )?;
        }

        Ok(Self {
            mesh,
            hairs_top,
            hairs,
            angle_hairs: 0.0,
        })
    }

    pub fn hairs(&self) -> &[NodeId] {
        &self.hairs
    }

    /// Sway the top hairs: each one scales vertically out of phase with its neighbor.
    pub fn update_hairs(&mut self, scene: &mut SceneGraph) -> Result<(), SceneError> {
        for (i, hair) in self.hairs.iter().enumerate() {
            let t = scene.transform_mut(*hair)?;
            t.scale.y = 0.75 + (self.angle_hairs + i as f32 / 3.0).cos() * 0.25;
        }
        self.angle_hairs += HAIR_SWAY_SPEED;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spawn() -> (SceneGraph, Pilot) {
        let mut scene = SceneGraph::new();
        let root = scene.add(Node::group("airplane"));
        let pilot = Pilot::spawn(&mut scene, root, Transform::default()).unwrap();
        (scene, pilot)
    }

    #[test]
    fn twelve_hairs_in_a_grid() {
        let (scene, pilot) = spawn();
        assert_eq!(pilot.hairs().len(), HAIR_COUNT);
        assert_eq!(scene.children(pilot.hairs_top).unwrap(), pilot.hairs());
        let last = scene.transform(pilot.hairs()[11]).unwrap();
        assert_eq!(last.position, Vec3::new(8.0, 0.0, 4.0));
    }

    #[test]
    fn hair_scale_follows_phase_offset() {
        let (mut scene, mut pilot) = spawn();
        pilot.update_hairs(&mut scene).unwrap();
        let first = scene.transform(pilot.hairs()[0]).unwrap().scale.y;
        let fourth = scene.transform(pilot.hairs()[3]).unwrap().scale.y;
        assert_relative_eq!(first, 1.0);
        assert_relative_eq!(fourth, 0.75 + 1.0f32.cos() * 0.25);

        pilot.update_hairs(&mut scene).unwrap();
        let first = scene.transform(pilot.hairs()[0]).unwrap().scale.y;
        assert_relative_eq!(first, 0.75 + HAIR_SWAY_SPEED.cos() * 0.25);
    }

    #[test]
    fn hair_scale_stays_in_band() {
        let (mut scene, mut pilot) = spawn();
        for _ in 0..100 {
            pilot.update_hairs(&mut scene).unwrap();
            for hair in pilot.hairs() {
                let y = scene.transform(*hair).unwrap().scale.y;
                assert!((0.5 - 1e-6..=1.0 + 1e-6).contains(&y));
            }
        }
    }

    #[test]
    fn hair_geometry_sits_on_its_base() {
        let g = hair_geometry(4.0, 4.0, 4.0);
        let min_y = g.positions().iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert_eq!(min_y, 0.0);
    }
}
