use crate::geometry::box_geometry;
use crate::names;
use crate::palette;
use aviator_common::{NodeId, Transform};
use aviator_scene::{Material, Mesh, Node, SceneError, SceneGraph};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

const CLOUD_COUNT: usize = 20;
const BLOCK_SIZE: f32 = 20.0;

/// A loose cluster of white cubes.
#[derive(Debug, Clone)]
pub struct Cloud {
    pub mesh: NodeId,
    pub blocks: Vec<NodeId>,
}

impl Cloud {
    /// Build a cloud under `parent` (or at the top level when `None`).
    pub fn spawn(
        scene: &mut SceneGraph,
        parent: Option<NodeId>,
        transform: Transform,
        rng: &mut impl Rng,
    ) -> Result<Self, SceneError> {
        let group = Node::group(names::CLOUD).with_transform(transform);
        let mesh = match parent {
            Some(p) => scene.add_child(p, group)?,
            None => scene.add(group),
        };

        let count = rng.gen_range(3..6);
        let mut blocks = Vec::with_capacity(count);
        for i in 0..count {
            let s = rng.gen_range(0.1..1.0);
            let block = Transform {
                position: Vec3::new(
                    i as f32 * 15.0,
                    rng.gen_range(0.0..10.0),
                    rng.gen_range(0.0..10.0),
                ),
                rotation: Vec3::new(0.0, rng.gen_range(0.0..TAU), rng.gen_range(0.0..TAU)),
                scale: Vec3::splat(s),
            };
            let cube = Mesh::new(
                box_geometry(BLOCK_SIZE, BLOCK_SIZE, BLOCK_SIZE),
                Material::opaque(palette::WHITE),
            )
            .casting_shadow()
            .receiving_shadow();
            let node = Node::mesh("cloud-block", cube).with_transform(block);
            blocks.push(scene.add_child(mesh, node)?);
        }

        Ok(Self { mesh, blocks })
    }
}

/// A ring of clouds orbiting the sea axis.
#[derive(Debug, Clone)]
pub struct Sky {
    pub mesh: NodeId,
    pub clouds: Vec<Cloud>,
}

impl Sky {
    pub fn spawn(scene: &mut SceneGraph, rng: &mut impl Rng) -> Result<Self, SceneError> {
        let mesh = scene.add(Node::group(names::SKY));
        let step = TAU / CLOUD_COUNT as f32;

        let mut clouds = Vec::with_capacity(CLOUD_COUNT);
        for i in 0..CLOUD_COUNT {
            let angle = step * i as f32;
            let distance = rng.gen_range(750.0..950.0);
            let transform = Transform {
                position: Vec3::new(
                    angle.cos() * distance,
                    angle.sin() * distance,
                    rng.gen_range(-800.0..-400.0),
                ),
                rotation: Vec3::new(0.0, 0.0, angle + FRAC_PI_2),
                scale: Vec3::splat(rng.gen_range(1.0..3.0)),
            };
            clouds.push(Cloud::spawn(scene, Some(mesh), transform, rng)?);
        }

        tracing::debug!(node = %mesh.short(), clouds = clouds.len(), "sky spawned");
        Ok(Self { mesh, clouds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sky_has_twenty_clouds_on_a_ring() {
        let mut scene = SceneGraph::new();
        let sky = Sky::spawn(&mut scene, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(sky.clouds.len(), CLOUD_COUNT);
        assert_eq!(scene.children(sky.mesh).unwrap().len(), CLOUD_COUNT);
        assert_eq!(scene.roots(), &[sky.mesh]);

        for cloud in &sky.clouds {
            let t = scene.transform(cloud.mesh).unwrap();
            let r = t.position.truncate().length();
            assert!((750.0..950.0).contains(&r), "cloud radius {r}");
            assert!((-800.0..-400.0).contains(&t.position.z));
            assert!((1.0..3.0).contains(&t.scale.x));
        }
    }

    #[test]
    fn clouds_have_three_to_five_blocks() {
        let mut scene = SceneGraph::new();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..30 {
            let cloud = Cloud::spawn(&mut scene, None, Transform::default(), &mut rng).unwrap();
            assert!((3..=5).contains(&cloud.blocks.len()));
            let first = scene.transform(cloud.blocks[0]).unwrap();
            assert_eq!(first.position.x, 0.0);
            let mesh = scene.get(cloud.blocks[0]).unwrap().as_mesh().unwrap();
            assert!(mesh.cast_shadow && mesh.receive_shadow);
        }
    }

    #[test]
    fn cloud_under_unknown_parent_fails() {
        let mut scene = SceneGraph::new();
        let ghost = NodeId::new();
        let err = Cloud::spawn(
            &mut scene,
            Some(ghost),
            Transform::default(),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap_err();
        assert_eq!(err, SceneError::UnknownNode(ghost));
    }
}
