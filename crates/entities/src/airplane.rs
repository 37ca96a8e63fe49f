use crate::geometry::box_geometry;
use crate::names;
use crate::palette;
use crate::pilot::Pilot;
use aviator_common::{Color, NodeId, Transform};
use aviator_scene::{Geometry, Material, Mesh, Node, SceneError, SceneGraph};
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

fn part(geometry: Geometry, material: Material) -> Mesh {
    Mesh::new(geometry, material)
        .casting_shadow()
        .receiving_shadow()
}

fn solid(geometry: Geometry, color: Color) -> Mesh {
    part(geometry, Material::opaque(color))
}

/// Cabin box narrowed toward the tail: the back face is lower, flatter and thinner.
fn cabin_geometry() -> Geometry {
    let mut g = box_geometry(80.0, 50.0, 50.0);
    for p in g.positions_mut() {
        if p.x < 0.0 {
            p.y += if p.y > 0.0 { -10.0 } else { 30.0 };
            p.z *= 0.2;
        }
    }
    g
}

/// Propeller hub tapering to a point at the back.
fn propeller_geometry() -> Geometry {
    let mut g = box_geometry(20.0, 10.0, 10.0);
    for p in g.positions_mut() {
        if p.x < 0.0 {
            p.y *= 0.2;
            p.z *= 0.2;
        }
    }
    g
}

/// The red airplane: cabin, engine, tail, wing, windshield, spinning
/// propeller and a pilot.
#[derive(Debug, Clone)]
pub struct Airplane {
    pub mesh: NodeId,
    pub propeller: NodeId,
    pub pilot: Pilot,
}

impl Airplane {
    pub fn spawn(scene: &mut SceneGraph) -> Result<Self, SceneError> {
        let mesh = scene.add(Node::group(names::AIRPLANE));

        scene.add_child(mesh, Node::mesh("cabin", solid(cabin_geometry(), palette::RED)))?;
        scene.add_child(
            mesh,
            Node::mesh("engine", solid(box_geometry(20.0, 50.0, 50.0), palette::WHITE))
                .with_transform(Transform::from_position(Vec3::new(50.0, 0.0, 0.0))),
        )?;
        scene.add_child(
            mesh,
            Node::mesh("tail", solid(box_geometry(15.0, 20.0, 5.0), palette::RED))
                .with_transform(Transform::from_position(Vec3::new(-40.0, 20.0, 0.0))),
        )?;
        scene.add_child(
            mesh,
            Node::mesh("wing", solid(box_geometry(30.0, 5.0, 120.0), palette::RED))
                .with_transform(Transform::from_position(Vec3::new(0.0, 15.0, 0.0))),
        )?;
        scene.add_child(
            mesh,
            Node::mesh(
                "windshield",
                part(
                    box_geometry(3.0, 15.0, 20.0),
                    Material::translucent(palette::WHITE, 0.3),
                ),
            )
            .with_transform(Transform::from_position(Vec3::new(5.0, 27.0, 0.0))),
        )?;

        let propeller = scene.add_child(
            mesh,
            Node::mesh(names::PROPELLER, solid(propeller_geometry(), palette::BROWN))
                .with_transform(Transform::from_position(Vec3::new(60.0, 0.0, 0.0))),
        )?;
        for angle in [0.0, FRAC_PI_2] {
            scene.add_child(
                propeller,
                Node::mesh("blade", solid(box_geometry(1.0, 80.0, 10.0), palette::BROWN_DARK))
                    .with_transform(
                        Transform::from_position(Vec3::new(8.0, 0.0, 0.0))
                            .with_rotation(Vec3::new(angle, 0.0, 0.0)),
                    ),
            )?;
        }

        let pilot = Pilot::spawn(
            scene,
            mesh,
            Transform::from_position(Vec3::new(-10.0, 27.0, 0.0)),
        )?;

        tracing::debug!(node = %mesh.short(), "airplane spawned");
        Ok(Self {
            mesh,
            propeller,
            pilot,
        })
    }

    /// Spin the propeller by `step` radians around its shaft.
    pub fn spin_propeller(&self, scene: &mut SceneGraph, step: f32) -> Result<(), SceneError> {
        scene.transform_mut(self.propeller)?.rotation.x += step;
        Ok(())
    }

    pub fn update_hairs(&mut self, scene: &mut SceneGraph) -> Result<(), SceneError> {
        self.pilot.update_hairs(scene)
    }
}
