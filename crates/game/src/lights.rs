use crate::config::LightsConfig;
use aviator_common::{NodeId, Transform};
use aviator_scene::{DirectionalLight, DirectionalShadow, Light, Node, OrthoFrustum, SceneGraph};
use glam::Vec3;

/// Node ids of the three scene lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightRig {
    pub ambient: NodeId,
    pub hemisphere: NodeId,
    pub sun: NodeId,
}

impl LightRig {
    /// Add ambient, hemisphere and a shadow-casting directional light.
    pub fn spawn(scene: &mut SceneGraph, config: &LightsConfig) -> Self {
        let ambient = scene.add(Node::light("ambient", Light::Ambient(config.ambient)));
        let hemisphere = scene.add(Node::light("hemisphere", Light::Hemisphere(config.hemisphere)));

        let sun = DirectionalLight {
            color: config.sun_color,
            intensity: config.sun_intensity,
            target: Vec3::ZERO,
            shadow: Some(DirectionalShadow {
                frustum: OrthoFrustum::symmetric(
                    config.shadow_extent,
                    config.shadow_near,
                    config.shadow_far,
                ),
                map_size: config.shadow_map_size,
            }),
        };
        let sun = scene.add(
            Node::light("sun", Light::Directional(sun))
                .with_transform(Transform::from_position(config.sun_position)),
        );

        Self {
            ambient,
            hemisphere,
            sun,
        }
    }
}
