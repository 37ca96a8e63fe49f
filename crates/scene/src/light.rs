use aviator_common::Color;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Uniform light added to every surface; softens shadows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Gradient light blending a sky color (from above) and a ground color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HemisphereLight {
    pub sky_color: Color,
    pub ground_color: Color,
    pub intensity: f32,
}

/// Axis-aligned orthographic volume in light space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrthoFrustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoFrustum {
    /// Symmetric frustum spanning `[-half_extent, half_extent]` on X and Y.
    pub fn symmetric(half_extent: f32, near: f32, far: f32) -> Self {
        Self {
            left: -half_extent,
            right: half_extent,
            top: half_extent,
            bottom: -half_extent,
            near,
            far,
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }
}

/// Shadow map settings of a directional light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalShadow {
    pub frustum: OrthoFrustum,
    /// Shadow map resolution in texels per side.
    pub map_size: u32,
}

/// Parallel light shining from the node position toward `target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub target: Vec3,
    pub shadow: Option<DirectionalShadow>,
}

impl DirectionalLight {
    pub fn casts_shadow(&self) -> bool {
        self.shadow.is_some()
    }

    /// Unit vector pointing from the surface toward the light.
    pub fn direction_from(&self, position: Vec3) -> Vec3 {
        (position - self.target).normalize_or(Vec3::Y)
    }

    /// Light-space view-projection for the shadow pass, if shadows are on.
    pub fn shadow_view_projection(&self, position: Vec3) -> Option<Mat4> {
        let shadow = self.shadow?;
        let up = if self.direction_from(position).abs().abs_diff_eq(Vec3::Y, 1e-4) {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(position, self.target, up);
        Some(shadow.frustum.projection() * view)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Light {
    Ambient(AmbientLight),
    Hemisphere(HemisphereLight),
    Directional(DirectionalLight),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    Ambient,
    Hemisphere,
    Directional,
}

impl Light {
    pub fn kind(&self) -> LightKind {
        match self {
            Light::Ambient(_) => LightKind::Ambient,
            Light::Hemisphere(_) => LightKind::Hemisphere,
            Light::Directional(_) => LightKind::Directional,
        }
    }
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl Fog {
    /// Fog amount in `[0, 1]` at a view distance.
    pub fn factor(&self, distance: f32) -> f32 {
        if self.far <= self.near {
            return if distance >= self.far { 1.0 } else { 0.0 };
        }
        ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sun() -> DirectionalLight {
        DirectionalLight {
            color: Color::WHITE,
            intensity: 0.9,
            target: Vec3::ZERO,
            shadow: Some(DirectionalShadow {
                frustum: OrthoFrustum::symmetric(400.0, 1.0, 1000.0),
                map_size: 2048,
            }),
        }
    }

    #[test]
    fn symmetric_frustum_bounds() {
        let f = OrthoFrustum::symmetric(400.0, 1.0, 1000.0);
        assert_eq!(f.left, -400.0);
        assert_eq!(f.right, 400.0);
        assert_eq!(f.top, 400.0);
        assert_eq!(f.bottom, -400.0);
        assert_eq!((f.near, f.far), (1.0, 1000.0));
    }

    #[test]
    fn shadow_projection_keeps_target_in_depth_range() {
        let light = sun();
        let position = Vec3::new(150.0, 350.0, 350.0);
        let vp = light.shadow_view_projection(position).unwrap();
        let ndc = vp.project_point3(Vec3::ZERO);
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn no_shadow_no_projection() {
        let light = DirectionalLight {
            shadow: None,
            ..sun()
        };
        assert!(!light.casts_shadow());
        assert!(light.shadow_view_projection(Vec3::ONE).is_none());
    }

    #[test]
    fn fog_factor_is_linear_and_clamped() {
        let fog = Fog {
            color: Color::from_hex(0xf7d9aa),
            near: 100.0,
            far: 950.0,
        };
        assert_eq!(fog.factor(50.0), 0.0);
        assert_eq!(fog.factor(2000.0), 1.0);
        assert_relative_eq!(fog.factor(525.0), 0.5);
    }

    #[test]
    fn light_kinds() {
        let ambient = Light::Ambient(AmbientLight {
            color: Color::from_hex(0xdc8874),
            intensity: 0.5,
        });
        assert_eq!(ambient.kind(), LightKind::Ambient);
        assert_eq!(Light::Directional(sun()).kind(), LightKind::Directional);
    }
}
