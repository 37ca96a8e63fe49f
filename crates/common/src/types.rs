use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for logs and debug output.
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Spatial transform: position, Euler rotation (radians, XYZ order), scale.
///
/// Rotation is kept as Euler angles because the animation increments
/// individual axes every frame (propeller spin, sea roll).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local-to-parent matrix (scale, then rotate, then translate).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

/// 24-bit RGB color stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xffffff);
    pub const BLACK: Color = Color(0x000000);

    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    /// Channels in `[0, 1]`.
    pub fn to_rgb(self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::from_array(self.to_rgb())
    }

    /// Channels decoded from sRGB to linear light, for shading and for
    /// sRGB render targets that re-encode on write.
    pub fn to_linear_rgb(self) -> [f32; 3] {
        self.to_rgb().map(srgb_to_linear)
    }

    pub fn to_linear_vec3(self) -> Vec3 {
        Vec3::from_array(self.to_linear_rgb())
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Size of the output surface in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height. A zero height is treated as one pixel.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn node_id_uniqueness() {
        let a = NodeId::new();
        let b = NodeId::new();
        assert_ne!(a, b);
        assert_eq!(a.short().len(), 8);
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn transform_matrix_applies_scale_then_translation() {
        let t = Transform::from_position(Vec3::new(0.0, 100.0, 0.0)).with_scale(Vec3::splat(0.25));
        let p = t.matrix().transform_point3(Vec3::new(4.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 100.0);
    }

    #[test]
    fn transform_rotation_about_z() {
        let t =
            Transform::default().with_rotation(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2));
        let p = t.matrix().transform_point3(Vec3::X);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn color_channels() {
        let c = Color::from_hex(0xff8000);
        let [r, g, b] = c.to_rgb();
        assert_relative_eq!(r, 1.0);
        assert_relative_eq!(g, 128.0 / 255.0);
        assert_relative_eq!(b, 0.0);
        assert_eq!(Color::from_hex(0x1_00ff00), Color(0x00ff00));
    }

    #[test]
    fn linear_channels_decode_srgb() {
        assert_eq!(Color::WHITE.to_linear_rgb(), [1.0; 3]);
        assert_eq!(Color::BLACK.to_linear_rgb(), [0.0; 3]);
        let [r, g, b] = Color::from_hex(0x808080).to_linear_rgb();
        assert_relative_eq!(r, 0.2158605, epsilon = 1e-5);
        assert_eq!(r, g);
        assert_eq!(g, b);
        let [low, _, _] = Color::from_hex(0x0a0000).to_linear_rgb();
        assert_relative_eq!(low, 10.0 / 255.0 / 12.92);
    }

    #[test]
    fn viewport_aspect() {
        assert_eq!(ViewportSize::new(1600, 900).aspect(), 1600.0 / 900.0);
        assert_eq!(ViewportSize::new(640, 0).aspect(), 640.0);
        assert!(ViewportSize::new(640, 0).is_empty());
    }
}
