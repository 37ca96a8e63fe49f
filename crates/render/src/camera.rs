use aviator_common::ViewportSize;
use glam::{Mat4, Vec3};

/// Perspective camera looking down -Z from `position`.
///
/// The projection matrix is cached; call `update_projection_matrix` after
/// changing any projection parameter.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(60.0, 16.0 / 9.0, 1.0, 10_000.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            fov_degrees,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the aspect ratio from a viewport and refresh the projection.
    pub fn fit_viewport(&mut self, viewport: ViewportSize) {
        self.aspect = viewport.aspect();
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.fov_degrees, 60.0);
        assert_eq!((cam.near, cam.far), (1.0, 10_000.0));
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn fit_viewport_updates_aspect_and_projection() {
        let mut cam = PerspectiveCamera::new(60.0, 800.0 / 600.0, 1.0, 10_000.0);
        let before = cam.projection_matrix();
        cam.fit_viewport(ViewportSize::new(1600, 900));
        assert_eq!(cam.aspect, 1600.0 / 900.0);
        assert_ne!(cam.projection_matrix(), before);
        assert_eq!(
            cam.projection_matrix(),
            Mat4::perspective_rh(60f32.to_radians(), 1600.0 / 900.0, 1.0, 10_000.0)
        );
    }

    #[test]
    fn projection_is_cached_until_updated() {
        let mut cam = PerspectiveCamera::default();
        let before = cam.projection_matrix();
        cam.aspect = 1.0;
        assert_eq!(cam.projection_matrix(), before);
        cam.update_projection_matrix();
        assert_ne!(cam.projection_matrix(), before);
    }

    #[test]
    fn points_ahead_project_inside_clip_space() {
        let cam = PerspectiveCamera::default().with_position(Vec3::new(0.0, 100.0, 200.0));
        let ndc = cam.view_projection().project_point3(Vec3::new(0.0, 100.0, 0.0));
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
