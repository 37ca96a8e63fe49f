use crate::camera::PerspectiveCamera;
use crate::error::RenderError;
use aviator_common::ViewportSize;
use aviator_scene::{Light, NodeKind, SceneGraph};
use std::fmt::Write;

/// Surface-level switches applied once at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererOptions {
    /// Keep the surface transparent where nothing is drawn so the host
    /// background shows through.
    pub alpha: bool,
    /// Multisample anti-aliasing.
    pub antialias: bool,
    /// Render shadow maps for shadow-casting lights.
    pub shadow_map: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            alpha: true,
            antialias: true,
            shadow_map: true,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene graph and a camera, then draws one frame
/// to its output surface. It never mutates the scene.
pub trait Renderer {
    /// Apply surface options. Fails when the backend cannot honor them.
    fn configure(&mut self, options: &RendererOptions) -> Result<(), RenderError>;

    /// Resize the output surface.
    fn set_size(&mut self, size: ViewportSize);

    /// Current output surface size.
    fn size(&self) -> ViewportSize;

    /// Render one frame.
    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> Result<(), RenderError>;
}

/// Debug text renderer: the mock output surface.
///
/// Produces a human-readable description of each frame instead of pixels.
/// Useful for headless runs, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    options: Option<RendererOptions>,
    size: ViewportSize,
    frames: u64,
    last_frame: String,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> Option<RendererOptions> {
        self.options
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }

    /// Describe one frame without touching any renderer state.
    pub fn describe(scene: &SceneGraph, camera: &PerspectiveCamera, size: ViewportSize) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Scene ({} nodes, {} meshes, {}x{}) ===",
            scene.len(),
            scene.mesh_count(),
            size.width,
            size.height
        );
        let _ = writeln!(
            out,
            "Camera: pos=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.3}",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.fov_degrees,
            camera.aspect
        );
        if let Some(fog) = scene.fog() {
            let _ = writeln!(out, "Fog: #{:06x} {:.0}..{:.0}", fog.color.0, fog.near, fog.far);
        }

        for visit in scene.traverse() {
            // Only entity roots and lights; leaf parts would drown the output.
            if visit.depth > 0 {
                continue;
            }
            let t = &visit.node.transform;
            let label = match &visit.node.kind {
                NodeKind::Group => "group",
                NodeKind::Mesh(_) => "mesh",
                NodeKind::Light(Light::Ambient(_)) => "ambient",
                NodeKind::Light(Light::Hemisphere(_)) => "hemisphere",
                NodeKind::Light(Light::Directional(_)) => "directional",
            };
            let _ = writeln!(
                out,
                "  [{}] {} ({}) pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3})",
                visit.id.short(),
                visit.node.name,
                label,
                t.position.x,
                t.position.y,
                t.position.z,
                t.rotation.x,
                t.rotation.y,
                t.rotation.z
            );
        }
        out
    }
}

impl Renderer for DebugTextRenderer {
    fn configure(&mut self, options: &RendererOptions) -> Result<(), RenderError> {
        tracing::debug!(?options, "text renderer configured");
        self.options = Some(*options);
        Ok(())
    }

    fn set_size(&mut self, size: ViewportSize) {
        self.size = size;
    }

    fn size(&self) -> ViewportSize {
        self.size
    }

    fn render(
        &mut self,
        scene: &SceneGraph,
        camera: &PerspectiveCamera,
    ) -> Result<(), RenderError> {
        if self.options.is_none() {
            return Err(RenderError::NotConfigured);
        }
        self.last_frame = Self::describe(scene, camera, self.size);
        self.frames += 1;
        Ok(())
    }
}
