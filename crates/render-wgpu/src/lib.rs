//! wgpu render backend for the aviator scene.
//!
//! Draws every mesh in the scene graph flat-shaded under an ambient,
//! hemisphere and directional light, with linear fog, an alpha-blended pass
//! for translucent materials and a depth-only shadow pass from the
//! directional light.
//!
//! # Invariants
//! - Renderer never mutates the scene graph.
//! - Vertex data is rebuilt from the scene every frame in world space.
//! - Opaque triangles are drawn before translucent ones.

mod frame;
mod gpu;
mod shaders;
mod surface;

pub use frame::FrameData;
pub use gpu::SceneRenderer;
pub use surface::SurfaceRenderer;
