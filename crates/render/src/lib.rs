//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene graph; they never mutate it.
//! - Output size and camera aspect are owned by the caller and pushed in.
//!
//! The trait is stable; the wgpu backend lives in `aviator-render-wgpu` and
//! `DebugTextRenderer` stands in for it in tests and headless runs.

mod camera;
mod error;
mod renderer;

pub use camera::PerspectiveCamera;
pub use error::RenderError;
pub use renderer::{DebugTextRenderer, Renderer, RendererOptions};
