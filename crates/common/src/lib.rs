//! Shared types for the aviator workspace: node ids, transforms, colors,
//! viewport sizes and the interpolation helpers that drive the airplane.

pub mod math;
pub mod types;

pub use math::{ease_toward, normalize};
pub use types::{Color, NodeId, Transform, ViewportSize};
