//! Orchestration of the aviator scene.
//!
//! [`Game`] owns the scene graph, camera, renderer and host. The host
//! supplies the viewport size, the event stream and next-frame scheduling;
//! the game mutates the scene each frame and hands it to the renderer.
//!
//! # Invariants
//! - At most one next-frame request is outstanding at any time.
//! - All scene mutations of a frame complete before the frame is rendered.
//! - `initialize` runs once; a stopped game never schedules another frame.

pub mod config;
mod error;
mod game;
mod host;
mod lights;

pub use config::{
    CameraConfig, ConfigError, FogConfig, GameConfig, LightsConfig, MotionConfig, PlacementConfig,
};
pub use error::GameError;
pub use game::{Game, GameState};
pub use host::Host;
pub use lights::LightRig;

/// Id of the page element the web build mounts its canvas into.
pub const MOUNT_ELEMENT_ID: &str = "world";
