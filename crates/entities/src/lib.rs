//! Renderable entities built procedurally into a scene graph.
//!
//! Every entity exposes its root node id plus per-frame update methods; the
//! orchestrator depends on nothing else.

pub mod airplane;
pub mod geometry;
pub mod palette;
pub mod pilot;
pub mod sea;
pub mod sky;

pub use airplane::Airplane;
pub use pilot::Pilot;
pub use sea::Sea;
pub use sky::{Cloud, Sky};

/// Root node names, used to find entities by graph traversal.
pub mod names {
    pub const SEA: &str = "sea";
    pub const SKY: &str = "sky";
    pub const CLOUD: &str = "cloud";
    pub const AIRPLANE: &str = "airplane";
    pub const PROPELLER: &str = "propeller";
    pub const PILOT: &str = "pilot";
    pub const HAIR: &str = "hair";
}
