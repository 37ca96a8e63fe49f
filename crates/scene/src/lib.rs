//! Scene graph: a tree of positioned meshes, lights and groups plus fog.
//!
//! # Invariants
//! - The graph exclusively owns every node; entities hold `NodeId`s only.
//! - Parent links are for lookup and world-matrix composition, never ownership.
//! - Child order is insertion order, so traversal is deterministic.

pub mod graph;
pub mod light;
pub mod mesh;

pub use graph::{Node, NodeKind, SceneError, SceneGraph, Visit};
pub use light::{
    AmbientLight, DirectionalLight, DirectionalShadow, Fog, HemisphereLight, Light, LightKind,
    OrthoFrustum,
};
pub use mesh::{Geometry, Material, Mesh};
