//! Input tracking: raw host events mapped to a normalized pointer target.
//!
//! # Invariants
//! - Pointer state is replaced wholesale on every move event.
//! - The pointer target always lies in `[-1, 1]` on both axes for
//!   positions inside the viewport.

pub mod event;
pub mod pointer;

pub use event::{InputEvent, InputKind, Subscriptions};
pub use pointer::{PointerTracker, normalized_pointer};
