//! Viewport picking
//!
//! Turns a cursor position into the entity under it. The scene supplies a
//! slice of [`PickCandidate`]s each pass; nothing is cached between passes, so
//! gizmos may move colliders freely between queries.
//!
//! - [`candidate`] - Entities, candidates and layer bits
//! - [`ray_cast`] - Nearest-hit and all-hits passes over a candidate list
//! - [`system`] - Cursor-driven [`PickingSystem`] with selection tracking

pub mod candidate;
pub mod ray_cast;
pub mod system;

pub use candidate::{layers, Entity, PickCandidate};
pub use ray_cast::{pick_all, pick_nearest, PickHit};
pub use system::PickingSystem;
