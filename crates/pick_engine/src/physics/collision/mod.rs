//! Ray casting against collider shapes
//!
//! # Architecture
//!
//! - **Model Space Storage**: Collider shapes are stored in local coordinates
//! - **On-Demand Transformation**: the ray is moved into each collider's local
//!   space for the test, and hits are mapped back to world space
//! - **Closed Shape Set**: [`Collider`] is an enum; each variant has one analytic solver
//!
//! # Module Organization
//!
//! - [`primitives`] - Rays and hit records
//! - [`intersection`] - Per-shape analytic solvers working in local space
//! - [`bridge`] - World/local conversion for rays and hits
//! - [`shape`] - Collider shapes and the world-space entry point
//! - [`error`] - Construction and transform errors

pub mod error;
pub mod primitives;
pub mod intersection;
pub mod bridge;
pub mod shape;

// Re-export commonly used types
pub use error::{CollisionError, CollisionResult};
pub use primitives::{Ray, RayHit};
pub use bridge::{LocalFrame, LocalRay};
pub use shape::{BoxCollider, CapsuleCollider, Collider, CylinderCollider, SphereCollider};
