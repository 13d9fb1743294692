//! # Pick Engine
//!
//! Ray casting against collider shapes for editor viewport picking.
//!
//! ## Features
//!
//! - **Analytic Colliders**: boxes, spheres, capped cylinders and capsules
//! - **Transform Bridge**: rotated and non-uniformly scaled colliders via their model matrix
//! - **Cursor Picking**: mouse position -> camera ray -> nearest entity
//! - **Layer Filtering**: bit masks to keep gizmos, UI and world objects apart
//! - **File Configuration**: picking settings in TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pick_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     pick_engine::foundation::logging::init();
//!
//!     let config = PickingConfig::load_from_file("picking.toml")?;
//!     let camera = Camera::perspective(Vec3::new(0.0, 2.0, 10.0), 60.0, 16.0 / 9.0, 0.1, 1000.0);
//!     let candidates = vec![PickCandidate::new(
//!         Entity::new(1),
//!         Collider::capsule(0.5, 1.8)?,
//!         Transform::from_position(Vec3::new(0.0, 1.0, 0.0)).to_matrix(),
//!     )];
//!
//!     let mut picking = PickingSystem::new(1920, 1080, config);
//!     picking.update_mouse(960.0, 540.0, true);
//!     if let Some(hit) = picking.update(&camera, &candidates) {
//!         println!("Selected entity {} at distance {:.2}", hit.entity.id(), hit.distance);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod physics;
pub mod render;
pub mod input;
pub mod picking;

/// Common imports for picking users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PickingConfig},
        foundation::math::{Mat4, Quat, Transform, Vec2, Vec3},
        input::MouseState,
        physics::{Collider, CollisionError, Ray, RayHit},
        picking::{layers, pick_all, pick_nearest, Entity, PickCandidate, PickHit, PickingSystem},
        render::Camera,
    };
}
