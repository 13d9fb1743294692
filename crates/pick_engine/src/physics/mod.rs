//! Physics module for collision queries
//!
//! Only ray queries are provided: there is no broad phase, contact generation
//! or collision response here.

pub mod collision;

pub use collision::{
    Collider,
    CollisionError,
    Ray,
    RayHit,
};
