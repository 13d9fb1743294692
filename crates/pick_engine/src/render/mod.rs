//! Rendering-side helpers needed by picking
//!
//! Only the camera lives here; drawing is left to the host editor.

pub mod camera;

pub use camera::Camera;
