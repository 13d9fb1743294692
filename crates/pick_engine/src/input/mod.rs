//! Input handling
//!
//! Cursor state for viewport picking.

pub mod picking;

pub use picking::MouseState;
