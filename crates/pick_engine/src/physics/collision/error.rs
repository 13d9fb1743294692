//! Errors raised by ray and collider construction and by the transform bridge

/// Collision query errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Ray direction had zero length or non-finite components
    #[error("Invalid ray direction: {0:?}")]
    InvalidRayDirection([f32; 3]),

    /// Camera matrices could not be unprojected into a ray
    #[error("Invalid camera state: {0}")]
    InvalidCameraState(&'static str),

    /// A collider's model matrix is not invertible
    #[error("Degenerate transform: model matrix is not invertible")]
    DegenerateTransform,

    /// Collider parameters violate the shape's invariants
    #[error("Invalid shape parameters: {0}")]
    InvalidShapeParameters(String),
}

/// Result alias for collision queries
pub type CollisionResult<T> = Result<T, CollisionError>;
