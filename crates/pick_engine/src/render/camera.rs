//! # Viewport Camera
//!
//! The camera only exists here to turn a click into a world-space ray: it
//! produces view and projection matrices and unprojects NDC points.
//!
//! ## Conventions
//! - Right-handed, Y-up world space
//! - The camera looks down its local -Z axis
//! - OpenGL clip depth: the near plane is `z = -1`, the far plane `z = 1`

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec2, Vec3};
use crate::physics::collision::{CollisionResult, Ray};

/// 3D perspective camera
///
/// Matrices are computed on demand rather than cached, so the camera can be
/// mutated freely between picking queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera looking at the origin
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Update camera target (look-at point)
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }

    /// Configure camera to look at a specific point with custom up vector
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
        log::trace!("Camera look_at updated - target: {:?}, up: {:?}", target, up);
    }

    /// Update camera aspect ratio for viewport changes
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// World-to-camera matrix
    pub fn get_view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Perspective projection matrix
    pub fn get_projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined `projection * view` matrix
    pub fn get_view_projection_matrix(&self) -> Mat4 {
        self.get_projection_matrix() * self.get_view_matrix()
    }

    /// Convert a point in NDC to a world-space ray from the camera position
    ///
    /// # Errors
    /// [`crate::physics::CollisionError::InvalidCameraState`] when the camera
    /// matrices cannot be inverted, e.g. position equal to target or a zero
    /// aspect ratio.
    ///
    /// # Usage Example
    /// ```rust
    /// use pick_engine::foundation::math::{Vec2, Vec3};
    /// use pick_engine::render::Camera;
    ///
    /// let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 60.0, 1.0, 0.1, 100.0);
    /// let ray = camera.screen_to_world_ray(Vec2::zeros()).unwrap();
    /// assert!(ray.direction().z < -0.99);
    /// ```
    pub fn screen_to_world_ray(&self, ndc: Vec2) -> CollisionResult<Ray> {
        Ray::from_ndc(
            ndc,
            self.position,
            &self.get_view_matrix(),
            &self.get_projection_matrix(),
        )
    }
}

impl Default for Camera {
    /// Above and behind the origin, looking at it with a 45 degree field of view
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, 3.0),
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::CollisionError;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_ray_points_at_target() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(4.0, 2.0, -3.0));
        camera.set_target(Vec3::new(1.0, 0.0, 2.0));

        let ray = camera.screen_to_world_ray(Vec2::zeros()).unwrap();
        let expected = (camera.target - camera.position).normalize();

        assert_relative_eq!(ray.origin(), camera.position);
        assert_relative_eq!(ray.direction(), expected, epsilon = 1e-4);
    }

    #[test]
    fn test_right_edge_ray_turns_right() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 60.0, 1.0, 0.1, 100.0);
        let ray = camera.screen_to_world_ray(Vec2::new(1.0, 0.0)).unwrap();
        assert!(ray.direction().x > 0.0);
        assert!(ray.direction().z < 0.0);
    }

    #[test]
    fn test_position_equal_to_target_is_invalid() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::zeros());

        let result = camera.screen_to_world_ray(Vec2::zeros());
        assert!(matches!(result, Err(CollisionError::InvalidCameraState(_))));
    }

    #[test]
    fn test_zero_aspect_is_invalid() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(0.0);

        let result = camera.screen_to_world_ray(Vec2::new(0.5, 0.5));
        assert!(matches!(result, Err(CollisionError::InvalidCameraState(_))));
    }
}
