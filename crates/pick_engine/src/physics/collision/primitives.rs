//! Ray and hit primitives
//!
//! Rays are immutable values with a unit direction. [`RayHit`] describes the
//! nearest surface point a ray reached; "no hit" is simply `None`.

use crate::foundation::math::{Mat4, Point3, Vec2, Vec3, Vec4};
use super::error::{CollisionError, CollisionResult};

/// Smallest homogeneous `w` accepted when unprojecting clip-space points
const MIN_UNPROJECT_W: f32 = 1e-12;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Creates a new ray, normalizing the direction
    ///
    /// Fails with [`CollisionError::InvalidRayDirection`] for a zero-length or
    /// non-finite direction, so a ray can never carry NaNs into a solver.
    pub fn new(origin: Vec3, direction: Vec3) -> CollisionResult<Self> {
        let invalid = || CollisionError::InvalidRayDirection([direction.x, direction.y, direction.z]);

        if !direction.iter().all(|c| c.is_finite()) {
            return Err(invalid());
        }
        let direction = direction.try_normalize(f32::EPSILON).ok_or_else(invalid)?;

        Ok(Self { origin, direction })
    }

    /// Build a world-space ray through a point given in normalized device coordinates
    ///
    /// The ray starts at `camera_position` and points from the near plane (clip
    /// `z = -1`) toward the far plane (clip `z = 1`) through `ndc`.
    ///
    /// # Errors
    /// [`CollisionError::InvalidCameraState`] if either matrix is singular or the
    /// unprojected points are degenerate.
    pub fn from_ndc(
        ndc: Vec2,
        camera_position: Vec3,
        view: &Mat4,
        projection: &Mat4,
    ) -> CollisionResult<Self> {
        let inv_projection = projection
            .try_inverse()
            .ok_or(CollisionError::InvalidCameraState("projection matrix is not invertible"))?;
        let inv_view = view
            .try_inverse()
            .ok_or(CollisionError::InvalidCameraState("view matrix is not invertible"))?;

        let near = unproject(&inv_view, &inv_projection, Vec4::new(ndc.x, ndc.y, -1.0, 1.0))?;
        let far = unproject(&inv_view, &inv_projection, Vec4::new(ndc.x, ndc.y, 1.0, 1.0))?;

        Self::new(camera_position, far - near)
            .map_err(|_| CollisionError::InvalidCameraState("near and far points coincide"))
    }

    /// The origin point of the ray
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// The unit direction of the ray
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Transform the ray by an affine matrix
    ///
    /// The transformed direction is renormalized, since a matrix with scale does
    /// not preserve vector length.
    pub fn transform(&self, matrix: &Mat4) -> CollisionResult<Self> {
        let origin = matrix.transform_point(&Point3::from(self.origin)).coords;
        let direction = matrix.transform_vector(&self.direction);
        Self::new(origin, direction)
    }
}

/// Clip space -> world space, with the perspective divide
fn unproject(inv_view: &Mat4, inv_projection: &Mat4, clip: Vec4) -> CollisionResult<Vec3> {
    let world = inv_view * (inv_projection * clip);

    if !world.w.is_finite() || world.w.abs() < MIN_UNPROJECT_W {
        return Err(CollisionError::InvalidCameraState("unprojected point has no finite w"));
    }
    let point = world.xyz() / world.w;
    if !point.iter().all(|c| c.is_finite()) {
        return Err(CollisionError::InvalidCameraState("unprojected point is not finite"));
    }
    Ok(point)
}

/// Result of a ray intersection test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Parametric distance along the ray (`origin + distance * direction`)
    pub distance: f32,
    /// The point of intersection
    pub point: Vec3,
    /// The outward surface normal at the intersection point
    pub normal: Vec3,
}

impl RayHit {
    /// Build a hit at `distance` along `ray`
    pub fn at(ray: &Ray, distance: f32, normal: Vec3) -> Self {
        Self {
            distance,
            point: ray.point_at(distance),
            normal,
        }
    }

    /// Keep whichever of two optional hits is nearer
    pub fn nearest(current: Option<Self>, candidate: Option<Self>) -> Option<Self> {
        match (current, candidate) {
            (Some(a), Some(b)) => Some(if b.distance < a.distance { b } else { a }),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4Ext;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 3.0, 4.0)).unwrap();
        assert_relative_eq!(ray.direction(), Vec3::new(0.0, 0.6, 0.8), epsilon = EPSILON);
        assert_relative_eq!(ray.point_at(5.0), Vec3::new(0.0, 3.0, 4.0), epsilon = EPSILON);
    }

    #[test]
    fn test_ray_rejects_zero_direction() {
        let err = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::zeros()).unwrap_err();
        assert!(matches!(err, CollisionError::InvalidRayDirection(_)));
    }

    #[test]
    fn test_ray_rejects_nan_direction() {
        let result = Ray::new(Vec3::zeros(), Vec3::new(f32::NAN, 0.0, 1.0));
        assert!(matches!(result, Err(CollisionError::InvalidRayDirection(_))));
    }

    #[test]
    fn test_from_ndc_center_points_along_view() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let view = Mat4::look_at(eye, Vec3::zeros(), Vec3::y());
        let projection = Mat4::perspective(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);

        let ray = Ray::from_ndc(Vec2::zeros(), eye, &view, &projection).unwrap();

        assert_relative_eq!(ray.origin(), eye);
        assert_relative_eq!(ray.direction(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_from_ndc_corner_spreads_by_fov() {
        let eye = Vec3::zeros();
        let view = Mat4::look_at(eye, Vec3::new(0.0, 0.0, -1.0), Vec3::y());
        let fov = std::f32::consts::FRAC_PI_2;
        let projection = Mat4::perspective(fov, 1.0, 0.1, 100.0);

        // Top edge of a 90 degree frustum is 45 degrees up
        let ray = Ray::from_ndc(Vec2::new(0.0, 1.0), eye, &view, &projection).unwrap();
        let expected = Vec3::new(0.0, 1.0, -1.0).normalize();
        assert_relative_eq!(ray.direction(), expected, epsilon = 1e-4);
    }

    #[test]
    fn test_from_ndc_rejects_singular_projection() {
        let view = Mat4::identity();
        let result = Ray::from_ndc(Vec2::zeros(), Vec3::zeros(), &view, &Mat4::zeros());
        assert!(matches!(result, Err(CollisionError::InvalidCameraState(_))));
    }

    #[test]
    fn test_from_ndc_rejects_singular_view() {
        let projection = Mat4::perspective(1.0, 1.0, 0.1, 100.0);
        let view = Mat4::new_nonuniform_scaling(&Vec3::new(1.0, 0.0, 1.0));
        let result = Ray::from_ndc(Vec2::zeros(), Vec3::zeros(), &view, &projection);
        assert!(matches!(result, Err(CollisionError::InvalidCameraState(_))));
    }

    #[test]
    fn test_transform_renormalizes_scaled_direction() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::x()).unwrap();
        let matrix = Mat4::new_nonuniform_scaling(&Vec3::new(4.0, 1.0, 1.0));

        let scaled = ray.transform(&matrix).unwrap();
        assert_relative_eq!(scaled.origin(), Vec3::new(4.0, 0.0, 0.0));
        assert_relative_eq!(scaled.direction().magnitude(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_nearest_prefers_smaller_distance_and_keeps_first_on_tie() {
        let ray = Ray::new(Vec3::zeros(), Vec3::z()).unwrap();
        let near = RayHit::at(&ray, 1.0, -Vec3::z());
        let far = RayHit::at(&ray, 2.0, -Vec3::z());
        let tie = RayHit::at(&ray, 1.0, Vec3::x());

        assert_eq!(RayHit::nearest(Some(far), Some(near)), Some(near));
        assert_eq!(RayHit::nearest(Some(near), Some(tie)), Some(near));
        assert_eq!(RayHit::nearest(None, Some(far)), Some(far));
        assert_eq!(RayHit::nearest(None, None), None);
    }
}
