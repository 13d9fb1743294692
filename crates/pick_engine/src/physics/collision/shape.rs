//! Collider shapes
//!
//! Shapes are stored in MODEL SPACE and paired with a model matrix at query
//! time. The set of shapes is closed, so dispatch is a plain `match`.
//!
//! Box bounds are always local: a box collider never stores world-space corners,
//! and rotation or scale in the model matrix turn it into an oriented box.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{max_axis_scale, Mat4, Point3, Vec3};
use super::bridge::LocalFrame;
use super::error::{CollisionError, CollisionResult};
use super::intersection::{ray_aabb, ray_capped_cylinder, ray_capsule, ray_sphere};
use super::primitives::{Ray, RayHit};

fn check_radius(radius: f32) -> CollisionResult<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(CollisionError::InvalidShapeParameters(format!(
            "radius must be positive and finite, got {radius}"
        )))
    }
}

fn check_height(height: f32) -> CollisionResult<()> {
    if height.is_finite() && height >= 0.0 {
        Ok(())
    } else {
        Err(CollisionError::InvalidShapeParameters(format!(
            "height must be non-negative and finite, got {height}"
        )))
    }
}

/// Axis-aligned box in local space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    min: Vec3,
    max: Vec3,
}

impl BoxCollider {
    /// Create a box from its local corners; requires `min < max` on every axis
    pub fn new(min: Vec3, max: Vec3) -> CollisionResult<Self> {
        let collider = Self { min, max };
        collider.validate()?;
        Ok(collider)
    }

    /// Minimum local corner
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum local corner
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Check the shape invariants
    pub fn validate(&self) -> CollisionResult<()> {
        let finite = self.min.iter().chain(self.max.iter()).all(|v| v.is_finite());
        let ordered = (0..3).all(|axis| self.min[axis] < self.max[axis]);
        if finite && ordered {
            Ok(())
        } else {
            Err(CollisionError::InvalidShapeParameters(format!(
                "box bounds must satisfy min < max on every axis, got min {:?} max {:?}",
                self.min.as_slice(),
                self.max.as_slice()
            )))
        }
    }
}

/// Sphere with a local center offset
///
/// Spheres are tested in world space: the model matrix moves the center and its
/// largest axis scale inflates the radius. Rotation has no effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereCollider {
    center: Vec3,
    radius: f32,
}

impl SphereCollider {
    /// Create a sphere around a local center
    pub fn new(center: Vec3, radius: f32) -> CollisionResult<Self> {
        let collider = Self { center, radius };
        collider.validate()?;
        Ok(collider)
    }

    /// Local center offset
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Local radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Check the shape invariants
    pub fn validate(&self) -> CollisionResult<()> {
        check_radius(self.radius)?;
        if self.center.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(CollisionError::InvalidShapeParameters("sphere center must be finite".into()))
        }
    }
}

/// Cylinder along local +Y with flat caps, centered on the local origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderCollider {
    radius: f32,
    height: f32,
}

impl CylinderCollider {
    /// Create a cylinder of full `height` along local Y
    pub fn new(radius: f32, height: f32) -> CollisionResult<Self> {
        let collider = Self { radius, height };
        collider.validate()?;
        Ok(collider)
    }

    /// Radius of the barrel and caps
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Full height along local Y
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Check the shape invariants
    pub fn validate(&self) -> CollisionResult<()> {
        check_radius(self.radius)?;
        check_height(self.height)
    }
}

/// Capsule along local +Y: a segment of `height` swept by a sphere of `radius`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleCollider {
    radius: f32,
    height: f32,
}

impl CapsuleCollider {
    /// Create a capsule; `height` is the distance between the hemisphere centers
    pub fn new(radius: f32, height: f32) -> CollisionResult<Self> {
        let collider = Self { radius, height };
        collider.validate()?;
        Ok(collider)
    }

    /// Radius of the barrel and hemispheres
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Distance between the two hemisphere centers
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Check the shape invariants
    pub fn validate(&self) -> CollisionResult<()> {
        check_radius(self.radius)?;
        check_height(self.height)
    }
}

/// Collision shape types (stored in MODEL SPACE)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Collider {
    /// Box with local min/max corners
    Box(BoxCollider),
    /// Sphere with local center and radius
    Sphere(SphereCollider),
    /// Cylinder with flat caps
    Cylinder(CylinderCollider),
    /// Capsule with hemispherical caps
    Capsule(CapsuleCollider),
}

impl Collider {
    /// Creates a box collider from local corners
    pub fn cuboid(min: Vec3, max: Vec3) -> CollisionResult<Self> {
        BoxCollider::new(min, max).map(Self::Box)
    }

    /// Creates a spherical collider
    pub fn sphere(center: Vec3, radius: f32) -> CollisionResult<Self> {
        SphereCollider::new(center, radius).map(Self::Sphere)
    }

    /// Creates a capped cylinder collider
    pub fn cylinder(radius: f32, height: f32) -> CollisionResult<Self> {
        CylinderCollider::new(radius, height).map(Self::Cylinder)
    }

    /// Creates a capsule collider
    pub fn capsule(radius: f32, height: f32) -> CollisionResult<Self> {
        CapsuleCollider::new(radius, height).map(Self::Capsule)
    }

    /// Re-check invariants, e.g. after deserializing a scene
    pub fn validate(&self) -> CollisionResult<()> {
        match self {
            Self::Box(collider) => collider.validate(),
            Self::Sphere(collider) => collider.validate(),
            Self::Cylinder(collider) => collider.validate(),
            Self::Capsule(collider) => collider.validate(),
        }
    }

    /// Short name of the shape, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box(_) => "box",
            Self::Sphere(_) => "sphere",
            Self::Cylinder(_) => "cylinder",
            Self::Capsule(_) => "capsule",
        }
    }

    /// Radius of a sphere around the local origin enclosing the shape
    pub fn local_bounding_radius(&self) -> f32 {
        match self {
            Self::Box(collider) => collider.min.abs().sup(&collider.max.abs()).magnitude(),
            Self::Sphere(collider) => collider.center.magnitude() + collider.radius,
            Self::Cylinder(collider) => {
                (collider.radius * collider.radius + 0.25 * collider.height * collider.height).sqrt()
            }
            Self::Capsule(collider) => 0.5 * collider.height + collider.radius,
        }
    }

    /// Test a ray already expressed in this collider's local space
    ///
    /// Spheres are included for completeness; here the sphere sits at its local
    /// center with its local radius.
    pub fn intersect_local(&self, local_ray: &Ray, max_distance: f32) -> Option<RayHit> {
        match self {
            Self::Box(collider) => ray_aabb(local_ray, &collider.min, &collider.max, max_distance),
            Self::Sphere(collider) => {
                ray_sphere(local_ray, &collider.center, collider.radius, max_distance)
            }
            Self::Cylinder(collider) => {
                ray_capped_cylinder(local_ray, collider.radius, collider.height, max_distance)
            }
            Self::Capsule(collider) => {
                ray_capsule(local_ray, collider.radius, collider.height, max_distance)
            }
        }
    }

    /// Test a world-space ray against this collider placed by `model`
    ///
    /// The returned hit is in world space with a world-space distance.
    ///
    /// # Errors
    /// [`CollisionError::DegenerateTransform`] when `model` cannot place the shape.
    pub fn intersect_ray(
        &self,
        world_ray: &Ray,
        model: &Mat4,
        max_distance: f32,
    ) -> CollisionResult<Option<RayHit>> {
        if let Self::Sphere(collider) = self {
            return Self::intersect_world_sphere(collider, world_ray, model, max_distance);
        }

        let frame = LocalFrame::new(model)?;
        let local = frame.ray_to_local(world_ray)?;
        let hit = self
            .intersect_local(&local.ray, local.local_distance(max_distance))
            .map(|hit| frame.hit_to_world(&local, &hit))
            .filter(|hit| hit.distance <= max_distance);
        Ok(hit)
    }

    fn intersect_world_sphere(
        collider: &SphereCollider,
        world_ray: &Ray,
        model: &Mat4,
        max_distance: f32,
    ) -> CollisionResult<Option<RayHit>> {
        // Non-invertible models are rejected for every shape
        LocalFrame::new(model)?;

        let center = model.transform_point(&Point3::from(collider.center)).coords;
        let radius = collider.radius * max_axis_scale(model);
        if !(radius.is_finite() && radius > 0.0) || !center.iter().all(|v| v.is_finite()) {
            return Err(CollisionError::DegenerateTransform);
        }
        Ok(ray_sphere(world_ray, &center, radius, max_distance))
    }
}

impl From<BoxCollider> for Collider {
    fn from(collider: BoxCollider) -> Self {
        Self::Box(collider)
    }
}

impl From<SphereCollider> for Collider {
    fn from(collider: SphereCollider) -> Self {
        Self::Sphere(collider)
    }
}

impl From<CylinderCollider> for Collider {
    fn from(collider: CylinderCollider) -> Self {
        Self::Cylinder(collider)
    }
}

impl From<CapsuleCollider> for Collider {
    fn from(collider: CapsuleCollider) -> Self {
        Self::Capsule(collider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Quat, Transform};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn ray(origin: [f32; 3], direction: [f32; 3]) -> Ray {
        Ray::new(Vec3::from(origin), Vec3::from(direction)).unwrap()
    }

    #[test]
    fn test_constructors_reject_bad_parameters() {
        assert!(Collider::sphere(Vec3::zeros(), 0.0).is_err());
        assert!(Collider::sphere(Vec3::zeros(), -1.0).is_err());
        assert!(Collider::sphere(Vec3::zeros(), f32::NAN).is_err());
        assert!(Collider::cylinder(1.0, -0.1).is_err());
        assert!(Collider::capsule(0.0, 1.0).is_err());
        assert!(Collider::cuboid(Vec3::new(1.0, -1.0, -1.0), Vec3::new(-1.0, 1.0, 1.0)).is_err());
        // Flat boxes are rejected too
        assert!(Collider::cuboid(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0)).is_err());

        assert!(matches!(
            Collider::capsule(-2.0, 1.0),
            Err(CollisionError::InvalidShapeParameters(_))
        ));
    }

    #[test]
    fn test_constructors_accept_valid_parameters() {
        assert!(Collider::cylinder(1.0, 0.0).is_ok());
        assert!(Collider::capsule(0.5, 0.0).is_ok());
        let collider = Collider::cuboid(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(collider.kind(), "box");
    }

    #[test]
    fn test_box_scenario_through_identity() {
        let collider = Collider::cuboid(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)).unwrap();
        let hit = collider
            .intersect_ray(&ray([0.0, 0.0, -5.0], [0.0, 0.0, 1.0]), &Mat4::identity(), f32::INFINITY)
            .unwrap()
            .unwrap();
        assert_relative_eq!(hit.distance, 4.0, epsilon = EPSILON);
    }

    #[test]
    fn test_box_bounds_are_local_to_model_matrix() {
        let collider = Collider::cuboid(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)).unwrap();
        let model = Transform::from_position(Vec3::new(10.0, 0.0, 0.0)).to_matrix();

        // The untransformed location no longer hits
        let at_origin = ray([0.0, 0.0, -5.0], [0.0, 0.0, 1.0]);
        assert_eq!(collider.intersect_ray(&at_origin, &model, f32::INFINITY), Ok(None));

        let hit = collider
            .intersect_ray(&ray([10.0, 0.0, -5.0], [0.0, 0.0, 1.0]), &model, f32::INFINITY)
            .unwrap()
            .unwrap();
        assert_relative_eq!(hit.distance, 4.0, epsilon = EPSILON);
        assert_relative_eq!(hit.point, Vec3::new(10.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotated_box_behaves_as_oriented_box() {
        let collider = Collider::cuboid(Vec3::new(-2.0, -0.5, -0.5), Vec3::new(2.0, 0.5, 0.5)).unwrap();
        // Long axis rotated from X onto Z
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2);
        let model = Transform::from_position_rotation(Vec3::zeros(), rotation).to_matrix();

        let hit = collider
            .intersect_ray(&ray([0.0, 0.0, -10.0], [0.0, 0.0, 1.0]), &model, f32::INFINITY)
            .unwrap()
            .unwrap();
        assert_relative_eq!(hit.distance, 8.0, epsilon = EPSILON);
        assert_relative_eq!(hit.normal, Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_sphere_scenario_and_translation() {
        let collider = Collider::sphere(Vec3::zeros(), 1.0).unwrap();
        let hit = collider
            .intersect_ray(&ray([5.0, 0.0, 0.0], [-1.0, 0.0, 0.0]), &Mat4::identity(), f32::INFINITY)
            .unwrap()
            .unwrap();
        assert_relative_eq!(hit.distance, 4.0, epsilon = EPSILON);

        let model = Transform::from_position(Vec3::new(0.0, 3.0, 0.0)).to_matrix();
        let hit = collider
            .intersect_ray(&ray([5.0, 3.0, 0.0], [-1.0, 0.0, 0.0]), &model, f32::INFINITY)
            .unwrap()
            .unwrap();
        assert_relative_eq!(hit.point, Vec3::new(1.0, 3.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_sphere_radius_uses_largest_axis_scale() {
        let collider = Collider::sphere(Vec3::zeros(), 1.0).unwrap();
        let model = Transform::identity().with_scale(Vec3::new(1.0, 3.0, 1.0)).to_matrix();

        // Approaching along X, where the true ellipsoid is only 1 wide
        let hit = collider
            .intersect_ray(&ray([5.0, 0.0, 0.0], [-1.0, 0.0, 0.0]), &model, f32::INFINITY)
            .unwrap()
            .unwrap();
        assert_relative_eq!(hit.distance, 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_sphere_with_zero_scale_is_degenerate() {
        let collider = Collider::sphere(Vec3::zeros(), 1.0).unwrap();
        let model = Mat4::new_scaling(0.0);
        let result = collider.intersect_ray(&ray([5.0, 0.0, 0.0], [-1.0, 0.0, 0.0]), &model, 100.0);
        assert_eq!(result, Err(CollisionError::DegenerateTransform));
    }

    #[test]
    fn test_sphere_with_flattened_axis_is_degenerate() {
        let collider = Collider::sphere(Vec3::zeros(), 1.0).unwrap();
        let flat = Mat4::new_nonuniform_scaling(&Vec3::new(1.0, 0.0, 1.0));
        let r = ray([5.0, 0.0, 0.0], [-1.0, 0.0, 0.0]);

        assert_eq!(collider.intersect_ray(&r, &flat, 100.0), Err(CollisionError::DegenerateTransform));
        let cuboid = Collider::cuboid(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(cuboid.intersect_ray(&r, &flat, 100.0), Err(CollisionError::DegenerateTransform));
    }

    #[test]
    fn test_cylinder_parallel_scenario() {
        let collider = Collider::cylinder(1.0, 2.0).unwrap();
        let result = collider.intersect_ray(
            &ray([2.0, 10.0, 0.0], [0.0, -1.0, 0.0]),
            &Mat4::identity(),
            f32::INFINITY,
        );
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_cylinder_max_distance_is_honoured_after_scaling() {
        let collider = Collider::cylinder(1.0, 2.0).unwrap();
        let model = Transform::identity().with_scale(Vec3::new(2.0, 2.0, 2.0)).to_matrix();
        let r = ray([10.0, 0.0, 0.0], [-1.0, 0.0, 0.0]);

        // World radius is 2, so the wall is 8 away
        let hit = collider.intersect_ray(&r, &model, 9.0).unwrap().unwrap();
        assert_relative_eq!(hit.distance, 8.0, epsilon = EPSILON);
        assert_eq!(collider.intersect_ray(&r, &model, 7.5), Ok(None));
    }

    #[test]
    fn test_capsule_scenario_hits_hemisphere_apex() {
        let collider = Collider::capsule(1.0, 2.0).unwrap();
        let hit = collider
            .intersect_ray(&ray([0.0, 6.0, 0.0], [0.0, -1.0, 0.0]), &Mat4::identity(), f32::INFINITY)
            .unwrap()
            .unwrap();
        assert_relative_eq!(hit.point, Vec3::new(0.0, 2.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(hit.distance, 4.0, epsilon = EPSILON);
    }

    #[test]
    fn test_capsule_tilted_onto_x_axis() {
        let collider = Collider::capsule(0.5, 4.0).unwrap();
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), -std::f32::consts::FRAC_PI_2);
        let model = Transform::from_position_rotation(Vec3::new(0.0, 1.0, 0.0), rotation).to_matrix();

        // Local +Y now points along world +X; the far tip sits at x = 2.5
        let hit = collider
            .intersect_ray(&ray([10.0, 1.0, 0.0], [-1.0, 0.0, 0.0]), &model, f32::INFINITY)
            .unwrap()
            .unwrap();
        assert_relative_eq!(hit.point, Vec3::new(2.5, 1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(hit.normal, Vec3::x(), epsilon = EPSILON);
    }

    #[test]
    fn test_singular_model_matrix_is_degenerate() {
        let collider = Collider::capsule(1.0, 2.0).unwrap();
        let model = Mat4::zeros();
        let result = collider.intersect_ray(&ray([0.0, 6.0, 0.0], [0.0, -1.0, 0.0]), &model, 10.0);
        assert_eq!(result, Err(CollisionError::DegenerateTransform));
    }

    #[test]
    fn test_local_bounding_radius() {
        assert_relative_eq!(Collider::capsule(1.0, 2.0).unwrap().local_bounding_radius(), 2.0);
        assert_relative_eq!(
            Collider::sphere(Vec3::new(3.0, 4.0, 0.0), 1.0).unwrap().local_bounding_radius(),
            6.0
        );
        let collider = Collider::cuboid(Vec3::new(-1.0, -2.0, -2.0), Vec3::new(2.0, 1.0, 1.0)).unwrap();
        assert_relative_eq!(collider.local_bounding_radius(), 12.0_f32.sqrt(), epsilon = EPSILON);
    }
}
