//! World <-> local space conversion for collider tests
//!
//! Colliders are stored in model space and the ray is moved into that space for
//! each test, rather than moving the shape into world space. Hits found in local
//! space are mapped back so that distances from different colliders compare
//! directly.

use crate::foundation::math::{Mat4, Point3};
use super::error::{CollisionError, CollisionResult};
use super::primitives::{Ray, RayHit};

/// A collider's model matrix together with its inverse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    model: Mat4,
    inverse: Mat4,
}

/// A world ray expressed in a collider's local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalRay {
    /// The ray in local space, with a unit direction
    pub ray: Ray,
    /// Local length covered per unit of world distance along the ray
    pub units_per_world: f32,
}

impl LocalRay {
    /// Convert a world-space distance bound into local units
    pub fn local_distance(&self, world_distance: f32) -> f32 {
        world_distance * self.units_per_world
    }
}

impl LocalFrame {
    /// Build a frame from a local-to-world model matrix
    ///
    /// # Errors
    /// [`CollisionError::DegenerateTransform`] if the matrix has no usable inverse.
    pub fn new(model: &Mat4) -> CollisionResult<Self> {
        let inverse = model.try_inverse().ok_or(CollisionError::DegenerateTransform)?;
        if !inverse.iter().all(|v| v.is_finite()) {
            return Err(CollisionError::DegenerateTransform);
        }
        Ok(Self { model: *model, inverse })
    }

    /// Move a world ray into local space
    pub fn ray_to_local(&self, world_ray: &Ray) -> CollisionResult<LocalRay> {
        let units_per_world = self.inverse.transform_vector(&world_ray.direction()).magnitude();
        let ray = world_ray
            .transform(&self.inverse)
            .map_err(|_| CollisionError::DegenerateTransform)?;
        Ok(LocalRay { ray, units_per_world })
    }

    /// Move a local ray back into world space
    pub fn ray_to_world(&self, local_ray: &Ray) -> CollisionResult<Ray> {
        local_ray
            .transform(&self.model)
            .map_err(|_| CollisionError::DegenerateTransform)
    }

    /// Map a hit found along `local` back onto the world ray it came from
    ///
    /// Points go through the model matrix, normals through the inverse
    /// transpose, and the distance is rescaled to world units.
    pub fn hit_to_world(&self, local: &LocalRay, hit: &RayHit) -> RayHit {
        let point = self.model.transform_point(&Point3::from(hit.point)).coords;
        let normal = self.inverse.transpose().transform_vector(&hit.normal);
        RayHit {
            distance: hit.distance / local.units_per_world,
            point,
            normal: normal.try_normalize(f32::EPSILON).unwrap_or(normal),
        }
    }
}
