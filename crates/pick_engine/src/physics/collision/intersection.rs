//! Analytic ray/shape solvers
//!
//! Every solver works in the shape's own space: the caller is responsible for
//! moving the ray there first (see [`super::bridge`]). Each returns the nearest
//! hit with `0 <= distance <= max_distance`, or `None`.
//!
//! Conventions shared by the cylinder and the capsule: the axis is local +Y,
//! the shape is centered on the local origin and spans `y` in `[-height/2, height/2]`.

use crate::foundation::math::Vec3;
use super::primitives::{Ray, RayHit};

/// Below this, the direction's Y component counts as zero for the cap planes
const PARALLEL_EPSILON: f32 = 1e-6;

/// Squared radial speed at or below which a ray runs along the cylinder axis
const AXIAL_EPSILON_SQ: f32 = f32::EPSILON * f32::EPSILON;

#[inline]
fn within(t: f32, max_distance: f32) -> bool {
    t >= 0.0 && t <= max_distance
}

/// Roots of `a t² + 2 half_b t + c = 0` in ascending order
///
/// Uses the cancellation-free form `q = -(half_b + sign(half_b) √disc)`,
/// `t = q / a` and `t = c / q`, so a tiny `a` does not wreck the near root.
fn solve_quadratic(a: f32, half_b: f32, c: f32) -> Option<(f32, f32)> {
    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let q = -(half_b + half_b.signum() * discriminant.sqrt());
    if q == 0.0 {
        // half_b == 0 and a·c == 0: tangent at the origin
        return Some((0.0, 0.0));
    }
    let (t0, t1) = (q / a, c / q);
    Some(if t0 <= t1 { (t0, t1) } else { (t1, t0) })
}

/// Slab test against an axis-aligned box
///
/// Division by a zero direction component is intentional: the resulting ±∞
/// leaves that axis unconstrained when the origin lies inside the slab and
/// empties the interval when it lies outside. A `0 * ∞` NaN (origin exactly on a
/// slab plane of a parallel axis) never wins a comparison, so it is ignored.
///
/// When the origin is inside the box the exit point is reported, matching the
/// sphere solver's behaviour. That exit distance is what `max_distance` bounds,
/// so an inside origin whose exit lies beyond it yields `None`.
pub fn ray_aabb(ray: &Ray, min: &Vec3, max: &Vec3, max_distance: f32) -> Option<RayHit> {
    let origin = ray.origin();
    let direction = ray.direction();

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_axis = None;
    let mut exit_axis = None;

    for axis in 0..3 {
        let inv_dir = 1.0 / direction[axis];
        let mut t0 = (min[axis] - origin[axis]) * inv_dir;
        let mut t1 = (max[axis] - origin[axis]) * inv_dir;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if t0 > t_enter {
            t_enter = t0;
            enter_axis = Some(axis);
        }
        if t1 < t_exit {
            t_exit = t1;
            exit_axis = Some(axis);
        }
    }

    if t_enter > t_exit || t_exit < 0.0 {
        return None;
    }

    let (distance, axis, outward) = if t_enter >= 0.0 {
        // Entering face points against the direction of travel
        (t_enter, enter_axis, -1.0)
    } else {
        (t_exit, exit_axis, 1.0)
    };
    if !within(distance, max_distance) {
        return None;
    }

    let normal = axis.map_or(-direction, |axis| {
        let mut normal = Vec3::zeros();
        normal[axis] = outward * direction[axis].signum();
        normal
    });
    Some(RayHit::at(ray, distance, normal))
}

/// Quadratic ray/sphere test
///
/// With the origin inside the sphere the far root is reported.
pub fn ray_sphere(ray: &Ray, center: &Vec3, radius: f32, max_distance: f32) -> Option<RayHit> {
    let direction = ray.direction();
    let oc = ray.origin() - center;

    let a = direction.dot(&direction);
    let half_b = oc.dot(&direction);
    let c = oc.dot(&oc) - radius * radius;

    let (t0, t1) = solve_quadratic(a, half_b, c)?;
    let t = [t0, t1].into_iter().find(|t| within(*t, max_distance))?;
    let hit = RayHit::at(ray, t, Vec3::zeros());
    Some(RayHit {
        normal: (hit.point - center) / radius,
        ..hit
    })
}

/// Round side wall of a Y-axis cylinder, clipped to `|y| <= half_height`
///
/// Both roots are clipped independently, so a ray entering through a cap can
/// still report the far wall. Only rays running exactly along the axis skip the
/// wall; nearly axial rays still find it.
pub fn ray_cylinder_side(
    ray: &Ray,
    radius: f32,
    half_height: f32,
    max_distance: f32,
) -> Option<RayHit> {
    let origin = ray.origin();
    let direction = ray.direction();

    let a = direction.x * direction.x + direction.z * direction.z;
    if a <= AXIAL_EPSILON_SQ {
        return None;
    }
    let half_b = origin.x * direction.x + origin.z * direction.z;
    let c = origin.x * origin.x + origin.z * origin.z - radius * radius;

    let (t0, t1) = solve_quadratic(a, half_b, c)?;

    [t0, t1]
        .into_iter()
        .filter(|t| within(*t, max_distance))
        .map(|t| RayHit::at(ray, t, Vec3::zeros()))
        .find(|hit| hit.point.y.abs() <= half_height)
        .map(|hit| RayHit {
            normal: Vec3::new(hit.point.x, 0.0, hit.point.z) / radius,
            ..hit
        })
}

/// Flat disk of `radius` lying in the plane `y = cap_y`
fn ray_cap_disk(ray: &Ray, cap_y: f32, radius: f32, max_distance: f32) -> Option<RayHit> {
    let direction = ray.direction();
    if direction.y.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (cap_y - ray.origin().y) / direction.y;
    if !within(t, max_distance) {
        return None;
    }

    let hit = RayHit::at(ray, t, Vec3::new(0.0, cap_y.signum(), 0.0));
    let radial_sq = hit.point.x * hit.point.x + hit.point.z * hit.point.z;
    (radial_sq <= radius * radius).then_some(hit)
}

/// Cylinder with flat end caps
///
/// The nearest of the side wall and both cap disks wins.
pub fn ray_capped_cylinder(
    ray: &Ray,
    radius: f32,
    height: f32,
    max_distance: f32,
) -> Option<RayHit> {
    let half_height = height * 0.5;

    let side = ray_cylinder_side(ray, radius, half_height, max_distance);
    let top = ray_cap_disk(ray, half_height, radius, max_distance);
    let bottom = ray_cap_disk(ray, -half_height, radius, max_distance);

    RayHit::nearest(RayHit::nearest(side, bottom), top)
}

/// Capsule: cylinder barrel plus two full spheres at `y = ±height/2`
///
/// The caps must be spheres; flat disks here would describe a different shape.
pub fn ray_capsule(ray: &Ray, radius: f32, height: f32, max_distance: f32) -> Option<RayHit> {
    let half_height = height * 0.5;

    let side = ray_cylinder_side(ray, radius, half_height, max_distance);
    let bottom = ray_sphere(ray, &Vec3::new(0.0, -half_height, 0.0), radius, max_distance);
    let top = ray_sphere(ray, &Vec3::new(0.0, half_height, 0.0), radius, max_distance);

    RayHit::nearest(RayHit::nearest(side, bottom), top)
}
