//! Narrow-phase ray cast over a candidate list
//!
//! Every candidate is tested; there is no broad phase. A candidate whose model
//! matrix cannot place its shape is logged and skipped so one bad transform
//! never hides the rest of the scene.

use crate::config::PickingConfig;
use crate::foundation::math::Vec3;
use crate::physics::{Ray, RayHit};
use super::candidate::{Entity, PickCandidate};

/// Result of a successful pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Entity that was hit
    pub entity: Entity,
    /// Distance from the ray origin (world units)
    pub distance: f32,
    /// Hit point in world space
    pub point: Vec3,
    /// Surface normal at the hit point in world space
    pub normal: Vec3,
}

impl PickHit {
    fn new(entity: Entity, hit: RayHit) -> Self {
        Self {
            entity,
            distance: hit.distance,
            point: hit.point,
            normal: hit.normal,
        }
    }
}

/// Hits for every candidate that passes the filters, in scene order
fn cast_all<'a>(
    ray: &'a Ray,
    candidates: &'a [PickCandidate],
    config: &'a PickingConfig,
) -> impl Iterator<Item = PickHit> + 'a {
    candidates
        .iter()
        .filter(move |candidate| candidate.enabled && candidate.matches_layer_mask(config.layer_mask))
        .filter_map(move |candidate| {
            match candidate.collider.intersect_ray(ray, &candidate.model, config.max_distance) {
                Ok(hit) => {
                    log::trace!(
                        "{} collider (bounding radius {:.3}) on entity {} -> {:?}",
                        candidate.collider.kind(),
                        candidate.collider.local_bounding_radius(),
                        candidate.entity.id(),
                        hit.map(|h| h.distance)
                    );
                    hit.map(|hit| PickHit::new(candidate.entity, hit))
                }
                Err(e) => {
                    log::warn!("Skipping entity {} during picking: {}", candidate.entity.id(), e);
                    None
                }
            }
        })
}

/// Find the nearest candidate hit by `ray`
///
/// Hits closer together than `config.tie_epsilon` count as equally near, in
/// which case the candidate that comes first in `candidates` wins.
pub fn pick_nearest(
    ray: &Ray,
    candidates: &[PickCandidate],
    config: &PickingConfig,
) -> Option<PickHit> {
    let nearest = cast_all(ray, candidates, config).fold(None, |best: Option<PickHit>, hit| match best {
        Some(current) if hit.distance >= current.distance - config.tie_epsilon => Some(current),
        _ => Some(hit),
    });

    match &nearest {
        Some(hit) => log::debug!("Picked entity {} at distance {:.3}", hit.entity.id(), hit.distance),
        None => log::debug!("Pick missed all {} candidates", candidates.len()),
    }
    nearest
}

/// Every candidate hit by `ray`, nearest first
///
/// Equal distances keep their scene order.
pub fn pick_all(ray: &Ray, candidates: &[PickCandidate], config: &PickingConfig) -> Vec<PickHit> {
    let mut hits: Vec<PickHit> = cast_all(ray, candidates, config).collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    log::debug!("Ray hit {} of {} candidates", hits.len(), candidates.len());
    hits
}
