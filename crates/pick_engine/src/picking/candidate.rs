//! Pickable candidates supplied by the scene

use crate::foundation::math::Mat4;
use crate::physics::Collider;

/// Entity identifier
///
/// The picking core never owns the scene; it only hands back the id of
/// whatever candidate was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create a new entity with the given ID
    pub fn new(id: u32) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub fn id(&self) -> u32 {
        self.id
    }
}

/// One shape to test in a picking pass
///
/// # Examples
/// ```
/// # use pick_engine::foundation::math::Mat4;
/// # use pick_engine::physics::Collider;
/// # use pick_engine::picking::{layers, Entity, PickCandidate};
/// let collider = Collider::sphere(Default::default(), 0.5).unwrap();
/// let candidate = PickCandidate::new(Entity::new(7), collider, Mat4::identity())
///     .with_layer_bits(layers::GIZMO);
/// assert!(candidate.matches_layer_mask(layers::GIZMO));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PickCandidate {
    /// Entity reported when this candidate is hit
    pub entity: Entity,

    /// Shape in model space
    pub collider: Collider,

    /// Local-to-world matrix at the time of the query
    pub model: Mat4,

    /// Layer bits for filtering (bit mask)
    ///
    /// `None` matches every mask.
    pub layer_bits: Option<u32>,

    /// Whether this candidate is currently pickable
    pub enabled: bool,
}

impl PickCandidate {
    /// Create an enabled candidate on no particular layer
    pub fn new(entity: Entity, collider: Collider, model: Mat4) -> Self {
        Self {
            entity,
            collider,
            model,
            layer_bits: None,
            enabled: true,
        }
    }

    /// Set the layer bits for filtering
    #[must_use]
    pub fn with_layer_bits(mut self, bits: u32) -> Self {
        self.layer_bits = Some(bits);
        self
    }

    /// Set the enabled state
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check if the candidate matches a layer mask
    pub fn matches_layer_mask(&self, mask: u32) -> bool {
        match self.layer_bits {
            Some(bits) => (mask & bits) != 0,
            None => true,
        }
    }
}

/// Standard layer bit definitions
pub mod layers {
    /// World objects layer (bit 0)
    pub const WORLD: u32 = 0b0001;

    /// UI elements layer (bit 1)
    pub const UI: u32 = 0b0010;

    /// Editor gizmos layer (bit 2)
    pub const GIZMO: u32 = 0b0100;

    /// Effects layer (bit 3)
    pub const EFFECTS: u32 = 0b1000;

    /// All layers mask
    pub const ALL: u32 = 0xFFFF_FFFF;

    /// None layers mask
    pub const NONE: u32 = 0x0000_0000;
}
