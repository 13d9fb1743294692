//! High-level picking system for mouse-based entity selection
//!
//! Orchestrates the picking pipeline: input → camera → collision → selection

use crate::config::PickingConfig;
use crate::foundation::math::Vec2;
use crate::input::picking::MouseState;
use crate::physics::collision::CollisionResult;
use crate::render::Camera;
use super::candidate::{Entity, PickCandidate};
use super::ray_cast::{pick_nearest, PickHit};

/// Picking system tying cursor input to the candidate ray cast
///
/// # Usage Example
/// ```rust
/// use pick_engine::config::PickingConfig;
/// use pick_engine::foundation::math::{Mat4, Vec3};
/// use pick_engine::physics::Collider;
/// use pick_engine::picking::{Entity, PickCandidate, PickingSystem};
/// use pick_engine::render::Camera;
///
/// let mut picking_system = PickingSystem::new(800, 600, PickingConfig::default());
/// let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 60.0, 800.0 / 600.0, 0.1, 100.0);
/// let candidates = vec![PickCandidate::new(
///     Entity::new(1),
///     Collider::sphere(Vec3::zeros(), 1.0).unwrap(),
///     Mat4::identity(),
/// )];
///
/// // In your event handling code:
/// picking_system.update_mouse(400.0, 300.0, true);
///
/// // In your update loop:
/// picking_system.update(&camera, &candidates);
/// assert_eq!(picking_system.get_selected(), Some(Entity::new(1)));
/// ```
#[derive(Debug, Clone)]
pub struct PickingSystem {
    /// Mouse input state
    mouse_state: MouseState,

    /// Distance, tie and layer settings for each pass
    config: PickingConfig,

    /// Currently selected entity
    selected_entity: Option<Entity>,
}

impl PickingSystem {
    /// Create a new picking system
    ///
    /// # Arguments
    /// * `window_width` - Initial viewport width in pixels
    /// * `window_height` - Initial viewport height in pixels
    /// * `config` - Picking settings
    pub fn new(window_width: u32, window_height: u32, config: PickingConfig) -> Self {
        Self {
            mouse_state: MouseState::new(window_width, window_height),
            config,
            selected_entity: None,
        }
    }

    /// Update mouse state from window events
    ///
    /// # Arguments
    /// * `screen_x` - Mouse X position in screen space (pixels)
    /// * `screen_y` - Mouse Y position in screen space (pixels)
    /// * `clicked` - Whether left mouse button was clicked this frame
    pub fn update_mouse(&mut self, screen_x: f64, screen_y: f64, clicked: bool) {
        self.mouse_state.update_position(screen_x, screen_y);
        self.mouse_state.set_left_click(clicked);
    }

    /// Update viewport size for NDC conversion
    ///
    /// Call this when the viewport is resized.
    pub fn update_window_size(&mut self, width: u32, height: u32) {
        self.mouse_state.update_window_size(width, height);
    }

    /// Set the layer mask for filtering pickable candidates
    pub fn set_layer_mask(&mut self, mask: u32) {
        self.config.layer_mask = mask;
    }

    /// Current picking settings
    pub fn config(&self) -> &PickingConfig {
        &self.config
    }

    /// Current mouse state
    pub fn mouse_state(&self) -> &MouseState {
        &self.mouse_state
    }

    /// Pick the nearest candidate under a point in NDC
    ///
    /// # Errors
    /// [`crate::physics::CollisionError::InvalidCameraState`] when the camera
    /// cannot produce a ray.
    pub fn pick_at_ndc(
        &self,
        ndc: Vec2,
        camera: &Camera,
        candidates: &[PickCandidate],
    ) -> CollisionResult<Option<PickHit>> {
        let ray = camera.screen_to_world_ray(ndc)?;
        Ok(pick_nearest(&ray, candidates, &self.config))
    }

    /// Pick the nearest candidate under the cursor
    ///
    /// # Errors
    /// [`crate::physics::CollisionError::InvalidCameraState`] when the camera
    /// cannot produce a ray.
    pub fn pick_at_cursor(
        &self,
        camera: &Camera,
        candidates: &[PickCandidate],
    ) -> CollisionResult<Option<PickHit>> {
        self.pick_at_ndc(self.mouse_state.screen_to_ndc(), camera, candidates)
    }

    /// Process a pending click
    ///
    /// Only casts a ray when the left button was clicked. A hit replaces the
    /// selection; a miss or a camera that cannot produce a ray clears it.
    /// Returns the hit, if any.
    pub fn update(&mut self, camera: &Camera, candidates: &[PickCandidate]) -> Option<PickHit> {
        if !self.mouse_state.left_click {
            return None;
        }

        log::debug!(
            "Click at ({:.1}, {:.1})",
            self.mouse_state.screen_x,
            self.mouse_state.screen_y
        );

        let hit = match self.pick_at_cursor(camera, candidates) {
            Ok(hit) => hit,
            Err(e) => {
                log::warn!("Picking skipped this frame: {}", e);
                None
            }
        };

        self.selected_entity = hit.map(|hit| hit.entity);
        self.mouse_state.clear_clicks();
        hit
    }

    /// Get the currently selected entity
    pub fn get_selected(&self) -> Option<Entity> {
        self.selected_entity
    }
}

impl Default for PickingSystem {
    fn default() -> Self {
        let mouse_state = MouseState::default();
        Self::new(mouse_state.window_width, mouse_state.window_height, PickingConfig::default())
    }
}
