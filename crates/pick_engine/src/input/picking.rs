//! Mouse state for picking operations
//!
//! Provides utilities for converting screen-space coordinates to
//! Normalized Device Coordinates (NDC) for ray casting.

use crate::foundation::math::Vec2;

/// Mouse state for picking operations
#[derive(Debug, Clone, PartialEq)]
pub struct MouseState {
    /// Current screen-space X position (pixels)
    pub screen_x: f64,
    /// Current screen-space Y position (pixels)
    pub screen_y: f64,
    /// Viewport width in pixels
    pub window_width: u32,
    /// Viewport height in pixels
    pub window_height: u32,
    /// Left mouse button pressed this frame
    pub left_click: bool,
}

impl MouseState {
    /// Create a new mouse state with default values
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            screen_x: 0.0,
            screen_y: 0.0,
            window_width,
            window_height,
            left_click: false,
        }
    }

    /// Convert the cursor position to Normalized Device Coordinates (NDC)
    ///
    /// NDC range: [-1, 1] where:
    /// - X: -1 = left, +1 = right
    /// - Y: -1 = bottom, +1 = top (pixel rows grow downward, so Y is flipped)
    ///
    /// A zero-sized viewport is treated as one pixel wide/high.
    ///
    /// # Examples
    /// ```
    /// # use pick_engine::input::picking::MouseState;
    /// let mut mouse = MouseState::new(1920, 1080);
    /// mouse.update_position(960.0, 540.0);
    /// let ndc = mouse.screen_to_ndc();
    /// assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
    /// ```
    #[allow(clippy::cast_possible_truncation)]
    pub fn screen_to_ndc(&self) -> Vec2 {
        let width = f64::from(self.window_width.max(1));
        let height = f64::from(self.window_height.max(1));

        let ndc_x = (self.screen_x / width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (self.screen_y / height) * 2.0;
        Vec2::new(ndc_x as f32, ndc_y as f32)
    }

    /// Update mouse position from window events
    ///
    /// # Arguments
    /// * `x` - Mouse X position in screen space (pixels from left)
    /// * `y` - Mouse Y position in screen space (pixels from top)
    pub fn update_position(&mut self, x: f64, y: f64) {
        self.screen_x = x;
        self.screen_y = y;
    }

    /// Update viewport size (for NDC conversion)
    ///
    /// Call this whenever the viewport is resized.
    pub fn update_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// Set left mouse button state
    pub fn set_left_click(&mut self, clicked: bool) {
        self.left_click = clicked;
    }

    /// Clear all click states (call at end of frame)
    pub fn clear_clicks(&mut self) {
        self.left_click = false;
    }
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}
