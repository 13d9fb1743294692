//! Scene description files
//!
//! A scene is a camera, a viewport size, picking settings and a list of
//! objects, each with a collider and a transform. Files are TOML or RON.

use pick_engine::config::{Config, ConfigError, PickingConfig};
use pick_engine::foundation::math::{utils, Quat, Transform, Vec3};
use pick_engine::physics::Collider;
use pick_engine::picking::{Entity, PickCandidate};
use pick_engine::render::Camera;
use serde::{Deserialize, Serialize};

/// Camera placement as written in scene files
///
/// The aspect ratio is not stored; it comes from the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 15.0),
            target: Vec3::zeros(),
            up: Vec3::y(),
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Width divided by height
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280, height: 720 }
    }
}

/// Position, Euler rotation and scale of an object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectTransform {
    /// World position
    pub position: Vec3,
    /// Roll, pitch and yaw in degrees (about X, Y and Z)
    pub rotation_degrees: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
}

impl ObjectTransform {
    /// Convert to an engine transform
    pub fn to_transform(&self) -> Transform {
        let rotation = Quat::from_euler_angles(
            utils::deg_to_rad(self.rotation_degrees.x),
            utils::deg_to_rad(self.rotation_degrees.y),
            utils::deg_to_rad(self.rotation_degrees.z),
        );
        Transform::from_position_rotation(self.position, rotation).with_scale(self.scale)
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation_degrees: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// One pickable object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Display name
    pub name: String,
    /// Collider in model space
    pub collider: Collider,
    /// Placement in the world
    #[serde(default)]
    pub transform: ObjectTransform,
    /// Layer bits; omitted means every layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_bits: Option<u32>,
    /// Whether the object can be picked
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// A complete scene file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    /// Viewport camera
    pub camera: SceneCamera,
    /// Viewport size used to map pixels to NDC
    pub viewport: Viewport,
    /// Picking settings
    pub picking: PickingConfig,
    /// Pickable objects; the entity id of each is its index
    pub objects: Vec<SceneObject>,
}

impl SceneDescription {
    /// Build the engine camera for this scene's viewport
    pub fn camera(&self) -> Camera {
        let mut camera = Camera::perspective(
            self.camera.position,
            self.camera.fov_degrees,
            self.viewport.aspect(),
            self.camera.near,
            self.camera.far,
        );
        camera.look_at(self.camera.target, self.camera.up);
        camera
    }

    /// Candidates for a picking pass, in file order
    #[allow(clippy::cast_possible_truncation)]
    pub fn candidates(&self) -> Vec<PickCandidate> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| {
                let candidate = PickCandidate::new(
                    Entity::new(index as u32),
                    object.collider,
                    object.transform.to_transform().to_matrix(),
                )
                .with_enabled(object.enabled);
                match object.layer_bits {
                    Some(bits) => candidate.with_layer_bits(bits),
                    None => candidate,
                }
            })
            .collect()
    }

    /// Name of the object behind an entity
    pub fn object_name(&self, entity: Entity) -> Option<&str> {
        self.objects.get(entity.id() as usize).map(|object| object.name.as_str())
    }
}

impl Config for SceneDescription {
    fn validate(&self) -> Result<(), ConfigError> {
        self.picking.validate()?;

        let camera = &self.camera;
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(ConfigError::Invalid(format!(
                "camera needs 0 < near < far, got near = {} far = {}",
                camera.near, camera.far
            )));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera fov_degrees must be in (0, 180), got {}",
                camera.fov_degrees
            )));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::Invalid("viewport must be at least 1x1".to_string()));
        }

        for object in &self.objects {
            object
                .collider
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("object '{}': {}", object.name, e)))?;
        }
        Ok(())
    }
}
