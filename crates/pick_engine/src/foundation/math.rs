//! Math utilities and types
//!
//! Provides the fundamental `f32` math types shared by rays, colliders and the camera.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
///
/// Editors and gizmos usually manipulate objects in this decomposed form; the
/// collision queries only ever see the composed model matrix from [`Transform::to_matrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Set the scale, keeping position and rotation
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a model matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Length of each basis column of the matrix's linear part
///
/// For a TRS matrix this is the absolute per-axis scale.
pub fn axis_scales(matrix: &Mat4) -> Vec3 {
    Vec3::new(
        Vec3::new(matrix.m11, matrix.m21, matrix.m31).magnitude(),
        Vec3::new(matrix.m12, matrix.m22, matrix.m32).magnitude(),
        Vec3::new(matrix.m13, matrix.m23, matrix.m33).magnitude(),
    )
}

/// Largest axis scale of the matrix's linear part
pub fn max_axis_scale(matrix: &Mat4) -> f32 {
    axis_scales(matrix).max()
}

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }
}

/// Extension trait for Mat4 with camera matrix constructors
pub trait Mat4Ext {
    /// Create a right-handed perspective projection with OpenGL clip depth (`z` in `[-1, 1]`)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // A zero aspect or near == far yields non-finite entries, not a panic
        //
        // P = [1/(a·tan(φ/2))  0           0              0            ]
        //     [0               1/tan(φ/2)  0              0            ]
        //     [0               0           (f+n)/(n-f)    2fn/(n-f)    ]
        //     [0               0           -1             0            ]
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = (far + near) / (near - far);
        result[(2, 3)] = 2.0 * far * near / (near - far);
        result[(3, 2)] = -1.0;
        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_transform_matrix_trs_order() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2);
        let transform = Transform::from_position_rotation(Vec3::new(1.0, 2.0, 3.0), rotation)
            .with_scale(Vec3::new(2.0, 2.0, 2.0));

        // Scale first, then rotate +X to -Z, then translate
        let moved = transform.to_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved.coords, Vec3::new(1.0, 2.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_axis_scales_ignore_rotation() {
        let rotation = Quat::from_euler_angles(0.3, -1.1, 0.7);
        let matrix = Transform::from_position_rotation(Vec3::new(5.0, 0.0, 0.0), rotation)
            .with_scale(Vec3::new(1.0, 3.0, 0.5))
            .to_matrix();

        assert_relative_eq!(axis_scales(&matrix), Vec3::new(1.0, 3.0, 0.5), epsilon = EPSILON);
        assert_relative_eq!(max_axis_scale(&matrix), 3.0, epsilon = EPSILON);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros(), Vec3::y());
        let eye = view.transform_point(&Point3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(eye.coords, Vec3::zeros(), epsilon = EPSILON);

        // Right-handed: the target ends up on the -Z axis in view space
        let target = view.transform_point(&Point3::origin());
        assert_relative_eq!(target.coords, Vec3::new(0.0, 0.0, -5.0), epsilon = EPSILON);
    }

    #[test]
    fn test_perspective_depth_range() {
        let projection = Mat4::perspective(utils::deg_to_rad(60.0), 1.5, 0.5, 50.0);

        let near = projection * Vec4::new(0.0, 0.0, -0.5, 1.0);
        let far = projection * Vec4::new(0.0, 0.0, -50.0, 1.0);
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = EPSILON);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_degenerate_perspective_does_not_panic() {
        let projection = Mat4::perspective(1.0, 0.0, 0.1, 100.0);
        assert!(!projection[(0, 0)].is_finite());
    }
}
