//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the few helpers the picking and camera
//! code needs (transform composition, perspective projection, euler
//! decomposition).

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
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
#[derive(Debug, Clone, PartialEq)]
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

    /// Convert to a transformation matrix (T * R * S)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Rotate a local-space direction into the parent space
    pub fn rotate_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }
}

/// Yaw/pitch/roll angles in radians
///
/// Rotation order is YXZ: yaw around +Y, then pitch around +X, then roll
/// around +Z.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    /// Rotation around the vertical axis
    pub yaw: f32,
    /// Rotation around the lateral axis
    pub pitch: f32,
    /// Rotation around the view axis
    pub roll: f32,
}

impl EulerAngles {
    /// Same angles expressed in degrees, as `(yaw, pitch, roll)`
    pub fn to_degrees(self) -> (f32, f32, f32) {
        (
            utils::rad_to_deg(self.yaw),
            utils::rad_to_deg(self.pitch),
            utils::rad_to_deg(self.roll),
        )
    }

    /// Build the rotation these angles describe
    pub fn to_quat(self) -> Quat {
        Quat::from_axis_angle(&Vec3::y_axis(), self.yaw)
            * Quat::from_axis_angle(&Vec3::x_axis(), self.pitch)
            * Quat::from_axis_angle(&Vec3::z_axis(), self.roll)
    }
}

/// Decompose the rotation part of a matrix into YXZ euler angles
///
/// Only the upper 3x3 block is read; it is expected to be a pure rotation
/// (unit scale). Near the poles roll is folded into yaw.
pub fn rotation_matrix_to_euler(matrix: &Mat4) -> EulerAngles {
    let m11 = matrix[(0, 0)];
    let m13 = matrix[(0, 2)];
    let m21 = matrix[(1, 0)];
    let m22 = matrix[(1, 1)];
    let m23 = matrix[(1, 2)];
    let m31 = matrix[(2, 0)];
    let m33 = matrix[(2, 2)];

    let pitch = (-m23).clamp(-1.0, 1.0).asin();

    if m23.abs() < 0.999_999_9 {
        EulerAngles {
            yaw: m13.atan2(m33),
            pitch,
            roll: m21.atan2(m22),
        }
    } else {
        EulerAngles {
            yaw: (-m31).atan2(m11),
            pitch,
            roll: 0.0,
        }
    }
}

/// Right-handed OpenGL style perspective projection
///
/// Maps view-space `-Z` into the `[-1, 1]` depth range. Returns `None` when
/// the parameters cannot produce an invertible projection.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Option<Mat4> {
    if !(fov_y > 0.0 && aspect > 0.0 && near > 0.0 && far > near) {
        return None;
    }

    let f = 1.0 / (fov_y * 0.5).tan();
    let depth = near - far;

    Some(Mat4::new(
        f / aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, (far + near) / depth, 2.0 * far * near / depth,
        0.0, 0.0, -1.0, 0.0,
    ))
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}
