//! # Cameras
//!
//! Perspective cameras and the multi-view "array" camera used for stereo VR.
//!
//! ## Coordinate System
//! Right-handed, Y-up world space. Cameras look down their local `-Z` axis;
//! projection maps view-space depth into OpenGL's `[-1, 1]` NDC range.

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::{self, utils, EulerAngles, Mat4, Point3, Quat, Transform, Vec2, Vec3};
use crate::interaction::{Ray, RaycastError};

/// Local forward axis of every camera
pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Perspective camera placed directly in world space
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// World pose (scale is ignored)
    pub transform: Transform,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl PerspectiveCamera {
    /// Create a camera at the world origin looking down `-Z`
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            transform: Transform::identity(),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Place the camera (builder)
    #[must_use]
    pub fn with_pose(mut self, position: Vec3, rotation: Quat) -> Self {
        self.transform = Transform::from_position_rotation(position, rotation);
        self
    }

    /// Orient the camera from yaw/pitch/roll in degrees
    pub fn set_orientation_degrees(&mut self, yaw: f32, pitch: f32, roll: f32) {
        self.transform.rotation = EulerAngles {
            yaw: utils::deg_to_rad(yaw),
            pitch: utils::deg_to_rad(pitch),
            roll: utils::deg_to_rad(roll),
        }
        .to_quat();
        log::trace!("Camera orientation set to yaw {yaw:.2} pitch {pitch:.2} roll {roll:.2}");
    }

    /// World position of the camera
    pub fn world_position(&self) -> Vec3 {
        self.transform.position
    }

    /// Camera-to-world matrix
    pub fn matrix_world(&self) -> Mat4 {
        Mat4::new_translation(&self.transform.position) * self.transform.rotation.to_homogeneous()
    }

    /// Projection matrix, `None` for degenerate frustum parameters
    pub fn projection_matrix(&self) -> Option<Mat4> {
        math::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Convert NDC coordinates to a world-space ray
    ///
    /// # Arguments
    /// * `ndc` - Position in NDC (-1 to 1, left to right / bottom to top)
    ///
    /// # Mathematical Process
    /// 1. Inverse projection: NDC point halfway into the depth range → view space
    /// 2. Camera world matrix: view → world space
    /// 3. Direction from the camera position through that point
    pub fn screen_to_world_ray(&self, ndc: Vec2) -> Result<Ray, RaycastError> {
        let inv_projection = self
            .projection_matrix()
            .and_then(|projection| projection.try_inverse())
            .ok_or(RaycastError::SingularProjection)?;

        let view_point = inv_projection.transform_point(&Point3::new(ndc.x, ndc.y, 0.5));
        let world_point = self.matrix_world().transform_point(&view_point);

        let origin = self.world_position();
        let direction = world_point.coords - origin;
        if direction.norm_squared() <= f32::EPSILON {
            return Err(RaycastError::SingularProjection);
        }

        Ok(Ray::new(origin, direction))
    }

    /// Ray from the camera position along its forward axis
    pub fn forward_ray(&self) -> Ray {
        Ray::new(self.world_position(), self.transform.rotate_vector(FORWARD))
    }
}

impl Default for PerspectiveCamera {
    /// 90 degree vertical FOV, square aspect, near 0.1, far 1000
    fn default() -> Self {
        Self::new(90.0, 1.0, 0.1, 1000.0)
    }
}

/// Camera made of several simultaneous viewpoints (e.g. one per eye)
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayCamera {
    /// Combined camera used for culling
    pub base: PerspectiveCamera,

    /// Per-view cameras with independent world poses
    pub cameras: Vec<PerspectiveCamera>,
}

impl ArrayCamera {
    /// Create an array camera from its views
    pub fn new(base: PerspectiveCamera, cameras: Vec<PerspectiveCamera>) -> Self {
        Self { base, cameras }
    }
}

/// Any camera a scene can be drawn or picked with
#[derive(Debug, Clone, PartialEq)]
pub enum Camera {
    /// Single perspective viewpoint
    Perspective(PerspectiveCamera),
    /// Multi-view camera
    Array(ArrayCamera),
}

impl Camera {
    /// Whether this is a multi-view camera
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// The single camera, or the combined camera of an array
    pub fn primary(&self) -> &PerspectiveCamera {
        match self {
            Self::Perspective(camera) => camera,
            Self::Array(array) => &array.base,
        }
    }

    /// Mutable access to [`Camera::primary`]
    pub fn primary_mut(&mut self) -> &mut PerspectiveCamera {
        match self {
            Self::Perspective(camera) => camera,
            Self::Array(array) => &mut array.base,
        }
    }

    /// Camera whose pose represents the viewer's head
    ///
    /// First sub-camera of an array camera (falling back to the combined
    /// camera when the array is empty), otherwise the camera itself.
    pub fn head(&self) -> &PerspectiveCamera {
        match self {
            Self::Perspective(camera) => camera,
            Self::Array(array) => array.cameras.first().unwrap_or(&array.base),
        }
    }
}

impl From<PerspectiveCamera> for Camera {
    fn from(camera: PerspectiveCamera) -> Self {
        Self::Perspective(camera)
    }
}

impl From<ArrayCamera> for Camera {
    fn from(camera: ArrayCamera) -> Self {
        Self::Array(camera)
    }
}

/// Camera shared between the camera controller and the scenes drawing with it
pub type SharedCamera = Rc<RefCell<Camera>>;
