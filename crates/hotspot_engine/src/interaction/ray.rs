//! Rays and ray hits

use crate::foundation::math::Vec3;
use crate::scene::SceneNode;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized on construction)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A node intersected by a ray
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// The node that was hit
    pub node: &'a SceneNode,
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// Intersection point in world space
    pub point: Vec3,
}

/// Why a raycast produced no hit list
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaycastError {
    /// No camera is bound yet
    #[error("no camera bound")]
    CameraUnbound,

    /// There is nothing to intersect
    #[error("no objects to intersect")]
    NoObjects,

    /// The scene layer is not interactive, so no raycaster exists
    #[error("raycaster not allocated")]
    NoRaycaster,

    /// An array camera without sub-cameras cannot give a head pose
    #[error("array camera has no sub-cameras")]
    EmptyArrayCamera,

    /// Camera projection could not be inverted
    #[error("camera projection is not invertible")]
    SingularProjection,
}
