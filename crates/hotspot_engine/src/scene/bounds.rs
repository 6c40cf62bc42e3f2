//! Local-space bounding volumes and their ray intersection tests
//!
//! Rays passed here are already expressed in the mesh's local space and are
//! not required to be normalized; the returned parameter `t` is measured in
//! units of the given direction, so a unit world ray transformed by an
//! affine matrix yields world distances.

use crate::foundation::math::Vec3;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given half extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Slab test; returns the entry parameter, or 0 when the origin is inside
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let inv = |d: f32| if d == 0.0 { f32::INFINITY } else { 1.0 / d };
        let inv_dir = Vec3::new(inv(direction.x), inv(direction.y), inv(direction.z));

        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;
        for axis in 0..3 {
            let t1 = (self.min[axis] - origin[axis]) * inv_dir[axis];
            let t2 = (self.max[axis] - origin[axis]) * inv_dir[axis];
            // Parallel ray lying outside the slab: 0 * inf gives NaN, treat as miss
            if t1.is_nan() || t2.is_nan() {
                if origin[axis] < self.min[axis] || origin[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }
            tmin = tmin.max(t1.min(t2));
            tmax = tmax.min(t1.max(t2));
        }

        if tmax >= tmin && tmax >= 0.0 {
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}

/// A bounding sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center in local space
    pub center: Vec3,
    /// Radius in local units
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Nearest positive intersection parameter (the exit point when the
    /// origin is inside the sphere)
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let oc = origin - self.center;

        // Solve: |origin + t*direction - center|^2 = radius^2
        let a = direction.dot(&direction);
        if a == 0.0 {
            return None;
        }
        let b = 2.0 * oc.dot(&direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);

        if t1 >= 0.0 {
            Some(t1)
        } else if t2 >= 0.0 {
            Some(t2)
        } else {
            None
        }
    }
}

/// Pickable volume of a mesh, in the mesh's local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// Sphere volume
    Sphere(BoundingSphere),
    /// Box volume
    Box(AABB),
}

impl Bounds {
    /// Sphere at `center` with `radius`
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::Sphere(BoundingSphere::new(center, radius))
    }

    /// Box centered at `center` with half `extents`
    pub fn cuboid(center: Vec3, extents: Vec3) -> Self {
        Self::Box(AABB::from_center_extents(center, extents))
    }

    /// Ray parameter of the nearest intersection, if any
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        match self {
            Self::Sphere(sphere) => sphere.intersect_ray(origin, direction),
            Self::Box(aabb) => aabb.intersect_ray(origin, direction),
        }
    }
}
