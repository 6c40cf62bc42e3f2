//! Ray construction and scene intersection
//!
//! Turns a pointer position (or, in VR, the head pose) into a world-space
//! ray and collects every mesh it crosses, nearest first.

use crate::foundation::math::{Mat4, Vec2};
use crate::interaction::{Hit, Ray, RaycastError};
use crate::render::camera::Camera;
use crate::scene::{NodeKind, SceneNode};

/// Builds picking rays and intersects them with scene nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raycaster {
    /// Hits closer than this are ignored
    pub near: f32,
    /// Hits farther than this are ignored
    pub far: f32,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self {
            near: 0.0,
            far: f32::INFINITY,
        }
    }
}

impl Raycaster {
    /// Create a raycaster accepting hits at any distance
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the world-space picking ray
    ///
    /// In VR with an array camera the pointer position is meaningless: the
    /// ray starts at the first sub-camera and points along its forward
    /// axis. Otherwise `ndc` is unprojected through the camera.
    pub fn build_ray(&self, ndc: Vec2, camera: &Camera, vr: bool) -> Result<Ray, RaycastError> {
        match camera {
            Camera::Array(array) if vr => {
                let head = array.cameras.first().ok_or(RaycastError::EmptyArrayCamera)?;
                Ok(head.forward_ray())
            }
            _ => camera.primary().screen_to_world_ray(ndc),
        }
    }

    /// Intersect a ray with nodes, nearest hit first
    ///
    /// With `recursive`, descendants are tested too. Equidistant hits keep
    /// their traversal order. Invisible nodes hide their whole subtree.
    pub fn intersect_objects<'a>(&self, ray: &Ray, objects: &'a [SceneNode], recursive: bool) -> Vec<Hit<'a>> {
        let mut hits = Vec::new();
        let identity = Mat4::identity();

        for object in objects {
            self.intersect_node(ray, object, &identity, recursive, &mut hits);
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn intersect_node<'a>(
        &self,
        ray: &Ray,
        node: &'a SceneNode,
        parent_world: &Mat4,
        recursive: bool,
        hits: &mut Vec<Hit<'a>>,
    ) {
        if !node.visible {
            return;
        }

        let world = parent_world * node.transform.to_matrix();

        if let NodeKind::Mesh(mesh) = node.kind() {
            if let Some(geometry) = &mesh.geometry {
                // Test in local space; affine maps keep the ray parameter,
                // so t is the world distance along the unit world ray.
                if let Some(inverse) = world.try_inverse() {
                    let local_origin = inverse.transform_point(&ray.origin.into());
                    let local_direction = inverse.transform_vector(&ray.direction);

                    if let Some(t) = geometry.bounds.intersect_ray(local_origin.coords, local_direction) {
                        if t >= self.near && t <= self.far {
                            hits.push(Hit {
                                node,
                                distance: t,
                                point: ray.point_at(t),
                            });
                        }
                    }
                } else {
                    log::trace!("Skipping node '{}' with singular world matrix", node.name);
                }
            }
        }

        if recursive {
            for child in node.children() {
                self.intersect_node(ray, child, &world, recursive, hits);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Quat, Transform, Vec3};
    use crate::render::camera::{ArrayCamera, PerspectiveCamera};
    use crate::scene::{Bounds, Geometry, Material};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn ball_at(name: &str, position: Vec3, radius: f32) -> SceneNode {
        SceneNode::mesh(
            name,
            Geometry::new(Bounds::sphere(Vec3::zeros(), radius)),
            Material::default(),
        )
        .with_transform(Transform::from_position(position))
    }

    fn forward_ray() -> Ray {
        Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_hits_sorted_nearest_first() {
        let objects = vec![
            ball_at("far", Vec3::new(0.0, 0.0, -10.0), 1.0),
            ball_at("near", Vec3::new(0.0, 0.0, -3.0), 1.0),
            ball_at("off-axis", Vec3::new(5.0, 0.0, -3.0), 1.0),
        ];

        let hits = Raycaster::new().intersect_objects(&forward_ray(), &objects, true);
        let names: Vec<_> = hits.iter().map(|h| h.node.name.as_str()).collect();

        assert_eq!(names, vec!["near", "far"]);
        assert_relative_eq!(hits[0].distance, 2.0, epsilon = EPSILON);
        assert_relative_eq!(hits[0].point, Vec3::new(0.0, 0.0, -2.0), epsilon = EPSILON);
        assert_relative_eq!(hits[1].distance, 9.0, epsilon = EPSILON);
    }

    #[test]
    fn test_equidistant_hits_keep_query_order() {
        let objects = vec![
            ball_at("first", Vec3::new(0.0, 0.0, -5.0), 1.0),
            ball_at("second", Vec3::new(0.0, 0.0, -5.0), 1.0),
        ];

        let hits = Raycaster::new().intersect_objects(&forward_ray(), &objects, true);
        assert_eq!(hits[0].node.name, "first");
        assert_eq!(hits[1].node.name, "second");
    }

    #[test]
    fn test_recursive_uses_parent_transforms() {
        let parent = SceneNode::group("parent")
            .with_transform(Transform::from_position(Vec3::new(0.0, 0.0, -4.0)))
            .with_child(ball_at("child", Vec3::new(0.0, 0.0, -2.0), 1.0));
        let objects = vec![parent];

        let hits = Raycaster::new().intersect_objects(&forward_ray(), &objects, true);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].distance, 5.0, epsilon = EPSILON);

        let shallow = Raycaster::new().intersect_objects(&forward_ray(), &objects, false);
        assert!(shallow.is_empty());
    }

    #[test]
    fn test_scaled_mesh_reports_world_distance() {
        let mut node = ball_at("big", Vec3::new(0.0, 0.0, -10.0), 1.0);
        node.transform.scale = Vec3::new(3.0, 3.0, 3.0);
        let objects = vec![node];

        let hits = Raycaster::new().intersect_objects(&forward_ray(), &objects, true);
        assert_relative_eq!(hits[0].distance, 7.0, epsilon = EPSILON);
    }

    #[test]
    fn test_invisible_and_disposed_nodes_are_skipped() {
        let mut hidden = ball_at("hidden", Vec3::new(0.0, 0.0, -3.0), 1.0);
        hidden.visible = false;
        let mut disposed = ball_at("disposed", Vec3::new(0.0, 0.0, -4.0), 1.0);
        disposed.dispose();
        let objects = vec![hidden, disposed];

        assert!(Raycaster::new().intersect_objects(&forward_ray(), &objects, true).is_empty());
    }

    #[test]
    fn test_near_far_window() {
        let objects = vec![
            ball_at("near", Vec3::new(0.0, 0.0, -3.0), 1.0),
            ball_at("far", Vec3::new(0.0, 0.0, -50.0), 1.0),
        ];
        let raycaster = Raycaster { near: 0.0, far: 10.0 };

        let hits = raycaster.intersect_objects(&forward_ray(), &objects, true);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node.name, "near");
    }

    #[test]
    fn test_box_bounded_mesh_is_hit_on_its_near_face() {
        let crate_box = SceneNode::mesh(
            "crate",
            Geometry::new(Bounds::cuboid(Vec3::zeros(), Vec3::new(1.0, 0.5, 2.0))),
            Material::default(),
        )
        .with_transform(Transform::from_position(Vec3::new(0.0, 0.0, -6.0)));
        let ball = ball_at("ball", Vec3::new(0.0, 0.0, -10.0), 1.0);
        let objects = vec![ball, crate_box];

        let hits = Raycaster::new().intersect_objects(&forward_ray(), &objects, true);
        let names: Vec<_> = hits.iter().map(|h| h.node.name.as_str()).collect();

        assert_eq!(names, vec!["crate", "ball"]);
        assert_relative_eq!(hits[0].distance, 4.0, epsilon = EPSILON);
        assert_relative_eq!(hits[0].point, Vec3::new(0.0, 0.0, -4.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotated_box_uses_local_extents() {
        // Quarter turn around Y swaps the box's X and Z extents
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2);
        let slab = SceneNode::mesh(
            "slab",
            Geometry::new(Bounds::cuboid(Vec3::zeros(), Vec3::new(3.0, 1.0, 0.5))),
            Material::default(),
        )
        .with_transform(Transform::from_position_rotation(Vec3::new(0.0, 0.0, -10.0), rotation));
        let objects = vec![slab];

        let hits = Raycaster::new().intersect_objects(&forward_ray(), &objects, true);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].distance, 7.0, epsilon = EPSILON);

        let beside = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(Raycaster::new().intersect_objects(&beside, &objects, true).is_empty());
    }

    #[test]
    fn test_empty_objects_give_no_hits() {
        assert!(Raycaster::new().intersect_objects(&forward_ray(), &[], true).is_empty());
    }

    #[test]
    fn test_vr_array_camera_ray_ignores_pointer() {
        let yaw = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2);
        let pitch = Quat::from_axis_angle(&Vec3::x_axis(), 0.3);
        let head_rotation = yaw * pitch;
        let head_position = Vec3::new(0.5, 1.6, -2.0);
        let head = PerspectiveCamera::default().with_pose(head_position, head_rotation);
        let other_eye = PerspectiveCamera::default().with_pose(Vec3::new(9.0, 9.0, 9.0), Quat::identity());
        let camera = Camera::from(ArrayCamera::new(PerspectiveCamera::default(), vec![head, other_eye]));

        let raycaster = Raycaster::new();
        let expected = head_rotation * Vec3::new(0.0, 0.0, -1.0);

        for ndc in [Vec2::zeros(), Vec2::new(0.9, -0.7), Vec2::new(-1.0, 1.0)] {
            let ray = raycaster.build_ray(ndc, &camera, true).unwrap();
            assert_relative_eq!(ray.origin, head_position, epsilon = EPSILON);
            assert_relative_eq!(ray.direction, expected, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_array_camera_outside_vr_uses_pointer() {
        let camera = Camera::from(ArrayCamera::new(PerspectiveCamera::default(), Vec::new()));
        let ray = Raycaster::new().build_ray(Vec2::new(1.0, 0.0), &camera, false).unwrap();
        assert_relative_eq!(ray.direction, Vec3::new(1.0, 0.0, -1.0).normalize(), epsilon = EPSILON);
    }

    #[test]
    fn test_empty_array_camera_in_vr_is_an_error() {
        let camera = Camera::from(ArrayCamera::new(PerspectiveCamera::default(), Vec::new()));
        assert_eq!(
            Raycaster::new().build_ray(Vec2::zeros(), &camera, true),
            Err(RaycastError::EmptyArrayCamera)
        );
    }
}
