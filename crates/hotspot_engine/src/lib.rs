//! # Hotspot Engine
//!
//! Pointer and gaze interaction for 3D layers drawn over immersive
//! panoramas.
//!
//! ## Features
//!
//! - **Picking**: pointer positions and VR head poses become world rays,
//!   intersected with the layer's scene graph nearest first
//! - **Hover/Click**: single-hover state machine with over/out/click
//!   notifications, skipping decorative geometry in front of hotspots
//! - **VR Gaze**: hover polled at the view center every frame, driving a
//!   dwell timer that selects the hovered hotspot
//! - **View Projection**: layer meshes are prepared so the panorama's
//!   projection shader code and uniforms apply to them
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hotspot_engine::prelude::*;
//!
//! fn create_layer(viewer: &SharedViewer, registry: &TargetMap) -> InteractiveScene {
//!     registry.register_hotspot(std::rc::Rc::new(Hotspot::new("door")));
//!
//!     let config = SceneConfig { interactive: true, enabled: true };
//!     let mut layer = InteractiveScene::new(viewer, &config);
//!     layer.add_node(
//!         SceneNode::mesh("door", Geometry::new(Bounds::sphere(Vec3::zeros(), 0.5)), Material::default())
//!             .with_target("door"),
//!     );
//!     layer
//! }
//!
//! fn frame(layer: &mut InteractiveScene, gaze: &DwellGaze, dt_ms: f64) {
//!     layer.render();
//!     if gaze.update(dt_ms) == Some(layer.listener()) {
//!         layer.click();
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod events;
pub mod foundation;
pub mod input;
pub mod interaction;
pub mod render;
pub mod scene;

mod interactive_scene;
mod viewer;

#[cfg(test)]
mod testing;

pub use interactive_scene::{InteractiveScene, DEFAULT_CLASS_NAME};
pub use viewer::{CameraController, MainCamera, SharedViewer, Viewer};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, DwellConfig, SceneConfig},
        events::{ListenerId, SceneEvent, Signal, Story},
        foundation::math::{Mat4, Quat, Transform, Vec2, Vec3},
        input::{Canvas, Pointer, PointerEvent},
        interaction::{
            DwellGaze, GazeController, Hotspot, HotspotEvent, InteractiveTarget, PointerAction, RegistryError,
            TargetMap, TargetRegistry, HOTSPOT_3D,
        },
        render::{ArrayCamera, Camera, PerspectiveCamera, RenderTarget, Renderer, SceneRenderer, SharedCamera, View},
        scene::{Bounds, Geometry, Material, SceneGraph, SceneNode},
        CameraController, InteractiveScene, MainCamera, SharedViewer, Viewer,
    };
}
