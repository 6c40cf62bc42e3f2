//! Viewer context shared by scene layers
//!
//! The viewer aggregates the host-side collaborators a layer talks to:
//! render surface, pointer and lifecycle signals, camera management, the
//! current view projection, the renderer and the target registry.
//! Collaborators that get called back while a layer is busy are held
//! behind their own `Rc` so the viewer itself is borrowed only briefly.

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::Story;
use crate::input::{Canvas, Pointer};
use crate::interaction::{GazeController, TargetRegistry};
use crate::render::{Renderer, SharedCamera, View};

/// Camera management of the viewer
pub trait CameraController {
    /// Camera the panorama is drawn with
    fn main(&self) -> SharedCamera;

    /// Gaze controller used in VR
    fn gaze(&self) -> Rc<dyn GazeController>;

    /// Orient the main camera (degrees)
    fn look_at(&mut self, yaw: f32, pitch: f32, roll: f32);
}

/// Standard [`CameraController`] around one shared camera
pub struct MainCamera {
    camera: SharedCamera,
    gaze: Rc<dyn GazeController>,
    orientation: Option<(f32, f32, f32)>,
}

impl MainCamera {
    /// Controller for `camera` using `gaze` in VR
    pub fn new(camera: SharedCamera, gaze: Rc<dyn GazeController>) -> Self {
        Self {
            camera,
            gaze,
            orientation: None,
        }
    }

    /// Last orientation requested through `look_at`, in degrees
    pub fn orientation(&self) -> Option<(f32, f32, f32)> {
        self.orientation
    }
}

impl CameraController for MainCamera {
    fn main(&self) -> SharedCamera {
        Rc::clone(&self.camera)
    }

    fn gaze(&self) -> Rc<dyn GazeController> {
        Rc::clone(&self.gaze)
    }

    fn look_at(&mut self, yaw: f32, pitch: f32, roll: f32) {
        self.orientation = Some((yaw, pitch, roll));
        match self.camera.try_borrow_mut() {
            Ok(mut camera) => camera.primary_mut().set_orientation_degrees(yaw, pitch, roll),
            Err(_) => log::warn!("Main camera busy, orientation not applied"),
        }
    }
}

/// Host context of scene layers
pub struct Viewer {
    /// Render surface size
    pub canvas: Canvas,
    /// Pointer listener registries
    pub pointer: Pointer,
    /// Scene lifecycle listener registries
    pub story: Story,
    /// Camera management
    pub camera: Rc<RefCell<dyn CameraController>>,
    /// Current view projection
    pub view: Rc<dyn View>,
    /// Rendering backend
    pub renderer: Rc<RefCell<dyn Renderer>>,
    /// Hotspot lookup
    pub registry: Rc<dyn TargetRegistry>,
    /// Whether the viewer presents to a VR headset
    pub vr: bool,
}

/// Viewer shared between the host and its layers
pub type SharedViewer = Rc<RefCell<Viewer>>;

impl Viewer {
    /// Viewer with a default canvas, VR off and no listeners
    pub fn new(
        camera: Rc<RefCell<dyn CameraController>>,
        view: Rc<dyn View>,
        renderer: Rc<RefCell<dyn Renderer>>,
        registry: Rc<dyn TargetRegistry>,
    ) -> Self {
        Self {
            canvas: Canvas::default(),
            pointer: Pointer::default(),
            story: Story::default(),
            camera,
            view,
            renderer,
            registry,
            vr: false,
        }
    }

    /// Set the render surface size (builder)
    #[must_use]
    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    /// Wrap for sharing with layers
    pub fn into_shared(self) -> SharedViewer {
        Rc::new(RefCell::new(self))
    }
}
