//! Test doubles shared by the unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::events::{ListenerId, SceneEvent};
use crate::foundation::logging;
use crate::foundation::math::{Transform, Vec3};
use crate::input::PointerEvent;
use crate::interaction::{GazeController, Hotspot, TargetMap};
use crate::interactive_scene::InteractiveScene;
use crate::render::{
    ArrayCamera, Camera, PerspectiveCamera, RenderTarget, Renderer, SceneRenderer, SharedCamera, ShaderProgram,
    UniformMap, UniformValue, View,
};
use crate::scene::{Bounds, Geometry, Material, NodeKind, SceneGraph, SceneNode};
use crate::viewer::{MainCamera, SharedViewer, Viewer};

pub const UNIFORMS_DEF: &str = "uniform float tFov;";
pub const PROJECTION_SHADER: &str = "uniform float tFov;\nvoid main() {\n    gl_Position = toScreen(position, tFov);\n}";

/// Gaze controller recording its calls
#[derive(Debug, Default)]
pub struct RecordingGaze {
    starts: RefCell<Vec<ListenerId>>,
    stops: Cell<usize>,
}

impl RecordingGaze {
    pub fn starts(&self) -> Vec<ListenerId> {
        self.starts.borrow().clone()
    }

    pub fn stops(&self) -> usize {
        self.stops.get()
    }
}

impl GazeController for RecordingGaze {
    fn start(&self, owner: ListenerId) {
        self.starts.borrow_mut().push(owner);
    }

    fn stop(&self) {
        self.stops.set(self.stops.get() + 1);
    }
}

/// View providing a single `tFov` uniform
pub struct FlatView;

impl View for FlatView {
    fn uniforms_def(&self) -> &str {
        UNIFORMS_DEF
    }

    fn update_uniforms(&self, uniforms: &mut UniformMap) {
        if let Some(value) = uniforms.get_mut("tFov") {
            *value = Some(UniformValue::Float(90.0));
        }
    }

    fn projection_vertex_shader(&self) -> &str {
        PROJECTION_SHADER
    }
}

/// Shader program recording bound uniforms
#[derive(Debug, Default)]
pub struct FakeProgram {
    pub linked: bool,
    pub used: bool,
    pub names: Vec<String>,
    pub bound: Vec<(String, UniformValue)>,
}

impl FakeProgram {
    pub fn linked(names: &[&str]) -> Self {
        Self {
            linked: true,
            names: names.iter().map(|n| (*n).to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn unlinked(names: &[&str]) -> Self {
        Self {
            linked: false,
            ..Self::linked(names)
        }
    }
}

impl ShaderProgram for FakeProgram {
    fn is_linked(&self) -> bool {
        self.linked
    }

    fn use_program(&mut self) {
        self.used = true;
    }

    fn uniform_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn set_uniform(&mut self, name: &str, value: &UniformValue) {
        self.bound.push((name.to_string(), value.clone()));
    }
}

/// One recorded draw
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub scene_name: String,
    pub camera: Camera,
    pub target: Option<RenderTarget>,
    pub vr: bool,
}

/// Renderer recording draws
///
/// While VR is enabled it draws with `headset` instead of the main camera,
/// and it runs the uniform hook of every mesh it draws.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub vr_enabled: bool,
    pub headset: Option<ArrayCamera>,
    pub scenes: HashMap<String, SceneRenderer>,
    pub draws: Vec<DrawCall>,
    pub uniforms_bound: usize,
}

impl RecordingRenderer {
    pub fn add_scene_target(&mut self, scene_uid: &str, target: RenderTarget) {
        self.scenes
            .insert(scene_uid.to_string(), SceneRenderer { target: Some(target) });
    }
}

impl Renderer for RecordingRenderer {
    fn vr_enabled(&self) -> bool {
        self.vr_enabled
    }

    fn set_vr_enabled(&mut self, enabled: bool) {
        self.vr_enabled = enabled;
    }

    fn scene_renderer(&self, scene_uid: &str) -> Option<SceneRenderer> {
        self.scenes.get(scene_uid).cloned()
    }

    fn frame_camera(&self, camera: &Camera) -> Camera {
        match (&self.headset, self.vr_enabled) {
            (Some(headset), true) => Camera::from(headset.clone()),
            _ => camera.clone(),
        }
    }

    fn render(&mut self, scene: &SceneGraph, camera: &Camera, target: Option<&RenderTarget>) {
        let mut bound = 0;
        scene.traverse(&mut |node| {
            if let NodeKind::Mesh(mesh) = node.kind() {
                if let Some(hook) = &mesh.before_render {
                    bound += hook.apply(&mut FakeProgram::linked(&["tFov", "modelViewMatrix"]));
                }
            }
        });
        self.uniforms_bound += bound;

        self.draws.push(DrawCall {
            scene_name: scene.name().to_string(),
            camera: camera.clone(),
            target: target.cloned(),
            vr: self.vr_enabled,
        });
    }
}

/// Mesh picked through a sphere around `center`
pub fn sphere_mesh(name: &str, center: Vec3, radius: f32) -> SceneNode {
    SceneNode::mesh(
        name,
        Geometry::new(Bounds::sphere(Vec3::zeros(), radius)),
        Material::new("basic", "void main() {\n#include <project_vertex>\n}"),
    )
    .with_transform(Transform::from_position(center))
}

/// Viewer wired to recording collaborators
///
/// The main camera sits at the origin looking down `-Z` with a 90 degree
/// field of view; the headset has a single identity eye.
pub struct Fixture {
    pub viewer: SharedViewer,
    pub registry: Rc<TargetMap>,
    pub renderer: Rc<RefCell<RecordingRenderer>>,
    pub camera: Rc<RefCell<MainCamera>>,
    pub gaze: Rc<RecordingGaze>,
    pub main_camera: SharedCamera,
}

impl Fixture {
    pub fn new() -> Self {
        logging::try_init();

        let gaze = Rc::new(RecordingGaze::default());
        let main_camera: SharedCamera = Rc::new(RefCell::new(Camera::from(PerspectiveCamera::default())));
        let camera = Rc::new(RefCell::new(MainCamera::new(
            Rc::clone(&main_camera),
            Rc::clone(&gaze) as Rc<dyn GazeController>,
        )));
        let renderer = Rc::new(RefCell::new(RecordingRenderer {
            headset: Some(ArrayCamera::new(
                PerspectiveCamera::default(),
                vec![PerspectiveCamera::default()],
            )),
            ..Default::default()
        }));
        let registry = Rc::new(TargetMap::new());

        let viewer = Viewer::new(
            Rc::clone(&camera) as Rc<RefCell<dyn crate::viewer::CameraController>>,
            Rc::new(FlatView),
            Rc::clone(&renderer) as Rc<RefCell<dyn Renderer>>,
            Rc::clone(&registry) as Rc<dyn crate::interaction::TargetRegistry>,
        )
        .into_shared();

        Self {
            viewer,
            registry,
            renderer,
            camera,
            gaze,
            main_camera,
        }
    }

    /// Register an interactive hotspot
    pub fn hotspot(&self, uid: &str) -> Rc<Hotspot> {
        let hotspot = Rc::new(Hotspot::new(uid));
        self.registry.register_hotspot(Rc::clone(&hotspot));
        hotspot
    }

    pub fn load(&self, layer: &mut InteractiveScene, scene_uid: &str) {
        let subscribed = self.viewer.borrow().story.on_scene_load_complete.has(layer.listener());
        if subscribed {
            layer.on_scene_load_complete(&SceneEvent::new(scene_uid));
        }
    }

    pub fn unload(&self, layer: &mut InteractiveScene, scene_uid: &str) {
        let subscribed = self.viewer.borrow().story.on_scene_unload_start.has(layer.listener());
        if subscribed {
            layer.on_scene_unload_start(&SceneEvent::new(scene_uid));
        }
    }

    pub fn dispatch_move(&self, layer: &mut InteractiveScene, event: &PointerEvent) {
        let subscribed = self.viewer.borrow().pointer.on_move.has(layer.listener());
        if subscribed {
            layer.on_pointer_move(event);
        }
    }

    pub fn move_to(&self, layer: &mut InteractiveScene, x: f64, y: f64) {
        self.dispatch_move(layer, &PointerEvent::at(x, y));
    }

    pub fn tap(&self, layer: &mut InteractiveScene, x: f64, y: f64) {
        let subscribed = self.viewer.borrow().pointer.on_tap.has(layer.listener());
        if subscribed {
            layer.on_pointer_tap(&PointerEvent::at(x, y));
        }
    }
}
