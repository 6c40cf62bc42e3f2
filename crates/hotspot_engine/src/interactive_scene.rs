//! # Interactive scene layer
//!
//! An [`InteractiveScene`] is a 3D layer drawn on top of a panorama. It owns
//! a scene graph, draws it with the panorama's camera and projection, and
//! when interactive turns pointer input (or, in VR, the head pose) into
//! hover and click notifications on hotspots.
//!
//! ## Host contract
//!
//! The host owns the event sources. For every event it calls the matching
//! `on_*` method of each layer whose [`ListenerId`] is registered on the
//! corresponding signal:
//!
//! | Signal                             | Method                          |
//! |------------------------------------|---------------------------------|
//! | `viewer.pointer.on_move`           | [`InteractiveScene::on_pointer_move`] |
//! | `viewer.pointer.on_tap`            | [`InteractiveScene::on_pointer_tap`]  |
//! | `viewer.story.on_scene_load_complete` | [`InteractiveScene::on_scene_load_complete`] |
//! | `viewer.story.on_scene_unload_start`  | [`InteractiveScene::on_scene_unload_start`]  |
//!
//! Once per frame the host calls [`InteractiveScene::render`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::SceneConfig;
use crate::events::{ListenerId, SceneEvent};
use crate::foundation::math::{self, Vec2};
use crate::input::PointerEvent;
use crate::interaction::{
    resolve_first_interactive, BoundCamera, CameraBinding, HandlerBinding, HandlerState, HoverState,
    HoverTransition, InteractiveTarget, PointerAction, RaycastError, Raycaster, VrGaze,
};
use crate::render::{Camera, Renderer, ShaderHook, UniformHook};
use crate::scene::{SceneGraph, SceneNode};
use crate::viewer::{SharedViewer, Viewer};

/// Class name used in scene graph names unless overridden
pub const DEFAULT_CLASS_NAME: &str = "InteractiveScene";

/// Pickable 3D layer over a panorama
pub struct InteractiveScene {
    listener: ListenerId,
    viewer: Option<SharedViewer>,
    scene: SceneGraph,
    render_enabled: bool,
    handlers: HandlerBinding,
    raycaster: Option<Raycaster>,
    hover: HoverState,
    binding: CameraBinding,
}

impl InteractiveScene {
    /// Create a layer and subscribe it to the viewer
    pub fn new(viewer: &SharedViewer, config: &SceneConfig) -> Self {
        Self::with_class_name(viewer, config, DEFAULT_CLASS_NAME)
    }

    /// Create a layer whose scene graph is named after `class_name`
    pub fn with_class_name(viewer: &SharedViewer, config: &SceneConfig, class_name: &str) -> Self {
        let listener = ListenerId::next();

        let mut scene = SceneGraph::new(format!("{class_name}-{}", listener.get()));
        scene.frustum_culled = false;

        let mut layer = Self {
            listener,
            viewer: Some(Rc::clone(viewer)),
            scene,
            render_enabled: true,
            handlers: HandlerBinding::new(listener),
            raycaster: None,
            hover: HoverState::new(),
            binding: CameraBinding::Unbound,
        };

        layer.with_viewer_mut(|viewer| viewer.story.on_scene_load_complete.add(listener));
        layer.configure(config);

        log::debug!("Created scene layer '{}' ({listener})", layer.scene.name());
        layer
    }

    /// Apply enabled and interactive settings
    pub fn configure(&mut self, config: &SceneConfig) {
        self.set_enabled(config.enabled);
        self.set_interactive(config.interactive);
    }

    /// Identity of this layer on the viewer's signals
    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    /// Underlying scene graph
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Top-level nodes
    pub fn children(&self) -> &[SceneNode] {
        self.scene.children()
    }

    /// Whether pointer listeners are registered
    pub fn interactive(&self) -> bool {
        self.handlers.is_attached()
    }

    /// Pointer listener state
    pub fn handler_state(&self) -> HandlerState {
        self.handlers.state()
    }

    /// Turn pointer interaction on or off
    ///
    /// While the layer is disabled, turning it on is remembered and applied
    /// when the layer is enabled again.
    pub fn set_interactive(&mut self, interactive: bool) {
        let render_enabled = self.render_enabled;
        let handlers = &mut self.handlers;
        let attached = Self::borrow_viewer_mut(self.viewer.as_ref(), |viewer| {
            handlers.set_interactive(interactive, render_enabled, &mut viewer.pointer)
        });

        if attached == Some(true) && self.raycaster.is_none() {
            self.raycaster = Some(Raycaster::new());
        }
    }

    /// Whether the layer is drawn
    pub fn enabled(&self) -> bool {
        self.render_enabled
    }

    /// Start or stop drawing the layer
    ///
    /// Disabling also suspends pointer interaction; enabling resumes it if
    /// it was on.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.render_enabled = enabled;

        let handlers = &mut self.handlers;
        let attached = Self::borrow_viewer_mut(self.viewer.as_ref(), |viewer| {
            handlers.set_render_enabled(enabled, &mut viewer.pointer)
        });

        if attached == Some(true) && self.raycaster.is_none() {
            self.raycaster = Some(Raycaster::new());
        }
    }

    /// Whether a panorama camera is bound
    pub fn is_bound(&self) -> bool {
        self.binding.is_bound()
    }

    /// Currently hovered target
    pub fn hovered(&self) -> Option<&Rc<dyn InteractiveTarget>> {
        self.hover.hovered()
    }

    /// Add nodes, preparing every mesh for the view projection
    pub fn add(&mut self, nodes: impl IntoIterator<Item = SceneNode>) {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Add one node, preparing every mesh for the view projection
    pub fn add_node(&mut self, mut node: SceneNode) {
        if let Some(viewer) = &self.viewer {
            let viewer = Rc::downgrade(viewer);
            node.traverse_mut(&mut |node| prepare_mesh(node, &viewer));
        }
        self.scene.add(node);
    }

    /// Detach every top-level node without disposing it
    pub fn clear(&mut self) -> Vec<SceneNode> {
        self.scene.take_children()
    }

    /// Click the hovered target, if any
    ///
    /// Used when a gaze dwell completes.
    pub fn click(&self) -> bool {
        self.hover.click()
    }

    /// Pointer moved over the render surface
    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        self.on_pointer(event, PointerAction::Over);
    }

    /// Pointer tapped the render surface
    pub fn on_pointer_tap(&mut self, event: &PointerEvent) {
        self.on_pointer(event, PointerAction::Click);
    }

    fn on_pointer(&mut self, event: &PointerEvent, action: PointerAction) {
        if !self.handlers.is_attached() {
            return;
        }

        let Some(canvas) = self.with_viewer(|viewer| viewer.canvas) else {
            return;
        };

        match canvas.to_ndc(event.relative_position()) {
            Some(ndc) => {
                self.raycast(ndc, action);
            }
            None => log::trace!("Ignoring pointer event on an empty canvas"),
        }
    }

    /// A panorama finished loading: bind its camera, target and gaze
    pub fn on_scene_load_complete(&mut self, event: &SceneEvent) {
        let listener = self.listener;
        let Some(context) = self.with_viewer_mut(|viewer| {
            if !viewer.story.on_scene_unload_start.has(listener) {
                viewer.story.on_scene_unload_start.add(listener);
            }

            let target = match viewer.renderer.try_borrow() {
                Ok(renderer) => match renderer.scene_renderer(&event.scene_uid) {
                    Some(scene_renderer) => scene_renderer.target,
                    None => {
                        log::warn!(
                            "No renderer for scene '{}', drawing to the default framebuffer",
                            event.scene_uid
                        );
                        None
                    }
                },
                Err(_) => {
                    log::warn!("Renderer busy while binding scene '{}'", event.scene_uid);
                    None
                }
            };

            (target, Rc::clone(&viewer.camera))
        }) else {
            return;
        };

        let (target, controller) = context;
        let Ok(controller) = controller.try_borrow() else {
            log::warn!("Camera controller busy, scene '{}' not bound", event.scene_uid);
            return;
        };

        self.binding.bind(BoundCamera {
            scene_uid: event.scene_uid.clone(),
            camera: controller.main(),
            target,
            gaze: controller.gaze(),
        });
    }

    /// The current panorama starts unloading: release the binding
    ///
    /// The binding is released whichever scene unloads.
    pub fn on_scene_unload_start(&mut self, event: &SceneEvent) {
        let listener = self.listener;
        self.with_viewer_mut(|viewer| viewer.story.on_scene_unload_start.remove(listener));

        if let Some(bound) = self.binding.unbind() {
            if bound.scene_uid != event.scene_uid {
                log::debug!(
                    "Scene '{}' unloading while bound to '{}'",
                    event.scene_uid,
                    bound.scene_uid
                );
            }
        }
    }

    /// Pick at `ndc` and apply `action` to the first interactive target
    ///
    /// Returns `None` when nothing could be picked (no camera bound, empty
    /// layer, not interactive).
    pub fn raycast(&mut self, ndc: Vec2, action: PointerAction) -> Option<HoverTransition> {
        match self.raycast_with(ndc, action, None) {
            Ok(transition) => Some(transition),
            Err(err) => {
                log::trace!("Raycast skipped: {err}");
                None
            }
        }
    }

    fn raycast_with(
        &mut self,
        ndc: Vec2,
        action: PointerAction,
        camera: Option<&Camera>,
    ) -> Result<HoverTransition, RaycastError> {
        let bound = self.binding.bound().ok_or(RaycastError::CameraUnbound)?;
        if self.scene.is_empty() {
            return Err(RaycastError::NoObjects);
        }
        let raycaster = self.raycaster.ok_or(RaycastError::NoRaycaster)?;
        let (vr, registry) = self
            .with_viewer(|viewer| (viewer.vr, Rc::clone(&viewer.registry)))
            .ok_or(RaycastError::CameraUnbound)?;

        let ray = match camera {
            Some(camera) => raycaster.build_ray(ndc, camera, vr)?,
            None => raycaster.build_ray(ndc, &bound.camera.borrow(), vr)?,
        };

        let found = {
            let hits = raycaster.intersect_objects(&ray, self.scene.children(), true);
            resolve_first_interactive(&hits, registry.as_ref())
        };

        let gaze = Rc::clone(&bound.gaze);
        let vr_gaze = vr.then_some(VrGaze {
            controller: gaze.as_ref(),
            owner: self.listener,
        });

        Ok(self.hover.apply(found, action, vr_gaze))
    }

    /// Draw the layer with the bound camera
    ///
    /// No-op while disabled or unbound.
    pub fn render(&mut self) {
        if !self.render_enabled {
            return;
        }
        let Some(bound) = self.binding.bound() else {
            return;
        };
        let camera = bound.camera.borrow().clone();
        let target = bound.target.clone();

        let Some((vr, renderer)) = self.with_viewer(|viewer| (viewer.vr, Rc::clone(&viewer.renderer))) else {
            return;
        };

        let frame_camera = match renderer.try_borrow_mut() {
            Ok(mut renderer) => {
                renderer.set_vr_enabled(vr);
                renderer.frame_camera(&camera)
            }
            Err(_) => {
                log::warn!("Renderer busy, layer '{}' not drawn", self.scene.name());
                return;
            }
        };

        self.before_render(&frame_camera);

        match renderer.try_borrow_mut() {
            Ok(mut renderer) => {
                renderer.render(&self.scene, &frame_camera, target.as_ref());
                Self::after_render(&mut *renderer);
            }
            Err(_) => log::warn!("Renderer busy, layer '{}' not drawn", self.scene.name()),
        };
    }

    fn before_render(&mut self, camera: &Camera) {
        let Some((vr, controller)) = self.with_viewer(|viewer| (viewer.vr, Rc::clone(&viewer.camera))) else {
            return;
        };
        if !vr {
            return;
        }

        // The main camera takes the head's world orientation
        let (yaw, pitch, roll) = math::rotation_matrix_to_euler(&camera.head().matrix_world()).to_degrees();
        match controller.try_borrow_mut() {
            Ok(mut controller) => controller.look_at(yaw, pitch, roll),
            Err(_) => log::warn!("Camera controller busy, VR orientation not synced"),
        };

        // No pointer moves in VR: hover is polled at the view center
        if self.handlers.is_attached() {
            if let Err(err) = self.raycast_with(Vec2::zeros(), PointerAction::Over, Some(camera)) {
                log::trace!("VR raycast skipped: {err}");
            }
        }
    }

    fn after_render(renderer: &mut dyn Renderer) {
        renderer.set_vr_enabled(false);
    }

    /// Unsubscribe, dispose every node and release all references
    pub fn destroy(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        let Some(viewer) = self.viewer.take() else {
            return;
        };

        let listener = self.listener;
        match viewer.try_borrow_mut() {
            Ok(mut viewer) => {
                viewer.story.on_scene_load_complete.remove(listener);
                viewer.story.on_scene_unload_start.remove(listener);
                self.handlers.release(&mut viewer.pointer);
            }
            Err(_) => log::warn!("Viewer busy, listeners of {listener} left registered"),
        }

        let mut disposed = 0;
        while let Some(mut node) = self.scene.pop() {
            disposed += node.dispose();
        }

        self.raycaster = None;
        self.hover.reset();
        self.binding.unbind();

        log::debug!("Destroyed scene layer '{}' ({disposed} meshes disposed)", self.scene.name());
    }

    fn with_viewer<R>(&self, f: impl FnOnce(&Viewer) -> R) -> Option<R> {
        let viewer = self.viewer.as_ref()?;
        match viewer.try_borrow() {
            Ok(viewer) => Some(f(&viewer)),
            Err(_) => {
                log::warn!("Viewer busy, layer '{}' skipped an update", self.scene.name());
                None
            }
        }
    }

    fn with_viewer_mut<R>(&self, f: impl FnOnce(&mut Viewer) -> R) -> Option<R> {
        Self::borrow_viewer_mut(self.viewer.as_ref(), f)
    }

    fn borrow_viewer_mut<R>(viewer: Option<&SharedViewer>, f: impl FnOnce(&mut Viewer) -> R) -> Option<R> {
        let viewer = viewer?;
        match viewer.try_borrow_mut() {
            Ok(mut viewer) => Some(f(&mut viewer)),
            Err(_) => {
                log::warn!("Viewer busy, layer update skipped");
                None
            }
        }
    }
}

impl Drop for InteractiveScene {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn prepare_mesh(node: &mut SceneNode, viewer: &Weak<RefCell<Viewer>>) {
    let Some(mesh) = node.mesh_data_mut() else {
        return;
    };

    mesh.before_render = Some(UniformHook::new(Weak::clone(viewer)));
    if let Some(material) = &mut mesh.material {
        material.before_compile = Some(ShaderHook::new(Weak::clone(viewer)));
    }
}
