//! Renderer interface consumed by scene layers

use crate::render::camera::Camera;
use crate::scene::SceneGraph;

/// Offscreen surface a scene can be drawn into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    /// Backend identifier
    pub id: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl RenderTarget {
    /// Create a target description
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }
}

/// Per-panorama renderer state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneRenderer {
    /// Where layers of this panorama draw; `None` is the default framebuffer
    pub target: Option<RenderTarget>,
}

/// Rendering backend
pub trait Renderer {
    /// Whether the next draws are stereo VR draws
    fn vr_enabled(&self) -> bool;

    /// Switch stereo VR drawing on or off
    fn set_vr_enabled(&mut self, enabled: bool);

    /// Renderer state of a loaded panorama
    fn scene_renderer(&self, scene_uid: &str) -> Option<SceneRenderer>;

    /// Camera the next draw will actually use
    ///
    /// A VR backend replaces the main camera by its per-eye array camera
    /// while VR is enabled.
    fn frame_camera(&self, camera: &Camera) -> Camera {
        camera.clone()
    }

    /// Draw a scene; `None` targets the default framebuffer
    fn render(&mut self, scene: &SceneGraph, camera: &Camera, target: Option<&RenderTarget>);
}
