//! Camera binding of a scene layer
//!
//! A layer can only pick and draw once a panorama has finished loading and
//! handed it a camera, a render target and a gaze controller. All three are
//! bound together and released together.

use std::rc::Rc;

use crate::interaction::GazeController;
use crate::render::{RenderTarget, SharedCamera};

/// References valid while a panorama is loaded
#[derive(Clone)]
pub struct BoundCamera {
    /// Panorama that provided the binding
    pub scene_uid: String,
    /// Camera to pick and draw with
    pub camera: SharedCamera,
    /// Draw destination; `None` is the default framebuffer
    pub target: Option<RenderTarget>,
    /// Gaze controller to drive in VR
    pub gaze: Rc<dyn GazeController>,
}

/// Whether a layer currently has a camera
#[derive(Clone, Default)]
pub enum CameraBinding {
    /// Nothing loaded: picking and drawing are no-ops
    #[default]
    Unbound,
    /// Loaded
    Bound(BoundCamera),
}

impl CameraBinding {
    /// Bind, replacing any previous binding
    pub fn bind(&mut self, bound: BoundCamera) {
        log::debug!("Camera bound for scene '{}'", bound.scene_uid);
        *self = Self::Bound(bound);
    }

    /// Release the binding, returning it if there was one
    pub fn unbind(&mut self) -> Option<BoundCamera> {
        match std::mem::take(self) {
            Self::Bound(bound) => {
                log::debug!("Camera unbound from scene '{}'", bound.scene_uid);
                Some(bound)
            }
            Self::Unbound => None,
        }
    }

    /// Current binding
    pub fn bound(&self) -> Option<&BoundCamera> {
        match self {
            Self::Bound(bound) => Some(bound),
            Self::Unbound => None,
        }
    }

    /// Whether a camera is bound
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }
}
