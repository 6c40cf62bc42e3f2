//! # Rendering interfaces
//!
//! The layer does not draw anything itself. It drives a [`Renderer`]
//! backend, picks through [`Camera`]s and prepares meshes so that the
//! current [`View`] projection applies to them.
//!
//! ## Frame order
//!
//! ```text
//! set VR flag → frame camera → before-render (VR sync, gaze raycast)
//!             → draw → after-render (VR flag off)
//! ```

pub mod camera;
pub mod hooks;
pub mod renderer;
pub mod view;

pub use camera::{ArrayCamera, Camera, PerspectiveCamera, SharedCamera};
pub use hooks::{ShaderHook, UniformHook};
pub use renderer::{RenderTarget, Renderer, SceneRenderer};
pub use view::{ShaderProgram, ShaderSource, UniformMap, UniformValue, View};
