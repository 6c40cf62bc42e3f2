//! # Pointer interaction
//!
//! Everything between a pointer event and a hotspot reacting to it:
//!
//! ```text
//! pointer / VR head pose
//!      ↓  Raycaster::build_ray
//! world Ray
//!      ↓  Raycaster::intersect_objects
//! hits, nearest first
//!      ↓  resolve_first_interactive (TargetRegistry)
//! first interactive target
//!      ↓  HoverState::apply
//! over / out / click, gaze start / stop
//! ```

mod binding;
mod gaze;
mod handlers;
mod hover;
mod ray;
mod raycaster;
mod target;

pub use binding::{BoundCamera, CameraBinding};
pub use gaze::{DwellGaze, GazeController};
pub use handlers::{HandlerBinding, HandlerState};
pub use hover::{resolve_first_interactive, HoverState, HoverTransition, PointerAction, VrGaze};
pub use ray::{Hit, Ray, RaycastError};
pub use raycaster::Raycaster;
pub use target::{Hotspot, HotspotEvent, InteractiveTarget, RegistryError, TargetMap, TargetRegistry, HOTSPOT_3D};
