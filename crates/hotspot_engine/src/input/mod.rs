//! Pointer input
//!
//! Pointer move/tap registries and the screen → NDC conversion used by
//! picking.

pub mod pointer;

pub use pointer::{Canvas, Pointer, PointerEvent};
