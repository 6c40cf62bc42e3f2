//! Pointer state for picking operations
//!
//! Converts pointer positions into Normalized Device Coordinates (NDC) for
//! ray casting.

use crate::events::Signal;
use crate::foundation::math::Vec2;

/// Pointer listener registries
///
/// The host dispatches every pointer move to the listeners of `on_move` and
/// every tap/click to the listeners of `on_tap`.
#[derive(Debug, Default)]
pub struct Pointer {
    /// Pointer moved over the render surface
    pub on_move: Signal,
    /// Pointer tapped or clicked on the render surface
    pub on_tap: Signal,
}

/// Raw pointer event in client (window) pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Client X position (pixels from window left)
    pub client_x: f64,
    /// Client Y position (pixels from window top)
    pub client_y: f64,
    /// Left edge of the render surface in client coordinates
    pub surface_left: f64,
    /// Top edge of the render surface in client coordinates
    pub surface_top: f64,
}

impl PointerEvent {
    /// Event on a surface anchored at the client origin
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            client_x: x,
            client_y: y,
            surface_left: 0.0,
            surface_top: 0.0,
        }
    }

    /// Position relative to the render surface's top-left corner
    pub fn relative_position(&self) -> (f64, f64) {
        (self.client_x - self.surface_left, self.client_y - self.surface_top)
    }
}

/// Render surface size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    /// Surface width in pixels
    pub pixel_width: u32,
    /// Surface height in pixels
    pub pixel_height: u32,
}

impl Canvas {
    /// Create a canvas of the given size
    pub fn new(pixel_width: u32, pixel_height: u32) -> Self {
        Self { pixel_width, pixel_height }
    }

    /// Convert surface-relative pixels to NDC
    ///
    /// NDC range: [-1, 1] with X: -1 = left, +1 = right and
    /// Y: -1 = bottom, +1 = top (Y is flipped from pixel space).
    ///
    /// Returns `None` for a zero-sized surface.
    pub fn to_ndc(&self, position: (f64, f64)) -> Option<Vec2> {
        if self.pixel_width == 0 || self.pixel_height == 0 {
            return None;
        }

        let xn = 2.0 * position.0 / f64::from(self.pixel_width) - 1.0;
        let yn = 2.0 * position.1 / f64::from(self.pixel_height) - 1.0;
        #[allow(clippy::cast_possible_truncation)]
        Some(Vec2::new(xn as f32, -yn as f32))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}
