//! Pointer/touch translation into simulation space
//!
//! The canvas is laid out at some CSS size while the simulation runs in a
//! fixed logical space. Positions arrive relative to the canvas' top-left
//! corner in display pixels.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical (simulation) canvas size
    pub logical: Vec2,
    /// Size the canvas is currently displayed at
    pub display: Vec2,
}

impl Viewport {
    pub fn new(logical: Vec2) -> Self {
        Self {
            logical,
            display: logical,
        }
    }

    /// Track a layout change of the displayed canvas
    pub fn resize(&mut self, display_width: f32, display_height: f32) {
        self.display = Vec2::new(display_width, display_height);
    }

    /// Display-to-logical ratio. Width drives both axes since the canvas
    /// keeps its aspect ratio.
    pub fn scale(&self) -> Option<f32> {
        let scale = self.logical.x / self.display.x;
        (scale.is_finite() && scale > 0.0).then_some(scale)
    }

    /// Map a canvas-relative display position into simulation space.
    /// Returns `None` for missing/garbage input so callers can no-op.
    pub fn to_logical(&self, x: f32, y: f32) -> Option<Vec2> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let scale = self.scale()?;
        Some(Vec2::new(x, y) * scale)
    }

    /// Horizontal-only mapping (paddle control)
    pub fn to_logical_x(&self, x: f32) -> Option<f32> {
        if !x.is_finite() {
            return None;
        }
        Some(x * self.scale()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_when_display_matches() {
        let vp = Viewport::new(Vec2::new(400.0, 600.0));
        assert_eq!(vp.to_logical(120.0, 300.0), Some(Vec2::new(120.0, 300.0)));
    }

    #[test]
    fn test_scaled_down_canvas() {
        let mut vp = Viewport::new(Vec2::new(400.0, 600.0));
        vp.resize(200.0, 300.0);
        assert_eq!(vp.to_logical(50.0, 100.0), Some(Vec2::new(100.0, 200.0)));
        assert_eq!(vp.to_logical_x(100.0), Some(200.0));
    }

    #[test]
    fn test_invalid_input_maps_to_none() {
        let mut vp = Viewport::new(Vec2::new(400.0, 600.0));
        assert_eq!(vp.to_logical(f32::NAN, 10.0), None);
        assert_eq!(vp.to_logical_x(f32::INFINITY), None);
        vp.resize(0.0, 0.0);
        assert_eq!(vp.to_logical(10.0, 10.0), None);
    }
}
