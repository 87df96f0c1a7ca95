// File: crates/streamline-core/src/surface.rs
// Summary: Drawing-surface contract consumed by the chart renderer.
// Notes:
// - Modelled on an immediate-mode 2D context: one current path, a save/restore
//   stack that covers clip and paint state, fill/stroke with the current style.
// - Backends live outside the core (see streamline-render-skia); `RecordingSurface`
//   is the in-memory backend used by tests and headless hosts.

pub mod recording;

use crate::color::Color;
use crate::geometry::{Rect, Size};

pub use recording::{DrawOp, RecordingSurface};

#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub size: f64,
    pub family: String,
}

impl Font {
    pub fn new(size: f64, family: impl Into<String>) -> Self {
        Self { size, family: family.into() }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(10.0, "monospace")
    }
}

pub trait DrawingSurface {
    /// Pixel extent of the drawable area.
    fn size(&self) -> Size;

    /// Push clip and paint state.
    fn save(&mut self);
    /// Pop the state pushed by the matching `save`.
    fn restore(&mut self);
    /// Intersect the clip with `rect`.
    fn clip_rect(&mut self, rect: Rect);

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: &Font);

    fn fill_rect(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect);

    /// Discard the current path.
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
    fn close_path(&mut self);
    /// Fill the current path with the fill colour.
    fn fill(&mut self);
    /// Stroke the current path with the stroke colour and line width.
    fn stroke(&mut self);

    /// Advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> f64;
    /// Draw `text` with its baseline starting at (`x`, `y`).
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}
