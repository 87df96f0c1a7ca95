// File: crates/streamline-core/src/surface/recording.rs
// Summary: In-memory drawing surface that records every call as a `DrawOp`.
// Text metrics are deterministic (0.6 × font size per char), so tests don't depend on fonts.

use crate::color::Color;
use crate::geometry::{Rect, Size};
use crate::surface::{DrawingSurface, Font};
use crate::types::{HEIGHT, WIDTH};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    ClipRect(Rect),
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, width: f64 },
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    BezierTo { cp1: (f64, f64), cp2: (f64, f64), to: (f64, f64) },
    ClosePath,
    Fill { color: Color },
    Stroke { color: Color, width: f64 },
    Text { text: String, x: f64, y: f64, color: Color },
}

#[derive(Clone, Debug)]
struct PaintState {
    fill: Color,
    stroke: Color,
    line_width: f64,
    font: Font,
}

impl Default for PaintState {
    fn default() -> Self {
        Self { fill: Color::BLACK, stroke: Color::BLACK, line_width: 1.0, font: Font::default() }
    }
}

#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
    state: PaintState,
    stack: Vec<PaintState>,
    non_finite: usize,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            ops: Vec::new(),
            state: PaintState::default(),
            stack: Vec::new(),
            non_finite: 0,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded ops (paint state and save depth are kept).
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = Size::new(width, height);
    }

    /// Number of `save`s not yet matched by a `restore`.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// How many coordinates handed to the surface were NaN or infinite.
    pub fn non_finite_count(&self) -> usize {
        self.non_finite
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn strokes(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Stroke { .. })).count()
    }

    pub fn fills(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Fill { .. })).count()
    }

    fn check(&mut self, coords: &[f64]) {
        self.non_finite += coords.iter().filter(|v| !v.is_finite()).count();
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        // Unbalanced restore is ignored, same as a 2D canvas.
        if let Some(prev) = self.stack.pop() {
            self.state = prev;
        }
        self.ops.push(DrawOp::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.check(&[rect.left, rect.top, rect.width, rect.height]);
        self.ops.push(DrawOp::ClipRect(rect));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.check(&[width]);
        self.state.line_width = width;
    }

    fn set_font(&mut self, font: &Font) {
        self.state.font = font.clone();
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.check(&[rect.left, rect.top, rect.width, rect.height]);
        self.ops.push(DrawOp::FillRect { rect, color: self.state.fill });
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.check(&[rect.left, rect.top, rect.width, rect.height]);
        self.ops.push(DrawOp::StrokeRect { rect, color: self.state.stroke, width: self.state.line_width });
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.check(&[x, y]);
        self.ops.push(DrawOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.check(&[x, y]);
        self.ops.push(DrawOp::LineTo(x, y));
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.check(&[cp1x, cp1y, cp2x, cp2y, x, y]);
        self.ops.push(DrawOp::BezierTo { cp1: (cp1x, cp1y), cp2: (cp2x, cp2y), to: (x, y) });
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill { color: self.state.fill });
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke { color: self.state.stroke, width: self.state.line_width });
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.state.font.size * 0.6
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.check(&[x, y]);
        self.ops.push(DrawOp::Text { text: text.to_string(), x, y, color: self.state.fill });
    }
}
