// File: crates/streamline-render-skia/src/surface.rs
// Summary: `DrawingSurface` over a Skia CPU raster surface, with PNG / RGBA export.
// Notes:
// - Paint state (colours, width, font) is tracked here and pushed alongside
//   Skia's own save/restore so clip and style unwind together.
// - Colours are straight RGBA in the core and converted per call.

use std::path::Path;

use anyhow::{Context, Result};
use skia_safe as skia;
use streamline_core::{Color, DrawingSurface, Font, Rect, Size};
use tracing::debug;

use crate::error::RenderError;
use crate::text::TextShaper;

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

fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn to_skia_rect(r: Rect) -> skia::Rect {
    skia::Rect::from_xywh(r.left as f32, r.top as f32, r.width as f32, r.height as f32)
}

fn new_raster(width: u32, height: u32) -> Result<skia::Surface, RenderError> {
    let (w, h) = (i32::try_from(width), i32::try_from(height));
    match (w, h) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => {
            skia::surfaces::raster_n32_premul((w, h)).ok_or(RenderError::Surface { width, height })
        }
        _ => Err(RenderError::Surface { width, height }),
    }
}

pub struct SkiaSurface {
    surface: skia::Surface,
    size: Size,
    state: PaintState,
    stack: Vec<PaintState>,
    path: skia::Path,
    shaper: TextShaper,
    anti_alias: bool,
}

impl SkiaSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let surface = new_raster(width, height)?;
        debug!(width, height, "raster surface created");
        Ok(Self {
            surface,
            size: Size::new(width, height),
            state: PaintState::default(),
            stack: Vec::new(),
            path: skia::Path::new(),
            shaper: TextShaper::new(),
            anti_alias: true,
        })
    }

    /// Turn anti-aliasing off for pixel-exact output.
    pub fn with_anti_alias(mut self, on: bool) -> Self {
        self.anti_alias = on;
        self
    }

    /// Reallocate the backing store. Contents are lost; a no-op when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if self.size == Size::new(width, height) {
            return Ok(());
        }
        self.surface = new_raster(width, height)?;
        self.size = Size::new(width, height);
        self.stack.clear();
        self.state = PaintState::default();
        debug!(width, height, "raster surface resized");
        Ok(())
    }

    pub fn to_png_bytes(&mut self) -> Result<Vec<u8>, RenderError> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image.encode_to_data(skia::EncodedImageFormat::PNG).ok_or(RenderError::Encode)?;
        Ok(data.as_bytes().to_vec())
    }

    /// Encode the current frame and write it to `path`, creating parent directories.
    pub fn write_png(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_png_bytes()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create '{}'", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("failed to write '{}'", path.display()))?;
        Ok(())
    }

    /// Unpremultiplied RGBA8, rows packed at `width * 4` bytes.
    pub fn to_rgba8(&mut self) -> Result<Vec<u8>, RenderError> {
        let Size { width, height } = self.size;
        let info = skia::ImageInfo::new(
            (width as i32, height as i32),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let row_bytes = width as usize * 4;
        let mut pixels = vec![0u8; row_bytes * height as usize];
        if !self.surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(RenderError::ReadPixels);
        }
        Ok(pixels)
    }

    fn paint(&self, color: Color, style: skia::paint::Style) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(self.anti_alias);
        paint.set_style(style);
        paint.set_color(to_skia(color));
        if style == skia::paint::Style::Stroke {
            paint.set_stroke_width(self.state.line_width as f32);
        }
        paint
    }
}

impl DrawingSurface for SkiaSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
        self.surface.canvas().save();
    }

    fn restore(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.state = prev;
            self.surface.canvas().restore();
        }
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.surface.canvas().clip_rect(to_skia_rect(rect), skia::ClipOp::Intersect, false);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_font(&mut self, font: &Font) {
        self.state.font = font.clone();
    }

    fn fill_rect(&mut self, rect: Rect) {
        let paint = self.paint(self.state.fill, skia::paint::Style::Fill);
        self.surface.canvas().draw_rect(to_skia_rect(rect), &paint);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        let paint = self.paint(self.state.stroke, skia::paint::Style::Stroke);
        self.surface.canvas().draw_rect(to_skia_rect(rect), &paint);
    }

    fn begin_path(&mut self) {
        self.path = skia::Path::new();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to((x as f32, y as f32));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to((x as f32, y as f32));
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.path
            .cubic_to((cp1x as f32, cp1y as f32), (cp2x as f32, cp2y as f32), (x as f32, y as f32));
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn fill(&mut self) {
        let paint = self.paint(self.state.fill, skia::paint::Style::Fill);
        self.surface.canvas().draw_path(&self.path, &paint);
    }

    fn stroke(&mut self) {
        let paint = self.paint(self.state.stroke, skia::paint::Style::Stroke);
        self.surface.canvas().draw_path(&self.path, &paint);
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        let font = &self.state.font;
        self.shaper.measure_width(text, font.size as f32, &font.family) as f64
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let font = &self.state.font;
        let canvas = self.surface.canvas();
        self.shaper.draw_left(canvas, text, x as f32, y as f32, font.size as f32, &font.family, to_skia(self.state.fill));
    }
}
