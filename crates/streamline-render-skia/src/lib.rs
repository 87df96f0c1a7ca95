// File: crates/streamline-render-skia/src/lib.rs
// Summary: Skia raster backend for `streamline-core`: a `DrawingSurface` plus one-shot PNG helpers.

pub mod error;
pub mod surface;
pub mod text;

use std::path::Path;

use anyhow::Result;
use streamline_core::{StreamChart, Timestamp};

pub use error::RenderError;
pub use surface::SkiaSurface;
pub use text::TextShaper;

/// Paint one frame of `chart` at `now` into a fresh raster and encode it as PNG.
pub fn render_png_bytes(chart: &mut StreamChart, width: u32, height: u32, now: Timestamp) -> Result<Vec<u8>> {
    let mut surface = SkiaSurface::new(width, height)?;
    chart.render(&mut surface, now);
    Ok(surface.to_png_bytes()?)
}

/// Paint one frame of `chart` at `now` and write it to `output_png_path`.
pub fn render_to_png(
    chart: &mut StreamChart,
    width: u32,
    height: u32,
    now: Timestamp,
    output_png_path: impl AsRef<Path>,
) -> Result<()> {
    let mut surface = SkiaSurface::new(width, height)?;
    chart.render(&mut surface, now);
    surface.write_png(output_png_path)
}
