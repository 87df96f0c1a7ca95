// File: crates/streamline-render-skia/src/error.rs
// Summary: Failures of the raster backend (surface allocation, encoding, read-back).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create a {width}x{height} raster surface")]
    Surface { width: u32, height: u32 },

    #[error("PNG encoding failed")]
    Encode,

    #[error("reading back surface pixels failed")]
    ReadPixels,
}
