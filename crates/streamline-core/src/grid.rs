// File: crates/streamline-core/src/grid.rs
// Summary: Grid line placement for the scrolling time axis and the value sections.

use crate::geometry::round_px;
use crate::scale::TimeScale;

/// Timestamps of vertical grid lines, newest first, from the last multiple of
/// `millis_per_line` at or before the frame time back to the left edge.
/// Spacing under one pixel yields no lines.
pub fn vertical_line_times(scale: &TimeScale, millis_per_line: f64) -> Vec<f64> {
    if !(millis_per_line.is_finite() && millis_per_line >= scale.millis_per_pixel) {
        return Vec::new();
    }
    let oldest = scale.oldest_valid_time();
    let newest = scale.now - scale.now.rem_euclid(millis_per_line);
    if !(newest >= oldest) {
        return Vec::new();
    }
    let count = ((newest - oldest) / millis_per_line).floor() as usize + 1;
    (0..count).map(|i| newest - i as f64 * millis_per_line).collect()
}

/// Y positions of the interior horizontal lines splitting `height` into `sections` bands.
pub fn horizontal_line_ys(height: f64, sections: u32) -> Vec<f64> {
    (1..sections)
        .map(|v| round_px(v as f64 * height / sections as f64))
        .collect()
}

/// Offset applied to grid coordinates when sharp 1px lines are requested.
#[inline]
pub fn sharp_offset(sharp: bool) -> f64 {
    if sharp { -0.5 } else { 0.0 }
}

