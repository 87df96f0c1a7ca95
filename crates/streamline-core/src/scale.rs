// File: crates/streamline-core/src/scale.rs
// Summary: Time (X) and value (Y) mappings, plus the smoothed visible value range.

use serde::{Deserialize, Serialize};

use crate::geometry::round_px;

/// Inclusive value window, `min..=max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// Right-anchored horizontal scale: the newest instant sits on the right edge.
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    /// Frame time, truncated to a whole number of pixels.
    pub now: f64,
    pub millis_per_pixel: f64,
    pub width: f64,
}

impl TimeScale {
    /// Truncates `now` down to a multiple of `millis_per_pixel`, so the chart
    /// advances in whole-pixel steps.
    pub fn new(now: f64, millis_per_pixel: f64, width: f64) -> Self {
        let now = now - now.rem_euclid(millis_per_pixel);
        Self { now, millis_per_pixel, width }
    }

    #[inline]
    pub fn time_to_x(&self, t: f64) -> f64 {
        round_px(self.width - (self.now - t) / self.millis_per_pixel)
    }

    #[inline]
    pub fn x_to_time(&self, x: f64) -> f64 {
        self.now - (self.width - x) * self.millis_per_pixel
    }

    /// Left edge of the visible window.
    pub fn oldest_valid_time(&self) -> f64 {
        self.now - self.width * self.millis_per_pixel
    }
}

/// Smoothed value window currently mapped onto the surface height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleRange {
    pub range: f64,
    pub min: f64,
}

impl Default for VisibleRange {
    fn default() -> Self {
        Self { range: 1.0, min: 0.0 }
    }
}

impl VisibleRange {
    /// Move a `smoothing` fraction of the way towards `target`.
    /// Non-finite targets leave the window untouched.
    pub fn step_towards(&mut self, target: ValueRange, smoothing: f64) {
        if !target.is_finite() {
            return;
        }
        self.range += smoothing * (target.span() - self.range);
        self.min += smoothing * (target.min - self.min);
    }

    /// Map a value to a y pixel (0 at the top). A collapsed or non-finite
    /// window maps everything to the bottom edge.
    #[inline]
    pub fn value_to_y(&self, value: f64, height: f64) -> f64 {
        if self.range == 0.0 || !self.range.is_finite() || !self.min.is_finite() {
            return height;
        }
        let y = height - round_px((value - self.min) / self.range * height);
        if y.is_finite() { y } else { height }
    }
}
