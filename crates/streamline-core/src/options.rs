// File: crates/streamline-core/src/options.rs
// Summary: Chart configuration with defaults, JSON loading and validation.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ChartError;
use crate::format::TooltipEntry;
use crate::scale::ValueRange;
use crate::types::Timestamp;

pub type ValueFormatter = Rc<dyn Fn(f64, usize) -> String>;
pub type TimestampFormatter = Rc<dyn Fn(Timestamp) -> String>;
pub type RangeTransform = Rc<dyn Fn(ValueRange) -> ValueRange>;
pub type TooltipFormatter = Rc<dyn Fn(Timestamp, &[TooltipEntry]) -> String>;

/// How consecutive points of a series are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Bezier,
    Linear,
    Step,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Background colour of the chart.
    pub fill_style: Color,
    pub stroke_style: Color,
    pub line_width: f64,
    /// Time between vertical grid lines; 0 disables them.
    pub millis_per_line: f64,
    /// Number of bands marked out by horizontal grid lines.
    pub vertical_sections: u32,
    /// Offset lines by half a pixel so 1px strokes stay crisp.
    pub sharp_lines: bool,
    pub border_visible: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            fill_style: Color::BLACK,
            stroke_style: Color::rgb(0x77, 0x77, 0x77),
            line_width: 1.0,
            millis_per_line: 1000.0,
            vertical_sections: 2,
            sharp_lines: false,
            border_visible: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOptions {
    pub disabled: bool,
    pub fill_style: Color,
    pub font_size: f64,
    pub font_family: String,
    /// Decimal places handed to the value formatters.
    pub precision: usize,
    pub show_intermediate_labels: bool,
    /// Draw intermediate labels on the right (with min/max) instead of the left.
    pub intermediate_label_same_axis: bool,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            disabled: false,
            fill_style: Color::WHITE,
            font_size: 10.0,
            font_family: "monospace".to_string(),
            precision: 2,
            show_intermediate_labels: false,
            intermediate_label_same_axis: true,
        }
    }
}

/// Fixed horizontal reference line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizontalLine {
    pub value: f64,
    pub color: Color,
    pub line_width: f64,
}

impl Default for HorizontalLine {
    fn default() -> Self {
        Self { value: 0.0, color: Color::WHITE, line_width: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipLine {
    pub line_width: f64,
    pub stroke_style: Color,
}

impl Default for TooltipLine {
    fn default() -> Self {
        Self { line_width: 1.0, stroke_style: Color::rgb(0xbb, 0xbb, 0xbb) }
    }
}

/// Host callbacks. Not part of the serialised configuration.
#[derive(Clone, Default)]
pub struct ChartCallbacks {
    /// Rewrites the target value range before smoothing.
    pub y_range: Option<RangeTransform>,
    pub y_min_formatter: Option<ValueFormatter>,
    pub y_max_formatter: Option<ValueFormatter>,
    pub y_intermediate_formatter: Option<ValueFormatter>,
    /// Enables timestamp labels under the vertical grid lines.
    pub timestamp_formatter: Option<TimestampFormatter>,
    pub tooltip_formatter: Option<TooltipFormatter>,
}

impl fmt::Debug for ChartCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartCallbacks")
            .field("y_range", &self.y_range.is_some())
            .field("y_min_formatter", &self.y_min_formatter.is_some())
            .field("y_max_formatter", &self.y_max_formatter.is_some())
            .field("y_intermediate_formatter", &self.y_intermediate_formatter.is_some())
            .field("timestamp_formatter", &self.timestamp_formatter.is_some())
            .field("tooltip_formatter", &self.tooltip_formatter.is_some())
            .finish()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Horizontal time scale; larger values scroll slower.
    pub millis_per_pixel: f64,
    /// Frame-rate ceiling; 0 renders every scheduled frame.
    pub limit_fps: u32,
    /// Fixed upper bound; `None` follows the data.
    pub max_value: Option<f64>,
    /// Fixed lower bound; `None` follows the data.
    pub min_value: Option<f64>,
    /// Headroom above the data, e.g. 1.1 for 10%.
    pub max_value_scale: f64,
    /// Footroom below the data, e.g. 1.1 for 10%.
    pub min_value_scale: f64,
    /// Fraction of the remaining distance the visible range moves per frame.
    pub scale_smoothing: f64,
    /// Retention floor handed to `TimeSeries::drop_old_data`.
    pub max_data_set_length: usize,
    pub interpolation: Interpolation,
    pub grid: GridOptions,
    pub labels: LabelOptions,
    pub tooltip: bool,
    pub tooltip_line: TooltipLine,
    pub horizontal_lines: Vec<HorizontalLine>,
    /// Use the newest sample's timestamp as "now" instead of the wall clock.
    pub non_realtime_data: bool,
    /// Below 1, pins the right edge to this fraction of the data's time span.
    pub display_data_from_percentile: f64,
    /// Hosts resize the drawing surface with its container when set.
    pub responsive: bool,
    /// Period of the automatic `reset_bounds` sweep in ms; 0 disables it.
    pub reset_bounds_interval: u64,
    #[serde(skip)]
    pub callbacks: ChartCallbacks,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            millis_per_pixel: 20.0,
            limit_fps: 0,
            max_value: None,
            min_value: None,
            max_value_scale: 1.0,
            min_value_scale: 1.0,
            scale_smoothing: 0.125,
            max_data_set_length: 2,
            interpolation: Interpolation::Bezier,
            grid: GridOptions::default(),
            labels: LabelOptions::default(),
            tooltip: false,
            tooltip_line: TooltipLine::default(),
            horizontal_lines: Vec::new(),
            non_realtime_data: false,
            display_data_from_percentile: 1.0,
            responsive: false,
            reset_bounds_interval: 3000,
            callbacks: ChartCallbacks::default(),
        }
    }
}

impl ChartOptions {
    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ChartError> {
        let opts: ChartOptions = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if !(self.millis_per_pixel.is_finite() && self.millis_per_pixel > 0.0) {
            return Err(ChartError::option("millis_per_pixel", "must be a positive number"));
        }
        if !(self.scale_smoothing > 0.0 && self.scale_smoothing <= 1.0) {
            return Err(ChartError::option("scale_smoothing", "must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.display_data_from_percentile) {
            return Err(ChartError::option("display_data_from_percentile", "must be in [0, 1]"));
        }
        for (name, v) in [("max_value_scale", self.max_value_scale), ("min_value_scale", self.min_value_scale)] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(ChartError::option(name, "must be a finite, non-negative number"));
            }
        }
        for (name, v) in [("max_value", self.max_value), ("min_value", self.min_value)] {
            if v.is_some_and(|v| !v.is_finite()) {
                return Err(ChartError::option(name, "must be finite"));
            }
        }
        if !(self.labels.font_size.is_finite() && self.labels.font_size > 0.0) {
            return Err(ChartError::option("labels.font_size", "must be positive"));
        }
        if !(self.grid.millis_per_line.is_finite() && self.grid.millis_per_line >= 0.0) {
            return Err(ChartError::option("grid.millis_per_line", "must be zero or positive"));
        }
        if self.grid.millis_per_line > 0.0 && self.grid.millis_per_line < self.millis_per_pixel {
            return Err(ChartError::option("grid.millis_per_line", "must span at least one pixel"));
        }
        Ok(())
    }

    pub fn with_y_range(mut self, f: impl Fn(ValueRange) -> ValueRange + 'static) -> Self {
        self.callbacks.y_range = Some(Rc::new(f));
        self
    }

    pub fn with_timestamp_formatter(mut self, f: impl Fn(Timestamp) -> String + 'static) -> Self {
        self.callbacks.timestamp_formatter = Some(Rc::new(f));
        self
    }

    pub fn with_value_formatters(
        mut self,
        min: impl Fn(f64, usize) -> String + 'static,
        max: impl Fn(f64, usize) -> String + 'static,
    ) -> Self {
        self.callbacks.y_min_formatter = Some(Rc::new(min));
        self.callbacks.y_max_formatter = Some(Rc::new(max));
        self
    }

    pub fn with_intermediate_formatter(mut self, f: impl Fn(f64, usize) -> String + 'static) -> Self {
        self.callbacks.y_intermediate_formatter = Some(Rc::new(f));
        self
    }

    pub fn with_tooltip_formatter(mut self, f: impl Fn(Timestamp, &[TooltipEntry]) -> String + 'static) -> Self {
        self.callbacks.tooltip_formatter = Some(Rc::new(f));
        self
    }
}
