// File: crates/streamline-core/src/lib.rs
// Summary: Core library entry point; exports the series store, streaming chart and surface contract.

pub mod chart;
pub mod color;
pub mod error;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod options;
mod paint;
pub mod scale;
pub mod schedule;
pub mod series;
pub mod surface;
pub mod theme;
pub mod types;

pub use chart::{SeriesBinding, SeriesStyle, StreamChart};
pub use color::Color;
pub use error::ChartError;
pub use format::{time_formatter, TooltipEntry};
pub use geometry::{Rect, Size};
pub use options::{ChartCallbacks, ChartOptions, GridOptions, HorizontalLine, Interpolation, LabelOptions, TooltipLine};
pub use scale::{TimeScale, ValueRange, VisibleRange};
pub use schedule::{FrameScheduler, FrameToken, IntervalScheduler};
pub use series::TimeSeries;
pub use surface::{DrawOp, DrawingSurface, Font, RecordingSurface};
pub use theme::Theme;
pub use types::{Sample, Timestamp};
