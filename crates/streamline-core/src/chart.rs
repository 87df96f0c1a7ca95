// File: crates/streamline-core/src/chart.rs
// Summary: Streaming chart: series bindings, frame scheduling, smoothed auto-scaling.
// Painting itself lives in `paint.rs`; this file owns the state it reads.

use tracing::{debug, trace, warn};

use crate::color::Color;
use crate::error::ChartError;
use crate::options::ChartOptions;
use crate::paint::{self, FrameContext};
use crate::scale::{TimeScale, ValueRange, VisibleRange};
use crate::schedule::{FrameScheduler, FrameToken};
use crate::series::TimeSeries;
use crate::surface::DrawingSurface;
use crate::types::Timestamp;

/// Per-chart presentation of one bound series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesStyle {
    pub stroke: Color,
    /// Area under the line; `None` draws the line only.
    pub fill: Option<Color>,
    pub line_width: f64,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self { stroke: Color::WHITE, fill: None, line_width: 1.0 }
    }
}

impl SeriesStyle {
    pub fn stroke(color: Color) -> Self {
        Self { stroke: color, ..Self::default() }
    }
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }
    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

#[derive(Clone, Debug)]
pub struct SeriesBinding {
    pub series: TimeSeries,
    pub style: SeriesStyle,
}

/// Periodic `reset_bounds` sweep, armed while at least one series is bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BoundsTimer {
    Disarmed,
    /// `next_due` is set by the first frame after arming.
    Armed { next_due: Option<Timestamp> },
}

#[derive(Debug)]
pub struct StreamChart {
    options: ChartOptions,
    bindings: Vec<SeriesBinding>,
    visible: VisibleRange,
    value_range: Option<ValueRange>,
    pending_frame: Option<FrameToken>,
    delay_ms: i64,
    last_render: Option<Timestamp>,
    bounds_timer: BoundsTimer,
    pointer: Option<(f64, f64)>,
}

impl StreamChart {
    pub fn new(options: ChartOptions) -> Self {
        Self {
            options,
            bindings: Vec::new(),
            visible: VisibleRange::default(),
            value_range: None,
            pending_frame: None,
            delay_ms: 0,
            last_render: None,
            bounds_timer: BoundsTimer::Disarmed,
            pointer: None,
        }
    }

    /// Like [`new`](Self::new) but rejects invalid options up front.
    pub fn try_new(options: ChartOptions) -> Result<Self, ChartError> {
        options.validate()?;
        Ok(Self::new(options))
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    /// Bindings in render order; the last one is drawn on top.
    pub fn bindings(&self) -> &[SeriesBinding] {
        &self.bindings
    }

    pub fn series_count(&self) -> usize {
        self.bindings.len()
    }

    // ---- series set -------------------------------------------------------

    /// Bind `series` on top of the existing ones. Binding the same store twice is allowed.
    pub fn add_series(&mut self, series: &TimeSeries, style: SeriesStyle) {
        let was_empty = self.bindings.is_empty();
        self.bindings.push(SeriesBinding { series: series.clone(), style });
        debug!(count = self.bindings.len(), "series added");
        self.on_series_set_changed(was_empty);
    }

    /// Unbind the first binding of `series`. Returns false when it was not bound.
    pub fn remove_series(&mut self, series: &TimeSeries) -> bool {
        let Some(idx) = self.position(series) else {
            return false;
        };
        let was_empty = self.bindings.is_empty();
        self.bindings.remove(idx);
        debug!(count = self.bindings.len(), "series removed");
        self.on_series_set_changed(was_empty);
        true
    }

    /// Move the first binding of `series` to the top of the render order.
    pub fn bring_to_front(&mut self, series: &TimeSeries) -> bool {
        let Some(idx) = self.position(series) else {
            return false;
        };
        let binding = self.bindings.remove(idx);
        self.bindings.push(binding);
        debug!(from = idx, "series brought to front");
        true
    }

    pub fn series_style(&self, series: &TimeSeries) -> Option<&SeriesStyle> {
        self.position(series).map(|i| &self.bindings[i].style)
    }

    pub fn series_style_mut(&mut self, series: &TimeSeries) -> Option<&mut SeriesStyle> {
        self.position(series).map(move |i| &mut self.bindings[i].style)
    }

    fn position(&self, series: &TimeSeries) -> Option<usize> {
        self.bindings.iter().position(|b| b.series.same_store(series))
    }

    /// Arms the bounds-reset timer on empty -> non-empty, disarms it on the way back.
    fn on_series_set_changed(&mut self, was_empty: bool) {
        match (was_empty, self.bindings.is_empty()) {
            (true, false) if self.options.reset_bounds_interval > 0 => {
                self.bounds_timer = BoundsTimer::Armed { next_due: None };
                debug!(interval_ms = self.options.reset_bounds_interval, "bounds reset timer armed");
            }
            (false, true) => {
                if self.bounds_timer != BoundsTimer::Disarmed {
                    debug!("bounds reset timer disarmed");
                }
                self.bounds_timer = BoundsTimer::Disarmed;
            }
            _ => {}
        }
    }

    pub fn bounds_reset_armed(&self) -> bool {
        matches!(self.bounds_timer, BoundsTimer::Armed { .. })
    }

    fn tick_bounds_timer(&mut self, now: Timestamp) {
        let interval = self.options.reset_bounds_interval as i64;
        let BoundsTimer::Armed { next_due } = &mut self.bounds_timer else {
            return;
        };
        if interval <= 0 {
            return;
        }
        match *next_due {
            None => *next_due = Some(now + interval),
            Some(due) if now >= due => {
                for b in &self.bindings {
                    b.series.reset_bounds();
                }
                *next_due = Some(now + interval);
                trace!("series bounds reset");
            }
            Some(_) => {}
        }
    }

    // ---- animation loop ---------------------------------------------------

    pub fn is_running(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending_frame
    }

    /// Request the first frame. No-op while already running.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.pending_frame.is_some() {
            return;
        }
        self.pending_frame = Some(scheduler.request_frame());
        debug!(delay_ms = self.delay_ms, "chart started");
    }

    /// Cancel the pending frame. No-op while stopped.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(token) = self.pending_frame.take() {
            scheduler.cancel_frame(token);
            self.last_render = None;
            debug!("chart stopped");
        }
    }

    /// Render `delay_ms` behind real time, hiding the newest edge of the data, and start.
    pub fn stream_to(&mut self, delay_ms: i64, scheduler: &mut dyn FrameScheduler) {
        self.delay_ms = delay_ms.max(0);
        self.start(scheduler);
    }

    /// Deliver a scheduled frame. Returns true when something was painted.
    ///
    /// Tokens that are not the pending one (cancelled, or from before a restart)
    /// are ignored. Otherwise the frame is painted unless `limit_fps` says it
    /// is too early, and the next frame is requested.
    pub fn on_frame(
        &mut self,
        token: FrameToken,
        now: Timestamp,
        surface: &mut dyn DrawingSurface,
        scheduler: &mut dyn FrameScheduler,
    ) -> bool {
        if self.pending_frame != Some(token) {
            trace!(token = token.id(), "ignoring stale frame");
            return false;
        }
        self.pending_frame = None;

        let painted = if self.frame_due(now) {
            self.last_render = Some(now);
            self.render(surface, now - self.delay_ms);
            true
        } else {
            trace!("frame skipped by fps limit");
            false
        };

        self.pending_frame = Some(scheduler.request_frame());
        painted
    }

    fn frame_due(&self, now: Timestamp) -> bool {
        let fps = self.options.limit_fps;
        match self.last_render {
            Some(last) if fps > 0 => (now - last) as f64 >= 1000.0 / fps as f64,
            _ => true,
        }
    }

    // ---- scaling ----------------------------------------------------------

    /// Smoothed window currently mapped onto the surface height.
    pub fn visible_range(&self) -> VisibleRange {
        self.visible
    }

    /// Target range computed by the last [`update_value_range`](Self::update_value_range).
    pub fn value_range(&self) -> Option<ValueRange> {
        self.value_range
    }

    /// Compute this frame's target range and move the visible window towards it.
    pub fn update_value_range(&mut self) -> Option<ValueRange> {
        let mut raw_max: Option<f64> = None;
        let mut raw_min: Option<f64> = None;
        for b in self.bindings.iter().filter(|b| !b.series.is_disabled()) {
            if let Some(m) = b.series.max_value() {
                raw_max = Some(raw_max.map_or(m, |c| c.max(m)));
            }
            if let Some(m) = b.series.min_value() {
                raw_min = Some(raw_min.map_or(m, |c| c.min(m)));
            }
        }

        let opts = &self.options;
        let max = opts.max_value.or_else(|| raw_max.map(|m| m * opts.max_value_scale));
        let min = opts
            .min_value
            .or_else(|| raw_min.map(|m| m - (m * opts.min_value_scale - m).abs()));

        let mut target = match (min, max) {
            (Some(min), Some(max)) => Some(ValueRange::new(min, max)),
            _ => None,
        };
        if let (Some(range), Some(transform)) = (target, &opts.callbacks.y_range) {
            let out = transform(range);
            if out.is_finite() {
                target = Some(out);
            } else {
                warn!(?out, "range transform returned a non-finite range");
                target = None;
            }
        }

        if let Some(range) = target.filter(ValueRange::is_finite) {
            let smoothing = opts.scale_smoothing;
            let smoothing = if smoothing.is_finite() { smoothing.clamp(f64::MIN_POSITIVE, 1.0) } else { 0.125 };
            self.visible.step_towards(range, smoothing);
        }
        self.value_range = target.filter(ValueRange::is_finite);
        self.value_range
    }

    // ---- painting ---------------------------------------------------------

    /// Pointer position in surface pixels, for the tooltip. `None` hides it.
    pub fn set_pointer(&mut self, pointer: Option<(f64, f64)>) {
        self.pointer = pointer;
    }

    fn historical_view(&self) -> bool {
        self.options.display_data_from_percentile < 1.0
    }

    /// Time placed on the right edge for wall-clock `now`.
    fn frame_time(&self, now: Timestamp) -> f64 {
        if !(self.options.non_realtime_data || self.historical_view()) {
            return now as f64;
        }
        let enabled = || self.bindings.iter().filter(|b| !b.series.is_disabled());
        let newest = enabled().filter_map(|b| b.series.last()).map(|s| s.timestamp).max();
        let oldest = enabled().filter_map(|b| b.series.first()).map(|s| s.timestamp).min();
        match (oldest, newest) {
            (Some(oldest), Some(newest)) if self.historical_view() => {
                let pct = self.options.display_data_from_percentile.clamp(0.0, 1.0);
                oldest as f64 + (newest - oldest) as f64 * pct
            }
            (_, Some(newest)) => newest as f64,
            _ => now as f64,
        }
    }

    /// Paint one frame for time `now`. Never fails; missing data gives a blank frame.
    pub fn render(&mut self, surface: &mut dyn DrawingSurface, now: Timestamp) {
        let size = surface.size();
        if size.is_empty() {
            return;
        }
        self.tick_bounds_timer(now);
        self.update_value_range();

        let mpp = if self.options.millis_per_pixel > 0.0 { self.options.millis_per_pixel } else { 20.0 };
        let scale = TimeScale::new(self.frame_time(now), mpp, size.width_f());
        let ctx = FrameContext {
            options: &self.options,
            bindings: &self.bindings,
            visible: self.visible,
            value_range: self.value_range,
            scale,
            size,
            pointer: self.pointer,
        };
        paint::paint_frame(&ctx, surface);
    }
}
