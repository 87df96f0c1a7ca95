// File: crates/streamline-core/tests/chart_lifecycle.rs
// Purpose: Series set management, the start/stop frame loop, fps limiting and the bounds-reset sweep.

use streamline_core::{
    ChartOptions, DrawOp, FrameScheduler, FrameToken, IntervalScheduler, Interpolation, RecordingSurface, SeriesStyle,
    StreamChart, TimeSeries,
};

/// Scheduler that only records what the chart asked for.
#[derive(Default)]
struct ManualScheduler {
    next: u64,
    requested: Vec<FrameToken>,
    cancelled: Vec<FrameToken>,
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.next += 1;
        let token = FrameToken::new(self.next);
        self.requested.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.cancelled.push(token);
    }
}

fn quiet_options() -> ChartOptions {
    let mut opts = ChartOptions::default();
    opts.millis_per_pixel = 1.0;
    opts.scale_smoothing = 1.0;
    opts.interpolation = Interpolation::Linear;
    opts.grid.millis_per_line = 0.0;
    opts.grid.vertical_sections = 1;
    opts.grid.border_visible = false;
    opts.labels.disabled = true;
    opts.reset_bounds_interval = 0;
    opts
}

#[test]
fn bounds_timer_follows_series_set() {
    let a = TimeSeries::new();
    let b = TimeSeries::new();
    let mut chart = StreamChart::new(ChartOptions::default());
    assert!(!chart.bounds_reset_armed());

    chart.add_series(&a, SeriesStyle::default());
    assert!(chart.bounds_reset_armed());
    chart.add_series(&b, SeriesStyle::default());
    assert!(chart.remove_series(&a));
    assert!(chart.bounds_reset_armed(), "still one series bound");
    assert!(chart.remove_series(&b));
    assert!(!chart.bounds_reset_armed());
    assert_eq!(chart.series_count(), 0);
}

#[test]
fn zero_interval_never_arms_the_timer() {
    let a = TimeSeries::new();
    let mut opts = ChartOptions::default();
    opts.reset_bounds_interval = 0;
    let mut chart = StreamChart::new(opts);
    chart.add_series(&a, SeriesStyle::default());
    assert!(!chart.bounds_reset_armed());
}

#[test]
fn removing_an_unbound_series_is_a_no_op() {
    let a = TimeSeries::new();
    let stranger = TimeSeries::new();
    let mut chart = StreamChart::new(ChartOptions::default());
    chart.add_series(&a, SeriesStyle::default());
    assert!(!chart.remove_series(&stranger));
    assert_eq!(chart.series_count(), 1);
    assert!(chart.bounds_reset_armed());
}

#[test]
fn duplicate_bindings_are_removed_one_at_a_time() {
    let a = TimeSeries::new();
    let mut chart = StreamChart::new(ChartOptions::default());
    chart.add_series(&a, SeriesStyle::default());
    chart.add_series(&a, SeriesStyle::default().with_line_width(3.0));
    assert_eq!(chart.series_count(), 2);
    assert!(chart.remove_series(&a));
    assert_eq!(chart.series_count(), 1);
    assert_eq!(chart.bindings()[0].style.line_width, 3.0);
}

#[test]
fn bring_to_front_reorders_rendering() {
    let a = TimeSeries::new();
    let b = TimeSeries::new();
    let c = TimeSeries::new();
    let mut chart = StreamChart::new(ChartOptions::default());
    for s in [&a, &b, &c] {
        chart.add_series(s, SeriesStyle::default());
    }
    assert!(chart.bring_to_front(&a));
    let order: Vec<bool> = chart.bindings().iter().map(|bd| bd.series.same_store(&a)).collect();
    assert_eq!(order, vec![false, false, true]);
    assert!(!chart.bring_to_front(&TimeSeries::new()));
}

#[test]
fn series_style_can_be_edited_in_place() {
    let a = TimeSeries::new();
    let mut chart = StreamChart::new(ChartOptions::default());
    chart.add_series(&a, SeriesStyle::default());
    if let Some(style) = chart.series_style_mut(&a) {
        style.line_width = 4.0;
    }
    assert_eq!(chart.series_style(&a).map(|s| s.line_width), Some(4.0));
}

#[test]
fn start_is_idempotent_and_stop_cancels() {
    let mut sched = ManualScheduler::default();
    let mut chart = StreamChart::new(ChartOptions::default());

    chart.start(&mut sched);
    chart.start(&mut sched);
    assert_eq!(sched.requested.len(), 1, "only one frame outstanding");
    assert!(chart.is_running());

    let token = chart.pending_frame().expect("pending");
    chart.stop(&mut sched);
    assert_eq!(sched.cancelled, vec![token]);
    assert!(!chart.is_running());

    chart.stop(&mut sched);
    assert_eq!(sched.cancelled.len(), 1, "stop while stopped does nothing");
}

#[test]
fn stale_tokens_are_ignored_after_restart() {
    let mut sched = ManualScheduler::default();
    let mut surface = RecordingSurface::new(100, 100);
    let mut chart = StreamChart::new(ChartOptions::default());

    chart.start(&mut sched);
    let old = chart.pending_frame().expect("pending");
    chart.stop(&mut sched);
    chart.start(&mut sched);
    let current = chart.pending_frame().expect("pending");
    assert_ne!(old, current);

    assert!(!chart.on_frame(old, 0, &mut surface, &mut sched));
    assert!(surface.ops().is_empty());
    assert_eq!(chart.pending_frame(), Some(current));

    assert!(chart.on_frame(current, 0, &mut surface, &mut sched));
    assert!(!surface.ops().is_empty());
    let next = chart.pending_frame().expect("next frame requested");
    assert_ne!(next, current);
}

#[test]
fn stopped_chart_ignores_late_frames() {
    let mut sched = ManualScheduler::default();
    let mut surface = RecordingSurface::new(100, 100);
    let mut chart = StreamChart::new(ChartOptions::default());
    chart.start(&mut sched);
    let token = chart.pending_frame().expect("pending");
    chart.stop(&mut sched);
    assert!(!chart.on_frame(token, 10, &mut surface, &mut sched));
    assert!(!chart.is_running());
    assert_eq!(sched.requested.len(), 1);
}

#[test]
fn limit_fps_skips_early_frames_but_keeps_running() {
    let mut opts = ChartOptions::default();
    opts.limit_fps = 10;
    let mut chart = StreamChart::new(opts);
    let mut sched = IntervalScheduler::new(50);
    let mut surface = RecordingSurface::new(100, 100);

    chart.start(&mut sched);
    let mut painted = Vec::new();
    for now in [0, 50, 100] {
        for token in sched.poll(now) {
            painted.push(chart.on_frame(token, now, &mut surface, &mut sched));
        }
    }
    assert_eq!(painted, vec![true, false, true]);
    assert!(chart.is_running());
    assert_eq!(sched.pending().len(), 1);
}

#[test]
fn interval_scheduler_fires_once_per_interval() {
    let mut sched = IntervalScheduler::from_fps(20);
    assert_eq!(sched.interval_ms(), 50);
    assert_eq!(sched.next_deadline(), None);

    let a = sched.request_frame();
    assert_eq!(sched.next_deadline(), Some(i64::MIN));
    assert_eq!(sched.poll(1_000), vec![a]);
    assert!(sched.poll(1_001).is_empty(), "nothing pending");

    let b = sched.request_frame();
    assert!(sched.poll(1_020).is_empty(), "interval not elapsed");
    assert_eq!(sched.next_deadline(), Some(1_050));
    assert_eq!(sched.poll(1_050), vec![b]);

    let c = sched.request_frame();
    sched.cancel_frame(c);
    assert!(sched.poll(5_000).is_empty());
    assert_eq!(IntervalScheduler::from_fps(0).interval_ms(), 16);
}

#[test]
fn bounds_reset_sweep_forgets_expired_spike() {
    let series = TimeSeries::from_samples([(0, 100.0), (500, 1.0), (1_000, 2.0), (1_500, 3.0)]);
    let mut opts = quiet_options();
    opts.reset_bounds_interval = 1_000;
    let mut chart = StreamChart::new(opts);
    chart.add_series(&series, SeriesStyle::default());
    let mut surface = RecordingSurface::new(100, 100);

    chart.render(&mut surface, 1_500);
    assert_eq!(series.len(), 2, "the spike scrolled out and was pruned");
    assert_eq!(chart.value_range().map(|r| r.max), Some(100.0), "bounds drift until the sweep");

    chart.render(&mut surface, 2_000);
    assert_eq!(chart.value_range().map(|r| r.max), Some(100.0));

    chart.render(&mut surface, 2_500);
    assert_eq!(chart.value_range().map(|r| r.max), Some(3.0));
    assert_eq!(series.max_value(), Some(3.0));
}

#[test]
fn stream_to_renders_behind_real_time() {
    let series = TimeSeries::from_samples([(950, 0.0), (1_000, 10.0)]);
    let mut chart = StreamChart::new(quiet_options());
    chart.add_series(&series, SeriesStyle::default());
    let mut sched = ManualScheduler::default();
    let mut surface = RecordingSurface::new(100, 100);

    chart.stream_to(1_000, &mut sched);
    assert!(chart.is_running());
    let token = chart.pending_frame().expect("pending");
    assert!(chart.on_frame(token, 2_000, &mut surface, &mut sched));

    assert!(surface.ops().contains(&DrawOp::MoveTo(50.0, 100.0)));
    assert!(surface.ops().contains(&DrawOp::LineTo(100.0, 0.0)));
}

#[test]
fn zero_sized_surface_paints_nothing() {
    let series = TimeSeries::from_samples([(0, 1.0), (10, 2.0)]);
    let mut chart = StreamChart::new(ChartOptions::default());
    chart.add_series(&series, SeriesStyle::default());
    let mut surface = RecordingSurface::new(0, 100);
    chart.render(&mut surface, 10);
    assert!(surface.ops().is_empty());
}
