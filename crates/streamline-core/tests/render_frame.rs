// File: crates/streamline-core/tests/render_frame.rs
// Purpose: Frame output recorded through RecordingSurface: paths, fills, grid, labels, tooltip.

use streamline_core::{
    ChartOptions, Color, DrawOp, HorizontalLine, Interpolation, RecordingSurface, Rect, SeriesStyle, StreamChart,
    TimeSeries,
};

/// No grid, no border, no labels, instant scaling: only the series paths remain.
fn quiet_options() -> ChartOptions {
    let mut opts = ChartOptions::default();
    opts.millis_per_pixel = 10.0;
    opts.scale_smoothing = 1.0;
    opts.grid.millis_per_line = 0.0;
    opts.grid.vertical_sections = 1;
    opts.grid.border_visible = false;
    opts.labels.disabled = true;
    opts.reset_bounds_interval = 0;
    opts
}

fn ramp() -> TimeSeries {
    TimeSeries::from_samples([(900, 0.0), (1_000, 10.0)])
}

fn render_once(opts: ChartOptions, series: &TimeSeries, style: SeriesStyle, now: i64) -> RecordingSurface {
    let mut chart = StreamChart::new(opts);
    chart.add_series(series, style);
    let mut surface = RecordingSurface::new(100, 100);
    chart.render(&mut surface, now);
    surface
}

fn path_ops(surface: &RecordingSurface) -> Vec<DrawOp> {
    surface
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::MoveTo(..) | DrawOp::LineTo(..) | DrawOp::BezierTo { .. }))
        .cloned()
        .collect()
}

#[test]
fn empty_chart_paints_background_only() {
    let mut chart = StreamChart::new(ChartOptions::default());
    let mut surface = RecordingSurface::default();
    chart.render(&mut surface, 1_000);
    let bounds = Rect::from_ltwh(0.0, 0.0, 400.0, 100.0);
    assert_eq!(
        surface.ops(),
        &[
            DrawOp::Save,
            DrawOp::ClipRect(bounds),
            DrawOp::Save,
            DrawOp::FillRect { rect: bounds, color: Color::BLACK },
            DrawOp::Restore,
            DrawOp::Restore,
        ]
    );
}

#[test]
fn bezier_segments_use_flat_control_points() {
    let surface = render_once(quiet_options(), &ramp(), SeriesStyle::default(), 1_000);
    assert_eq!(
        path_ops(&surface),
        vec![
            DrawOp::MoveTo(90.0, 100.0),
            DrawOp::BezierTo { cp1: (95.0, 100.0), cp2: (95.0, 0.0), to: (100.0, 0.0) },
        ]
    );
    assert_eq!(surface.strokes(), 1);
    assert_eq!(surface.fills(), 0);
}

#[test]
fn linear_and_step_interpolation() {
    let mut opts = quiet_options();
    opts.interpolation = Interpolation::Linear;
    let surface = render_once(opts, &ramp(), SeriesStyle::default(), 1_000);
    assert_eq!(path_ops(&surface), vec![DrawOp::MoveTo(90.0, 100.0), DrawOp::LineTo(100.0, 0.0)]);

    let mut opts = quiet_options();
    opts.interpolation = Interpolation::Step;
    let surface = render_once(opts, &ramp(), SeriesStyle::default(), 1_000);
    assert_eq!(
        path_ops(&surface),
        vec![DrawOp::MoveTo(90.0, 100.0), DrawOp::LineTo(100.0, 100.0), DrawOp::LineTo(100.0, 0.0)]
    );
}

#[test]
fn fill_closes_below_the_visible_area() {
    let fill = Color::rgba(0, 255, 0, 64);
    let style = SeriesStyle::stroke(Color::rgb(0, 255, 0)).with_fill(fill).with_line_width(2.0);
    let surface = render_once(quiet_options(), &ramp(), style, 1_000);

    let ops = path_ops(&surface);
    assert_eq!(
        &ops[2..],
        &[DrawOp::LineTo(103.0, 0.0), DrawOp::LineTo(103.0, 103.0), DrawOp::LineTo(90.0, 102.0)]
    );
    assert!(surface.ops().contains(&DrawOp::Fill { color: fill }));
    assert!(surface.ops().contains(&DrawOp::Stroke { color: Color::rgb(0, 255, 0), width: 2.0 }));
}

#[test]
fn transparent_stroke_is_not_drawn() {
    let style = SeriesStyle::stroke(Color::TRANSPARENT).with_fill(Color::WHITE);
    let surface = render_once(quiet_options(), &ramp(), style, 1_000);
    assert_eq!(surface.strokes(), 0);
    assert_eq!(surface.fills(), 1);
}

#[test]
fn single_sample_draws_no_path() {
    let series = TimeSeries::from_samples([(1_000, 5.0)]);
    let surface = render_once(quiet_options(), &series, SeriesStyle::default(), 1_000);
    assert!(path_ops(&surface).is_empty());
}

#[test]
fn value_labels_sit_on_the_right_edge() {
    let mut opts = quiet_options();
    opts.labels.disabled = false;
    let surface = render_once(opts, &ramp(), SeriesStyle::default(), 1_000);

    let texts: Vec<(String, f64, f64)> = surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, x, y, .. } => Some((text.clone(), *x, *y)),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec![("10.00".to_string(), 68.0, 10.0), ("0.00".to_string(), 74.0, 98.0)]);
}

#[test]
fn custom_value_formatters_and_intermediate_labels() {
    let mut opts = quiet_options().with_value_formatters(|v, _| format!("lo {v}"), |v, _| format!("hi {v}"));
    opts.labels.disabled = false;
    opts.labels.show_intermediate_labels = true;
    opts.grid.vertical_sections = 2;
    let surface = render_once(opts, &ramp(), SeriesStyle::default(), 1_000);
    assert_eq!(surface.texts(), vec!["hi 10", "lo 0", "5.00"]);
}

#[test]
fn rendering_prunes_samples_left_of_the_window() {
    let series = TimeSeries::from_samples((0..=100).map(|i| (i * 10, i as f64)));
    let mut opts = quiet_options();
    opts.millis_per_pixel = 1.0;
    let _ = render_once(opts, &series, SeriesStyle::default(), 1_000);
    assert_eq!(series.first().map(|s| s.timestamp), Some(890));
    assert_eq!(series.len(), 12);
}

#[test]
fn historical_view_prunes_down_to_the_retention_floor() {
    let mut opts = quiet_options();
    opts.millis_per_pixel = 1.0;
    opts.display_data_from_percentile = 0.5;

    // Frame time 500 puts the left edge at 400; only 390 survives from before it.
    let series = TimeSeries::from_samples((0..=100).map(|i| (i * 10, i as f64)));
    let _ = render_once(opts.clone(), &series, SeriesStyle::default(), 1_000);
    assert_eq!(series.len(), 62);
    assert_eq!(series.first().map(|s| s.timestamp), Some(390));

    let series = TimeSeries::from_samples((0..=100).map(|i| (i * 10, i as f64)));
    opts.max_data_set_length = 200;
    let _ = render_once(opts, &series, SeriesStyle::default(), 1_000);
    assert_eq!(series.len(), 101, "a high floor keeps the history");
}

#[test]
fn historical_view_memory_stays_bounded_while_streaming() {
    let mut opts = quiet_options();
    opts.display_data_from_percentile = 0.5;
    opts.max_data_set_length = 50;
    let series = TimeSeries::new();
    let mut chart = StreamChart::new(opts);
    chart.add_series(&series, SeriesStyle::default());
    let mut surface = RecordingSurface::new(100, 100);
    for i in 0..20_000i64 {
        series.append(i * 10, (i % 7) as f64);
        if i % 10 == 0 {
            chart.render(&mut surface, i * 10);
        }
    }
    assert!(series.len() < 1_200, "retained {}", series.len());
}

#[test]
fn sub_pixel_grid_spacing_still_finishes_the_frame() {
    let mut opts = ChartOptions::default();
    opts.grid.millis_per_line = 1e-4;
    let series = TimeSeries::from_samples([(1_699_999_999_000, 1.0), (1_700_000_000_000, 2.0)]);
    let mut chart = StreamChart::new(opts);
    chart.add_series(&series, SeriesStyle::default());
    let mut surface = RecordingSurface::new(400, 100);
    chart.render(&mut surface, 1_700_000_000_000);
    assert_eq!(surface.save_depth(), 0);
    assert_eq!(surface.non_finite_count(), 0);
}

#[test]
fn non_realtime_data_anchors_on_the_newest_sample() {
    let mut opts = quiet_options();
    opts.non_realtime_data = true;
    opts.interpolation = Interpolation::Linear;
    let surface = render_once(opts, &ramp(), SeriesStyle::default(), 50_000);
    assert_eq!(path_ops(&surface), vec![DrawOp::MoveTo(90.0, 100.0), DrawOp::LineTo(100.0, 0.0)]);
}

#[test]
fn flat_series_renders_on_the_bottom_edge() {
    let series = TimeSeries::from_samples([(900, 5.0), (950, 5.0), (1_000, 5.0)]);
    let mut opts = quiet_options();
    opts.interpolation = Interpolation::Linear;
    let surface = render_once(opts, &series, SeriesStyle::default(), 1_000);
    assert_eq!(surface.non_finite_count(), 0);
    for op in path_ops(&surface) {
        match op {
            DrawOp::MoveTo(_, y) | DrawOp::LineTo(_, y) => assert_eq!(y, 100.0),
            other => panic!("unexpected op {other:?}"),
        }
    }
}

#[test]
fn timestamp_labels_do_not_overlap() {
    let series = TimeSeries::from_samples([(9_000, 0.0), (10_000, 10.0)]);
    let mut opts = quiet_options().with_timestamp_formatter(|t| format!("T{}", t / 1000));
    opts.millis_per_pixel = 20.0;
    opts.grid.millis_per_line = 1_000.0;
    opts.labels.disabled = false;
    let mut chart = StreamChart::new(opts);
    chart.add_series(&series, SeriesStyle::default());
    let mut surface = RecordingSurface::new(200, 100);
    chart.render(&mut surface, 10_000);

    let texts = surface.texts();
    for expected in ["T9", "T8", "T7"] {
        assert!(texts.contains(&expected), "missing {expected} in {texts:?}");
    }
    assert!(!texts.contains(&"T10"), "label would collide with the min value label");
    assert!(surface.ops().contains(&DrawOp::Text {
        text: "T9".into(),
        x: 138.0,
        y: 98.0,
        color: Color::WHITE
    }));
}

#[test]
fn horizontal_reference_line_is_half_pixel_aligned() {
    let mut opts = quiet_options();
    opts.horizontal_lines.push(HorizontalLine { value: 5.0, color: Color::rgb(255, 0, 0), line_width: 1.0 });
    let surface = render_once(opts, &ramp(), SeriesStyle::default(), 1_000);
    let ops = surface.ops();
    let at = ops.iter().position(|op| *op == DrawOp::MoveTo(0.0, 49.5)).expect("reference line");
    assert_eq!(ops[at + 1], DrawOp::LineTo(100.0, 49.5));
    assert_eq!(ops[at + 2], DrawOp::Stroke { color: Color::rgb(255, 0, 0), width: 1.0 });
}

#[test]
fn full_frame_balances_save_and_restore() {
    let a = ramp();
    let b = TimeSeries::from_samples([(920, 3.0), (960, -2.0), (1_000, 4.0)]);
    let mut opts = ChartOptions::default().with_timestamp_formatter(|t| t.to_string());
    opts.millis_per_pixel = 5.0;
    opts.tooltip = true;
    opts.grid.millis_per_line = 100.0;
    opts.grid.vertical_sections = 4;
    opts.grid.sharp_lines = true;
    opts.labels.show_intermediate_labels = true;
    opts.horizontal_lines.push(HorizontalLine::default());
    let mut chart = StreamChart::new(opts);
    chart.add_series(&a, SeriesStyle::stroke(Color::rgb(255, 0, 0)).with_fill(Color::rgba(255, 0, 0, 40)));
    chart.add_series(&b, SeriesStyle::stroke(Color::rgb(0, 0, 255)));
    chart.set_pointer(Some((90.0, 20.0)));

    let mut surface = RecordingSurface::new(100, 100);
    for now in [1_000, 1_016, 1_033] {
        chart.render(&mut surface, now);
    }
    let saves = surface.ops().iter().filter(|op| **op == DrawOp::Save).count();
    let restores = surface.ops().iter().filter(|op| **op == DrawOp::Restore).count();
    assert_eq!(saves, restores);
    assert_eq!(surface.save_depth(), 0);
    assert_eq!(surface.non_finite_count(), 0);
}

#[test]
fn tooltip_uses_custom_formatter() {
    let mut opts = quiet_options().with_tooltip_formatter(|_, entries| format!("n={}", entries.len()));
    opts.tooltip = true;
    let mut chart = StreamChart::new(opts);
    chart.add_series(&ramp(), SeriesStyle::default());
    let mut surface = RecordingSurface::new(100, 100);

    chart.render(&mut surface, 1_000);
    assert!(!surface.texts().contains(&"n=1"), "no pointer, no tooltip");

    chart.set_pointer(Some((50.0, 50.0)));
    surface.clear();
    chart.render(&mut surface, 1_000);
    assert_eq!(surface.texts(), vec!["n=1"]);
    assert!(surface.ops().contains(&DrawOp::MoveTo(50.5, 0.0)));
}

#[test]
fn default_tooltip_lists_nearest_values() {
    let mut opts = quiet_options();
    opts.tooltip = true;
    let mut chart = StreamChart::new(opts);
    let series = ramp();
    chart.add_series(&series, SeriesStyle::stroke(Color::rgb(0, 255, 0)));
    chart.set_pointer(Some((99.0, 10.0)));
    let mut surface = RecordingSurface::new(100, 100);
    chart.render(&mut surface, 1_000);

    let value_line = surface.ops().iter().find_map(|op| match op {
        DrawOp::Text { text, color, .. } if text == "10.00" => Some(*color),
        _ => None,
    });
    assert_eq!(value_line, Some(Color::rgb(0, 255, 0)), "value drawn in the series colour");
}

#[test]
fn chart_recovers_after_empty_frames() {
    let series = TimeSeries::new();
    let mut chart = StreamChart::new(quiet_options());
    chart.add_series(&series, SeriesStyle::default());
    let mut surface = RecordingSurface::new(100, 100);

    chart.render(&mut surface, 1_000);
    assert!(path_ops(&surface).is_empty());
    assert_eq!(surface.ops().len(), 6);

    series.append(900, 0.0);
    series.append(1_000, 10.0);
    surface.clear();
    chart.render(&mut surface, 1_000);
    assert_eq!(path_ops(&surface).len(), 2);
}

#[test]
fn disabled_series_is_skipped() {
    let series = ramp();
    series.set_disabled(true);
    let mut opts = quiet_options();
    opts.min_value = Some(0.0);
    opts.max_value = Some(10.0);
    let surface = render_once(opts, &series, SeriesStyle::default(), 1_000);
    assert!(path_ops(&surface).is_empty());
    assert_eq!(series.len(), 2, "disabled series are not pruned either");
}
