// File: crates/streamline-core/src/paint.rs
// Summary: Per-frame paint pipeline: background, grid, reference lines, series, labels, tooltip.
// Every stage leaves the surface state as it found it, so stages can be skipped independently.

use crate::chart::SeriesBinding;
use crate::color::Color;
use crate::format::{default_tooltip, format_value, TooltipEntry};
use crate::geometry::{clamp, round_px, Rect, Size};
use crate::grid::{horizontal_line_ys, sharp_offset, vertical_line_times};
use crate::options::{ChartOptions, Interpolation};
use crate::scale::{TimeScale, ValueRange, VisibleRange};
use crate::surface::{DrawingSurface, Font};

pub(crate) struct FrameContext<'a> {
    pub options: &'a ChartOptions,
    pub bindings: &'a [SeriesBinding],
    pub visible: VisibleRange,
    pub value_range: Option<ValueRange>,
    pub scale: TimeScale,
    pub size: Size,
    pub pointer: Option<(f64, f64)>,
}

impl FrameContext<'_> {
    fn width(&self) -> f64 {
        self.size.width_f()
    }
    fn height(&self) -> f64 {
        self.size.height_f()
    }
    fn label_font(&self) -> Font {
        Font::new(self.options.labels.font_size, self.options.labels.font_family.clone())
    }
    fn labels_enabled(&self) -> bool {
        !self.options.labels.disabled
    }
    fn min_label(&self, range: ValueRange) -> String {
        let precision = self.options.labels.precision;
        match &self.options.callbacks.y_min_formatter {
            Some(f) => f(range.min, precision),
            None => format_value(range.min, precision),
        }
    }
    fn max_label(&self, range: ValueRange) -> String {
        let precision = self.options.labels.precision;
        match &self.options.callbacks.y_max_formatter {
            Some(f) => f(range.max, precision),
            None => format_value(range.max, precision),
        }
    }
}

pub(crate) fn paint_frame(ctx: &FrameContext<'_>, surface: &mut dyn DrawingSurface) {
    surface.save();
    surface.clip_rect(ctx.size.bounds());

    draw_background(ctx, surface);

    // Nothing to scale against yet: leave a background-only frame.
    if let Some(range) = ctx.value_range {
        draw_vertical_grid(ctx, surface, range);
        draw_horizontal_grid(ctx, surface);
        draw_border(ctx, surface);
        draw_reference_lines(ctx, surface);
        for binding in ctx.bindings {
            draw_series(ctx, surface, binding);
        }
        draw_value_labels(ctx, surface, range);
        draw_tooltip(ctx, surface);
    }

    surface.restore();
}

fn draw_background(ctx: &FrameContext<'_>, surface: &mut dyn DrawingSurface) {
    surface.save();
    surface.set_fill_color(ctx.options.grid.fill_style);
    surface.fill_rect(ctx.size.bounds());
    surface.restore();
}

fn draw_vertical_grid(ctx: &FrameContext<'_>, surface: &mut dyn DrawingSurface, range: ValueRange) {
    let grid = &ctx.options.grid;
    let times = vertical_line_times(&ctx.scale, grid.millis_per_line);
    if times.is_empty() {
        return;
    }
    let offset = sharp_offset(grid.sharp_lines);

    surface.save();
    surface.set_line_width(grid.line_width);
    surface.set_stroke_color(grid.stroke_style);
    surface.begin_path();
    for &t in &times {
        let gx = ctx.scale.time_to_x(t) + offset;
        surface.move_to(gx, 0.0);
        surface.line_to(gx, ctx.height());
    }
    surface.stroke();

    if let Some(formatter) = &ctx.options.callbacks.timestamp_formatter {
        surface.set_font(&ctx.label_font());
        surface.set_fill_color(ctx.options.labels.fill_style);
        // Labels sit left of their line and must end before the next label to the
        // right (or the min-value label for the rightmost one).
        let mut text_until_x = if ctx.labels_enabled() {
            let min_text = ctx.min_label(range);
            ctx.width() - surface.measure_text(&min_text) - 4.0
        } else {
            ctx.width()
        };
        for &t in &times {
            let gx = ctx.scale.time_to_x(t);
            if gx >= text_until_x {
                continue;
            }
            let text = formatter(t.floor() as i64);
            let w = surface.measure_text(&text);
            surface.fill_text(&text, gx - w, ctx.height() - 2.0);
            text_until_x = gx - w - 2.0;
        }
    }
    surface.restore();
}

fn draw_horizontal_grid(ctx: &FrameContext<'_>, surface: &mut dyn DrawingSurface) {
    let grid = &ctx.options.grid;
    let ys = horizontal_line_ys(ctx.height(), grid.vertical_sections);
    if ys.is_empty() {
        return;
    }
    let offset = sharp_offset(grid.sharp_lines);
    surface.save();
    surface.set_line_width(grid.line_width);
    surface.set_stroke_color(grid.stroke_style);
    surface.begin_path();
    for gy in ys {
        surface.move_to(0.0, gy + offset);
        surface.line_to(ctx.width(), gy + offset);
    }
    surface.stroke();
    surface.restore();
}

fn draw_border(ctx: &FrameContext<'_>, surface: &mut dyn DrawingSurface) {
    let grid = &ctx.options.grid;
    if !grid.border_visible {
        return;
    }
    surface.save();
    surface.set_line_width(grid.line_width);
    surface.set_stroke_color(grid.stroke_style);
    surface.stroke_rect(ctx.size.bounds());
    surface.restore();
}

fn draw_reference_lines(ctx: &FrameContext<'_>, surface: &mut dyn DrawingSurface) {
    for line in &ctx.options.horizontal_lines {
        if !line.value.is_finite() {
            continue;
        }
        let y = round_px(ctx.visible.value_to_y(line.value, ctx.height())) - 0.5;
        surface.save();
        surface.set_stroke_color(line.color);
        surface.set_line_width(line.line_width);
        surface.begin_path();
        surface.move_to(0.0, y);
        surface.line_to(ctx.width(), y);
        surface.stroke();
        surface.restore();
    }
}

fn draw_series(ctx: &FrameContext<'_>, surface: &mut dyn DrawingSurface, binding: &SeriesBinding) {
    let series = &binding.series;
    if series.is_disabled() {
        return;
    }
    // The historical view prunes too; `max_data_set_length` is what keeps its history.
    let oldest = ctx.scale.oldest_valid_time();
    if oldest.is_finite() {
        series.drop_old_data(oldest.ceil() as i64, ctx.options.max_data_set_length);
    }

    let style = &binding.style;
    let (w, h) = (ctx.width(), ctx.height());
    series.with_samples(|samples| {
        if samples.len() < 2 {
            return;
        }
        surface.save();
        surface.set_line_width(style.line_width);
        surface.set_stroke_color(style.stroke);
        surface.begin_path();

        let mut first_x = 0.0;
        let (mut last_x, mut last_y) = (0.0, 0.0);
        for (i, s) in samples.iter().enumerate() {
            let x = ctx.scale.time_to_x(s.timestamp as f64);
            let y = ctx.visible.value_to_y(s.value, h);
            if i == 0 {
                first_x = x;
                surface.move_to(x, y);
            } else {
                match ctx.options.interpolation {
                    // Control points share the endpoints' y so neighbouring curves join flat.
                    Interpolation::Bezier => {
                        let mid = round_px((last_x + x) / 2.0);
                        surface.bezier_curve_to(mid, last_y, mid, y, x, y);
                    }
                    Interpolation::Linear => surface.line_to(x, y),
                    Interpolation::Step => {
                        surface.line_to(x, last_y);
                        surface.line_to(x, y);
                    }
                }
            }
            last_x = x;
            last_y = y;
        }

        if let Some(fill) = style.fill.filter(|c| !c.is_transparent()) {
            let lw = style.line_width;
            surface.line_to(w + lw + 1.0, last_y);
            surface.line_to(w + lw + 1.0, h + lw + 1.0);
            surface.line_to(first_x, h + lw);
            surface.set_fill_color(fill);
            surface.fill();
        }
        if !style.stroke.is_transparent() {
            surface.stroke();
        }
        surface.restore();
    });
}

fn draw_value_labels(ctx: &FrameContext<'_>, surface: &mut dyn DrawingSurface, range: ValueRange) {
    if !ctx.labels_enabled() {
        return;
    }
    let labels = &ctx.options.labels;
    let (w, h) = (ctx.width(), ctx.height());
    surface.save();
    surface.set_font(&ctx.label_font());
    surface.set_fill_color(labels.fill_style);

    let max_text = ctx.max_label(range);
    let min_text = ctx.min_label(range);
    let max_w = surface.measure_text(&max_text);
    surface.fill_text(&max_text, w - max_w - 2.0, labels.font_size);
    let min_w = surface.measure_text(&min_text);
    surface.fill_text(&min_text, w - min_w - 2.0, h - 2.0);

    let sections = ctx.options.grid.vertical_sections;
    if labels.show_intermediate_labels && sections > 0 {
        let step = range.span() / sections as f64;
        let step_px = h / sections as f64;
        let offset = sharp_offset(ctx.options.grid.sharp_lines);
        for v in 1..sections {
            let gy = h - round_px(v as f64 * step_px) + offset;
            let value = range.min + v as f64 * step;
            let text = match &ctx.options.callbacks.y_intermediate_formatter {
                Some(f) => f(value, labels.precision),
                None => format_value(value, labels.precision),
            };
            let x = if labels.intermediate_label_same_axis { w - surface.measure_text(&text) - 2.0 } else { 0.0 };
            surface.fill_text(&text, x, gy - ctx.options.grid.line_width);
        }
    }
    surface.restore();
}

fn draw_tooltip(ctx: &FrameContext<'_>, surface: &mut dyn DrawingSurface) {
    if !ctx.options.tooltip {
        return;
    }
    let Some((px, py)) = ctx.pointer else {
        return;
    };
    if !ctx.size.bounds().contains(px, py) {
        return;
    }

    let t = ctx.scale.x_to_time(px).round() as i64;
    let entries: Vec<TooltipEntry> = ctx
        .bindings
        .iter()
        .filter(|b| !b.series.is_disabled())
        .filter_map(|b| {
            let index = b.series.nearest_index(t)?;
            let s = b.series.sample(index)?;
            Some(TooltipEntry { series: b.series.clone(), index, timestamp: s.timestamp, value: s.value })
        })
        .collect();

    let line = &ctx.options.tooltip_line;
    surface.save();
    surface.set_stroke_color(line.stroke_style);
    surface.set_line_width(line.line_width);
    surface.begin_path();
    surface.move_to(round_px(px) + 0.5, 0.0);
    surface.line_to(round_px(px) + 0.5, ctx.height());
    surface.stroke();

    let labels = &ctx.options.labels;
    let lines: Vec<(String, Color)> = match &ctx.options.callbacks.tooltip_formatter {
        Some(f) => f(t, &entries).lines().map(|l| (l.to_string(), labels.fill_style)).collect(),
        None => {
            // Default layout: time in the label colour, then one value per series in its stroke colour.
            let text = default_tooltip(t, &entries, labels.precision);
            let colors = std::iter::once(labels.fill_style)
                .chain(entries.iter().map(|e| series_stroke(ctx.bindings, e)));
            text.lines().map(str::to_string).zip(colors).collect()
        }
    };
    if lines.is_empty() {
        surface.restore();
        return;
    }

    surface.set_font(&ctx.label_font());
    let line_h = labels.font_size * 1.2;
    let pad = 4.0;
    let text_w = lines.iter().map(|(l, _)| surface.measure_text(l)).fold(0.0, f64::max);
    let box_w = text_w + 2.0 * pad;
    let box_h = line_h * lines.len() as f64 + 2.0 * pad;
    // Prefer below-right of the pointer, flipping inside the surface when needed.
    let mut bx = px + 10.0;
    if bx + box_w > ctx.width() {
        bx = px - 10.0 - box_w;
    }
    let bx = clamp(bx, 0.0, (ctx.width() - box_w).max(0.0));
    let by = clamp(py + 10.0, 0.0, (ctx.height() - box_h).max(0.0));

    surface.set_fill_color(ctx.options.grid.fill_style);
    surface.fill_rect(Rect::from_ltwh(bx, by, box_w, box_h));
    surface.stroke_rect(Rect::from_ltwh(bx, by, box_w, box_h));
    for (i, (text, color)) in lines.iter().enumerate() {
        surface.set_fill_color(*color);
        surface.fill_text(text, bx + pad, by + pad + line_h * (i as f64 + 1.0) - (line_h - labels.font_size));
    }
    surface.restore();
}

fn series_stroke(bindings: &[SeriesBinding], entry: &TooltipEntry) -> Color {
    bindings
        .iter()
        .find(|b| b.series.same_store(&entry.series))
        .map_or(Color::WHITE, |b| b.style.stroke)
}
