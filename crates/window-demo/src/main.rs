// File: crates/window-demo/src/main.rs
// Summary: Live streaming chart in a window. Skia renders on the CPU and the RGBA
// frame is blitted with softbuffer; frames are paced by redraw requests.
// Keys: T cycles themes, Space pauses/resumes, Esc quits. Hover for a tooltip.

mod scheduler;

use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use rand::Rng;
use streamline_core::{
    theme, time_formatter, ChartOptions, DrawingSurface, SeriesStyle, StreamChart, Theme, TimeSeries, Timestamp,
};
use streamline_render_skia::SkiaSurface;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::scheduler::RedrawScheduler;

const APPEND_EVERY_MS: Timestamp = 500;

fn wall_clock_ms() -> Timestamp {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_millis() as Timestamp)
}

fn chart_options() -> ChartOptions {
    let mut opts = ChartOptions::default().with_timestamp_formatter(time_formatter);
    opts.millis_per_pixel = 15.0;
    opts.max_value_scale = 1.1;
    opts.min_value = Some(0.0);
    opts.tooltip = true;
    opts.responsive = true;
    opts.grid.vertical_sections = 4;
    opts.grid.sharp_lines = true;
    opts.labels.show_intermediate_labels = true;
    opts.labels.font_size = 12.0;
    opts
}

fn apply_theme(chart: &mut StreamChart, series: &[TimeSeries], theme: &Theme) {
    theme.apply(chart.options_mut());
    for (i, s) in series.iter().enumerate() {
        if let Some(style) = chart.series_style_mut(s) {
            let color = theme.series_color(i);
            style.stroke = color;
            style.fill = Some(color.with_alpha(0.15));
        }
    }
    info!(theme = theme.name, "theme applied");
}

/// Copy RGBA8 rows into a 0RGB softbuffer frame of `frame_w` pixels per row.
fn blit(rgba: &[u8], src_w: u32, frame: &mut [u32], frame_w: u32) {
    let (src_w, frame_w) = (src_w as usize, frame_w as usize);
    frame.fill(0);
    if src_w == 0 || frame_w == 0 {
        return;
    }
    for (row, src) in rgba.chunks_exact(src_w * 4).enumerate() {
        let start = row * frame_w;
        if start >= frame.len() {
            break;
        }
        let dst = &mut frame[start..(start + frame_w).min(frame.len())];
        for (d, px) in dst.iter_mut().zip(src.chunks_exact(4)) {
            *d = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let event_loop = EventLoop::new();
    let window = Rc::new(
        WindowBuilder::new()
            .with_title("Streamline Chart (live)")
            .with_inner_size(winit::dpi::LogicalSize::new(900.0, 300.0))
            .build(&event_loop)?,
    );

    let context = unsafe { softbuffer::Context::new(&*window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut frame_surface =
        unsafe { softbuffer::Surface::new(&context, &*window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    let size = window.inner_size();
    let mut raster = SkiaSurface::new(size.width.max(1), size.height.max(1))?;

    let themes = theme::presets();
    let mut theme_idx = 0usize;
    let series: Vec<TimeSeries> = (0..3).map(|_| TimeSeries::new()).collect();
    let mut levels = vec![50.0f64; series.len()];
    let mut rng = rand::rng();

    let mut chart = StreamChart::try_new(chart_options())?;
    for s in &series {
        chart.add_series(s, SeriesStyle::default().with_line_width(2.0));
    }
    apply_theme(&mut chart, &series, &themes[theme_idx]);

    let waker = window.clone();
    let mut scheduler = RedrawScheduler::new(move || waker.request_redraw());
    chart.start(&mut scheduler);
    let mut next_append = wall_clock_ms();

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                WindowEvent::Resized(new_size) => {
                    if chart.options().responsive {
                        if let Err(e) = raster.resize(new_size.width.max(1), new_size.height.max(1)) {
                            error!("resize failed: {e}");
                        }
                    }
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => chart.set_pointer(Some((position.x, position.y))),
                WindowEvent::CursorLeft { .. } => chart.set_pointer(None),
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                    ..
                } => match key {
                    VirtualKeyCode::Escape => *cf = ControlFlow::Exit,
                    VirtualKeyCode::T => {
                        theme_idx = (theme_idx + 1) % themes.len();
                        apply_theme(&mut chart, &series, &themes[theme_idx]);
                    }
                    VirtualKeyCode::Space => {
                        if chart.is_running() {
                            chart.stop(&mut scheduler);
                        } else {
                            chart.start(&mut scheduler);
                        }
                        info!(running = chart.is_running(), "toggled");
                    }
                    _ => {}
                },
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = wall_clock_ms();
                while next_append <= now {
                    for (s, level) in series.iter().zip(levels.iter_mut()) {
                        *level = (*level + rng.random_range(-10.0..10.0)).clamp(0.0, 100.0);
                        s.append(next_append, *level);
                    }
                    next_append += APPEND_EVERY_MS;
                }
                if let Some(token) = scheduler.take_pending() {
                    chart.on_frame(token, now, &mut raster, &mut scheduler);
                }

                let win = window.inner_size();
                let (Some(w), Some(h)) = (NonZeroU32::new(win.width), NonZeroU32::new(win.height)) else {
                    return;
                };
                if let Err(e) = frame_surface.resize(w, h) {
                    error!("softbuffer resize failed: {e}");
                    return;
                }
                let rgba = match raster.to_rgba8() {
                    Ok(px) => px,
                    Err(e) => {
                        error!("{e}");
                        return;
                    }
                };
                let mut frame = match frame_surface.buffer_mut() {
                    Ok(f) => f,
                    Err(e) => {
                        error!("softbuffer buffer: {e}");
                        return;
                    }
                };
                blit(&rgba, raster.size().width, &mut frame, win.width);
                if let Err(e) = frame.present() {
                    error!("present error: {e}");
                }
                debug!(now, "frame presented");
            }
            _ => {}
        }
    });
}
