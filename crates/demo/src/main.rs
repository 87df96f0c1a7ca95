// File: crates/demo/src/main.rs
// Summary: Headless streaming demo. Drives a chart with a simulated clock through
// `IntervalScheduler` and writes every painted frame to a PNG.

mod feed;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use streamline_core::{
    theme, time_formatter, ChartOptions, IntervalScheduler, SeriesStyle, StreamChart, Theme, Timestamp,
};
use streamline_render_skia::SkiaSurface;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::feed::{CsvReplay, Feed, RandomFeed};

const USAGE: &str = "usage: streamline-demo [--config opts.json] [--theme NAME] [--frames N] [--fps N]
                       [--delay MS] [--size WxH] [--seed N] [--csv data.csv] [--out DIR]";

struct Args {
    config: Option<PathBuf>,
    theme: Option<String>,
    frames: usize,
    fps: u32,
    delay_ms: i64,
    width: u32,
    height: u32,
    seed: u64,
    csv: Option<PathBuf>,
    out: PathBuf,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: None,
            theme: None,
            frames: 10,
            fps: 10,
            delay_ms: 0,
            width: 800,
            height: 200,
            seed: 42,
            csv: None,
            out: PathBuf::from("target/demo_out"),
        }
    }
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = || it.next().with_context(|| format!("missing value for {flag}"));
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--theme" => args.theme = Some(value()?),
            "--frames" => args.frames = value()?.parse().context("--frames expects a number")?,
            "--fps" => args.fps = value()?.parse().context("--fps expects a number")?,
            "--delay" => args.delay_ms = value()?.parse().context("--delay expects milliseconds")?,
            "--seed" => args.seed = value()?.parse().context("--seed expects a number")?,
            "--csv" => args.csv = Some(PathBuf::from(value()?)),
            "--out" => args.out = PathBuf::from(value()?),
            "--size" => {
                let v = value()?;
                let (w, h) = v.split_once('x').with_context(|| format!("--size expects WxH, got '{v}'"))?;
                args.width = w.parse().context("bad width")?;
                args.height = h.parse().context("bad height")?;
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument '{other}'\n{USAGE}"),
        }
    }
    if args.width == 0 || args.height == 0 {
        bail!("--size must be non-zero");
    }
    Ok(args)
}

fn load_options(args: &Args) -> Result<(ChartOptions, Theme)> {
    let mut opts = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            ChartOptions::from_json_str(&json).with_context(|| format!("invalid config '{}'", path.display()))?
        }
        None => {
            let mut o = ChartOptions::default();
            o.max_value_scale = 1.1;
            o.min_value = Some(0.0);
            o.labels.show_intermediate_labels = true;
            o.grid.vertical_sections = 4;
            o
        }
    };
    let theme = theme::find(args.theme.as_deref().unwrap_or("dark"));
    if args.theme.is_some() || args.config.is_none() {
        theme.apply(&mut opts);
    }
    let opts = opts.with_timestamp_formatter(time_formatter);
    opts.validate()?;
    Ok((opts, theme))
}

fn wall_clock_ms() -> Timestamp {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_millis() as Timestamp)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args()?;
    let (opts, theme) = load_options(&args)?;

    let mut feed = match &args.csv {
        Some(path) => Feed::Csv(CsvReplay::load(path)?),
        None => Feed::Random(RandomFeed::new(4, wall_clock_ms(), 250, args.seed)),
    };
    if feed.series().is_empty() {
        bail!("no series to plot; check the CSV headers");
    }

    let mut chart = StreamChart::try_new(opts)?;
    for (i, (name, series)) in feed.series().iter().enumerate() {
        let color = theme.series_color(i);
        chart.add_series(series, SeriesStyle::stroke(color).with_fill(color.with_alpha(0.2)).with_line_width(2.0));
        info!(series = %name, %color, "series bound");
    }

    let mut surface = SkiaSurface::new(args.width, args.height)?;
    let mut scheduler = IntervalScheduler::from_fps(args.fps);
    let mut clock = feed.start_time() + args.delay_ms;
    chart.stream_to(args.delay_ms, &mut scheduler);

    let mut written = 0usize;
    while written < args.frames {
        feed.advance(clock);
        for token in scheduler.poll(clock) {
            if chart.on_frame(token, clock, &mut surface, &mut scheduler) {
                let path = args.out.join(format!("frame_{written:04}.png"));
                surface.write_png(&path)?;
                info!(frame = written, path = %path.display(), "wrote frame");
                written += 1;
            }
        }
        clock = match scheduler.next_deadline() {
            Some(due) if due > clock => due,
            _ => clock + scheduler.interval_ms(),
        };
    }
    chart.stop(&mut scheduler);
    info!(frames = written, dir = %args.out.display(), "done");
    Ok(())
}
