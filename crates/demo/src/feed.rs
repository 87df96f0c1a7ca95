// File: crates/demo/src/feed.rs
// Summary: Data sources for the headless demo: simulated CPU load or a CSV replay.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use streamline_core::{TimeSeries, Timestamp};
use tracing::{debug, warn};

/// Named stores fed by a source, in first-seen order.
pub type NamedSeries = Vec<(String, TimeSeries)>;

pub enum Feed {
    Random(RandomFeed),
    Csv(CsvReplay),
}

impl Feed {
    pub fn series(&self) -> &NamedSeries {
        match self {
            Feed::Random(f) => &f.series,
            Feed::Csv(f) => &f.series,
        }
    }

    /// Where the simulated clock should start.
    pub fn start_time(&self) -> Timestamp {
        match self {
            Feed::Random(f) => f.next_at,
            Feed::Csv(f) => f.rows.first().map_or(0, |r| r.timestamp),
        }
    }

    /// Append everything due at or before `now`.
    pub fn advance(&mut self, now: Timestamp) {
        match self {
            Feed::Random(f) => f.advance(now),
            Feed::Csv(f) => f.advance(now),
        }
    }
}

/// Random-walk "CPU load" in 0..=100 for several hosts, one sample per period.
pub struct RandomFeed {
    series: NamedSeries,
    levels: Vec<f64>,
    rng: StdRng,
    period_ms: i64,
    next_at: Timestamp,
}

impl RandomFeed {
    pub fn new(count: usize, start: Timestamp, period_ms: i64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let levels = (0..count).map(|_| rng.random_range(10.0..90.0)).collect();
        let series = (0..count).map(|i| (format!("cpu{i}"), TimeSeries::new())).collect();
        Self { series, levels, rng, period_ms: period_ms.max(1), next_at: start }
    }

    fn advance(&mut self, now: Timestamp) {
        while self.next_at <= now {
            for ((_, s), level) in self.series.iter().zip(self.levels.iter_mut()) {
                let step: f64 = self.rng.random_range(-8.0..8.0);
                *level = (*level + step).clamp(0.0, 100.0);
                s.append(self.next_at, *level);
            }
            self.next_at += self.period_ms;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Row {
    key: usize,
    timestamp: Timestamp,
    value: f64,
}

/// Replays `timestamp,value[,series]` rows at their recorded times.
pub struct CsvReplay {
    series: NamedSeries,
    rows: Vec<Row>,
    cursor: usize,
}

impl CsvReplay {
    pub fn load(path: &Path) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("failed to open CSV '{}'", path.display()))?;
        let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
        let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
        let i_time = idx(&["timestamp", "time", "t", "date"]).unwrap_or(0);
        let i_value = idx(&["value", "v", "y"]).unwrap_or(1);
        let i_series = idx(&["series", "name", "key"]);

        let mut series: NamedSeries = Vec::new();
        let mut keys: HashMap<String, usize> = HashMap::new();
        let mut rows = Vec::new();
        for (line, rec) in rdr.records().enumerate() {
            let rec = rec.with_context(|| format!("bad CSV record {}", line + 2))?;
            let timestamp = rec.get(i_time).and_then(parse_timestamp);
            let value = rec.get(i_value).and_then(|s| s.trim().parse::<f64>().ok());
            let (Some(timestamp), Some(value)) = (timestamp, value) else {
                warn!(line = line + 2, "skipping row without a timestamp and value");
                continue;
            };
            let name = i_series.and_then(|i| rec.get(i)).map(str::trim).unwrap_or("series");
            let key = *keys.entry(name.to_string()).or_insert_with(|| {
                series.push((name.to_string(), TimeSeries::new()));
                series.len() - 1
            });
            rows.push(Row { key, timestamp, value });
        }
        rows.sort_by_key(|r| r.timestamp);
        debug!(rows = rows.len(), series = series.len(), "CSV loaded");
        Ok(Self { series, rows, cursor: 0 })
    }

    fn advance(&mut self, now: Timestamp) {
        while let Some(row) = self.rows.get(self.cursor) {
            if row.timestamp > now {
                break;
            }
            self.series[row.key].1.append(row.timestamp, row.value);
            self.cursor += 1;
        }
    }
}

/// Integer or fractional epoch time; values that look like seconds become millis.
fn parse_timestamp(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    let n = s.parse::<i64>().ok().map(|n| n as f64).or_else(|| s.parse::<f64>().ok())?;
    if !n.is_finite() {
        return None;
    }
    let millis = if n.abs() < 1e11 && n.abs() > 1e8 { n * 1000.0 } else { n };
    Some(millis.round() as Timestamp)
}
