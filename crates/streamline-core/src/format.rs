// File: crates/streamline-core/src/format.rs
// Summary: Default label and tooltip formatters.

use chrono::{DateTime, Local};

use crate::series::TimeSeries;
use crate::types::Timestamp;

/// Fixed-point value label, `precision` decimals.
pub fn format_value(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

/// `HH:MM:SS` in local time. Timestamps outside chrono's range print as raw millis.
pub fn time_formatter(timestamp: Timestamp) -> String {
    match DateTime::from_timestamp_millis(timestamp) {
        Some(utc) => utc.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

/// Nearest sample of one bound series under the tooltip pointer.
#[derive(Clone, Debug)]
pub struct TooltipEntry {
    pub series: TimeSeries,
    pub index: usize,
    pub timestamp: Timestamp,
    pub value: f64,
}

/// First line is the pointer time, then one line per series value.
pub fn default_tooltip(timestamp: Timestamp, entries: &[TooltipEntry], precision: usize) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(time_formatter(timestamp));
    lines.extend(entries.iter().map(|e| format_value(e.value, precision)));
    lines.join("\n")
}
