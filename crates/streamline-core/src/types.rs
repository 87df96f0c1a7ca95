// File: crates/streamline-core/src/types.rs
// Summary: Shared types and constants (timestamps, samples, default surface size).

/// Milliseconds since the Unix epoch (or any monotonic origin the host picks).
pub type Timestamp = i64;

/// Default surface width in pixels.
pub const WIDTH: u32 = 400;
/// Default surface height in pixels.
pub const HEIGHT: u32 = 100;

/// One observation appended to a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: Timestamp,
    pub value: f64,
}

impl Sample {
    pub const fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}
