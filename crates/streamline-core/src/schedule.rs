// File: crates/streamline-core/src/schedule.rs
// Summary: Injected "schedule next frame" capability and the fixed-rate fallback scheduler.
// Notes:
// - Hosts with a display-refresh callback implement `FrameScheduler` over it and
//   deliver each token back through `StreamChart::on_frame`.
// - `IntervalScheduler` covers hosts without one: poll it with the current time.

/// Handle for one requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
    pub const fn id(&self) -> u64 {
        self.0
    }
}

pub trait FrameScheduler {
    /// Ask the host for one future frame callback.
    fn request_frame(&mut self) -> FrameToken;
    /// Withdraw a request; cancelling an unknown or delivered token is a no-op.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Fixed-rate timer fallback. Fires every pending request at most once per interval.
#[derive(Debug)]
pub struct IntervalScheduler {
    interval_ms: i64,
    next_id: u64,
    pending: Vec<FrameToken>,
    next_due: Option<i64>,
}

impl IntervalScheduler {
    pub fn new(interval_ms: i64) -> Self {
        Self { interval_ms: interval_ms.max(1), next_id: 1, pending: Vec::new(), next_due: None }
    }

    /// Interval of `1000 / fps` ms; 0 fps falls back to 60.
    pub fn from_fps(fps: u32) -> Self {
        let fps = if fps == 0 { 60 } else { fps };
        Self::new((1000 / fps as i64).max(1))
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    pub fn pending(&self) -> &[FrameToken] {
        &self.pending
    }

    /// When the pending requests fire next. `None` when nothing is pending;
    /// `i64::MIN` when they fire on the very next poll.
    pub fn next_deadline(&self) -> Option<i64> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.next_due.unwrap_or(i64::MIN))
        }
    }

    /// Hand out every pending token if the interval elapsed.
    pub fn poll(&mut self, now_ms: i64) -> Vec<FrameToken> {
        if self.pending.is_empty() || self.next_due.is_some_and(|due| now_ms < due) {
            return Vec::new();
        }
        self.next_due = Some(now_ms + self.interval_ms);
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken::new(self.next_id);
        self.next_id += 1;
        self.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|t| *t != token);
    }
}
