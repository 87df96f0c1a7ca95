// File: crates/window-demo/src/scheduler.rs
// Summary: Frame scheduler tied to the window's redraw requests (display refresh).

use streamline_core::{FrameScheduler, FrameToken};

/// Holds at most one outstanding token; each request asks the window for a redraw.
pub struct RedrawScheduler {
    wake: Box<dyn Fn()>,
    next_id: u64,
    pending: Option<FrameToken>,
}

impl RedrawScheduler {
    pub fn new(wake: impl Fn() + 'static) -> Self {
        Self { wake: Box::new(wake), next_id: 1, pending: None }
    }

    /// Token to deliver on this redraw, if any.
    pub fn take_pending(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken::new(self.next_id);
        self.next_id += 1;
        self.pending = Some(token);
        (self.wake)();
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }
}
