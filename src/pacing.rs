//! Fixed-rate frame pacing.
//!
//! The loop runs one simulation step per frame and then waits out whatever is
//! left of the frame budget. That wait is the loop's single yield point.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct FramePacer {
    frame: Duration,
    started: Instant,
}

impl FramePacer {
    /// # Panics
    /// If `fps` is zero.
    pub fn new(fps: u32) -> FramePacer {
        assert!(fps > 0, "frame rate must be positive");
        FramePacer {
            frame: Duration::from_secs(1) / fps,
            started: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Mark the top of a frame.
    pub fn begin(&mut self) {
        self.started = Instant::now();
    }

    /// Time still owed to the current frame after `elapsed` has been spent.
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.frame.checked_sub(elapsed).filter(|d| !d.is_zero())
    }

    /// Sleep out the rest of the frame, returning control to the loop head.
    pub fn yield_frame(&mut self) {
        if let Some(rest) = self.remaining(self.started.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}
