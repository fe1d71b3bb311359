//! Indeterminate progress spinner.

use std::time::{Duration, Instant};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Braille spinner advanced by wall-clock time.
pub struct Spinner {
    frame_index: usize,
    last_update: Instant,
    /// Milliseconds per frame
    speed_ms: u64,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            frame_index: 0,
            last_update: Instant::now(),
            speed_ms: 80,
        }
    }

    /// Advance if enough time has passed and return the current frame.
    pub fn tick(&mut self, now: Instant) -> &'static str {
        if now.duration_since(self.last_update) >= Duration::from_millis(self.speed_ms) {
            self.frame_index = (self.frame_index + 1) % FRAMES.len();
            self.last_update = now;
        }
        FRAMES[self.frame_index]
    }

    pub fn current_frame(&self) -> &'static str {
        FRAMES[self.frame_index]
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}
