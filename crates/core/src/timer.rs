//! Frame clock for delta-time driven loops.

use std::time::{Duration, Instant};

/// Measures wall time between frames.
///
/// Deltas are clamped to `max_delta` so a stalled frame (debugger break,
/// window drag) does not turn into one huge simulation step.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    max_delta: Duration,
    frame: u64,
}

impl FrameClock {
    /// Default delta clamp (a quarter of a second).
    pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(250);

    /// Create a new clock, starting from now.
    pub fn new() -> Self {
        Self::with_max_delta(Self::DEFAULT_MAX_DELTA)
    }

    /// Create a clock with a custom delta clamp.
    pub fn with_max_delta(max_delta: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            max_delta,
            frame: 0,
        }
    }

    /// Total elapsed time since the clock was created or reset.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Advance one frame and return the clamped time since the previous tick.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now - self.last_tick;
        self.last_tick = now;
        self.frame += 1;
        delta.min(self.max_delta)
    }

    /// Same as [`tick`](Self::tick), in seconds.
    pub fn delta_secs(&mut self) -> f32 {
        self.tick().as_secs_f32()
    }

    /// Number of ticks since creation or the last reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Reset elapsed time and the frame counter.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_tick = now;
        self.frame = 0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
