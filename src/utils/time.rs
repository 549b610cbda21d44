#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Frame clock driving animation playback.
///
/// Each [`tick`](Self::tick) reports the wall-clock time since the previous
/// one, clamped to `max_delta` so a stalled frame (suspended tab, debugger
/// break) does not fast-forward every animation at once.
pub struct Timer {
    start_time: Instant,
    last_update: Instant,
    /// Time since last tick, after clamping
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
    pub max_delta: Duration,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(250);

    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            max_delta: Self::DEFAULT_MAX_DELTA,
        }
    }

    /// Samples the clock and returns the clamped step in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = (now - self.last_update).min(self.max_delta);
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;
        self.dt_seconds()
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}
