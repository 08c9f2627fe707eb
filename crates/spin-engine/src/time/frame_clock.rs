use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the clock started, in seconds.
    pub elapsed: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// `start` is fixed at construction (or `reset`) and drives time-based
/// animation through `FrameTime::elapsed`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    frame_index: u64,
}

impl FrameClock {
    /// Creates a new clock starting now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a clock that measures `elapsed` from `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            frame_index: 0,
        }
    }

    /// Restarts the clock at now. The frame counter keeps counting.
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let ft = FrameTime {
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
