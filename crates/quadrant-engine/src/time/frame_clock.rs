use std::time::{Duration, Instant};

/// Timing snapshot for one rendered frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Monotonic frame counter, starting at zero.
    pub frame_index: u64,

    /// Wall time spent inside the measured render call.
    pub render_time: Duration,

    /// Time between the start of the previous frame and this one.
    /// `None` for the first frame and after `reset()`.
    pub since_previous: Option<Duration>,

    /// `render_time` exceeded the clock's budget.
    pub over_budget: bool,
}

/// Frame clock producing `FrameTime` snapshots.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_start: Option<Instant>,
    frame_index: u64,
    budget: Duration,
}

impl FrameClock {
    /// Default budget: one second, the interactive tick period.
    pub const DEFAULT_BUDGET: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::with_budget(Self::DEFAULT_BUDGET)
    }

    pub fn with_budget(budget: Duration) -> Self {
        Self {
            last_start: None,
            frame_index: 0,
            budget,
        }
    }

    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Forgets the previous frame start, e.g. after the surface was hidden.
    pub fn reset(&mut self) {
        self.last_start = None;
    }

    /// Runs `render` and returns its result with a timing snapshot.
    pub fn measure<R>(&mut self, render: impl FnOnce() -> R) -> (R, FrameTime) {
        let started = Instant::now();
        let out = render();
        let render_time = started.elapsed();

        let since_previous = self
            .last_start
            .map(|prev| started.saturating_duration_since(prev));
        self.last_start = Some(started);

        let ft = FrameTime {
            frame_index: self.frame_index,
            render_time,
            since_previous,
            over_budget: render_time > self.budget,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        (out, ft)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_no_previous() {
        let mut clock = FrameClock::new();
        let (value, ft) = clock.measure(|| 7);
        assert_eq!(value, 7);
        assert_eq!(ft.frame_index, 0);
        assert!(ft.since_previous.is_none());
        assert!(!ft.over_budget);
    }

    #[test]
    fn frames_are_counted_and_spaced() {
        let mut clock = FrameClock::new();
        clock.measure(|| ());
        let (_, ft) = clock.measure(|| ());
        assert_eq!(ft.frame_index, 1);
        assert!(ft.since_previous.is_some());
    }

    #[test]
    fn reset_drops_spacing_but_keeps_count() {
        let mut clock = FrameClock::new();
        clock.measure(|| ());
        clock.reset();
        let (_, ft) = clock.measure(|| ());
        assert_eq!(ft.frame_index, 1);
        assert!(ft.since_previous.is_none());
    }

    #[test]
    fn zero_budget_flags_every_frame() {
        let mut clock = FrameClock::with_budget(Duration::ZERO);
        let (_, ft) = clock.measure(|| std::thread::sleep(Duration::from_millis(1)));
        assert!(ft.over_budget);
    }
}
