/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    ///
    /// Always `0.0` on the first tick after construction or `reset`.
    pub dt: f32,

    /// Host timestamp of this tick, in milliseconds.
    pub timestamp_ms: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,

    first: bool,
}

impl FrameTime {
    /// Returns `true` when this tick had no previous reference timestamp.
    ///
    /// The frame loop skips simulation on such ticks.
    #[inline]
    pub fn is_first(&self) -> bool {
        self.first
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum ClockState {
    Uninitialized,
    Running { last_ms: f64 },
}

/// Frame clock converting a host timestamp stream into `FrameTime` snapshots.
///
/// Timestamps are absolute milliseconds supplied by whatever schedules frames
/// (a winit redraw, a headless driver, a test). The clock never reads the wall
/// clock itself; see [`HostClock`](super::HostClock) for that.
///
/// A timestamp that goes backwards yields `dt = 0` and becomes the new baseline.
#[derive(Debug, Clone)]
pub struct FrameClock {
    state: ClockState,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            state: ClockState::Uninitialized,
            frame_index: 0,
        }
    }

    /// Forgets the previous timestamp. The next tick reports `dt = 0`.
    ///
    /// Useful when resuming from suspension, so the pause isn't simulated.
    pub fn reset(&mut self) {
        self.state = ClockState::Uninitialized;
    }

    /// Returns `true` once at least one timestamp has been observed.
    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    /// Advances the clock to `timestamp_ms` and returns a new `FrameTime`.
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameTime {
        let (dt, first) = match self.state {
            ClockState::Uninitialized => (0.0, true),
            ClockState::Running { last_ms } => {
                let delta_ms = timestamp_ms - last_ms;
                // NaN and regressions both collapse to zero.
                let dt = if delta_ms > 0.0 { delta_ms / 1000.0 } else { 0.0 };
                (dt as f32, false)
            }
        };

        self.state = ClockState::Running { last_ms: timestamp_ms };

        let ft = FrameTime {
            dt,
            timestamp_ms,
            frame_index: self.frame_index,
            first,
        };

        self.frame_index = self
            .frame_index
            .wrapping_add(1);

        ft
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

    // ── first frame ───────────────────────────────────────────────────────

    #[test]
    fn first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        let ft = clock.tick(12_345.0);
        assert!(ft.is_first());
        assert_eq!(ft.dt, 0.0);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn first_tick_ignores_large_timestamp() {
        // A host that has been running for an hour must not produce a one-hour dt.
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(3_600_000.0).dt, 0.0);
    }

    // ── running ───────────────────────────────────────────────────────────

    #[test]
    fn delta_is_converted_to_seconds() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        let ft = clock.tick(1250.0);
        assert!(!ft.is_first());
        assert_eq!(ft.dt, 0.25);
        assert_eq!(ft.frame_index, 1);
    }

    #[test]
    fn increasing_stream_never_goes_negative() {
        let mut clock = FrameClock::new();
        let mut t = 0.0;
        for step in [16.6, 0.1, 33.4, 1.0, 250.0] {
            t += step;
            assert!(clock.tick(t).dt >= 0.0);
        }
    }

    #[test]
    fn regression_clamps_to_zero_and_rebases() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        assert_eq!(clock.tick(400.0).dt, 0.0);
        assert_eq!(clock.tick(450.0).dt, 0.05);
    }

    #[test]
    fn equal_timestamps_yield_zero() {
        let mut clock = FrameClock::new();
        clock.tick(10.0);
        assert_eq!(clock.tick(10.0).dt, 0.0);
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_returns_to_first_frame() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(16.0);
        clock.reset();
        assert!(!clock.is_running());

        let ft = clock.tick(10_000.0);
        assert!(ft.is_first());
        assert_eq!(ft.dt, 0.0);
        // Frame counter keeps counting across resets.
        assert_eq!(ft.frame_index, 2);
    }
}
