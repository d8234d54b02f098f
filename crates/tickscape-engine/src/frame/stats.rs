use crate::physics::StepReport;
use crate::time::FrameTime;

/// Running frame counters, reported through `log::debug!` about once a second.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    /// Frames presented.
    pub frames: u64,
    /// Frames that stepped the world and updated actors.
    pub simulated_frames: u64,
    /// Physics sub-steps over the whole run.
    pub sub_steps: u64,

    window_start_ms: Option<f64>,
    window_frames: u32,
    window_sub_steps: u32,
}

/// Length of one reporting window, in host milliseconds.
const REPORT_WINDOW_MS: f64 = 1000.0;

impl FrameStats {
    pub(crate) fn record(&mut self, time: &FrameTime, step: Option<StepReport>) {
        self.frames += 1;
        self.window_frames += 1;

        if let Some(step) = step {
            self.simulated_frames += 1;
            self.sub_steps += step.sub_steps as u64;
            self.window_sub_steps += step.sub_steps;
        }

        let start = *self.window_start_ms.get_or_insert(time.timestamp_ms);
        let span = time.timestamp_ms - start;
        if span >= REPORT_WINDOW_MS {
            let fps = self.window_frames as f64 * 1000.0 / span;
            log::debug!(
                "{fps:.1} fps, {} physics sub-steps in the last {span:.0}ms",
                self.window_sub_steps
            );
            self.window_start_ms = Some(time.timestamp_ms);
            self.window_frames = 0;
            self.window_sub_steps = 0;
        } else if span < 0.0 {
            // Host timestamps went backwards; start a fresh window.
            self.window_start_ms = Some(time.timestamp_ms);
            self.window_frames = 0;
            self.window_sub_steps = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FrameClock;

    #[test]
    fn counts_frames_and_sub_steps() {
        let mut clock = FrameClock::new();
        let mut stats = FrameStats::default();

        stats.record(&clock.tick(0.0), None);
        stats.record(&clock.tick(16.0), Some(StepReport { sub_steps: 1, simulated: 1.0 / 60.0 }));
        stats.record(&clock.tick(2000.0), Some(StepReport { sub_steps: 3, simulated: 0.05 }));

        assert_eq!(stats.frames, 3);
        assert_eq!(stats.simulated_frames, 2);
        assert_eq!(stats.sub_steps, 4);
    }
}
