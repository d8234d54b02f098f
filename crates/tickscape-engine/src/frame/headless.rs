use anyhow::Result;

use super::driver::FrameLoop;
use super::present::{LoopControl, Present};

/// Drives `frame_loop` with synthetic timestamps spaced `interval_ms` apart.
///
/// Stops after `frames` frames or when the presenter asks to exit, whichever
/// comes first. Returns the number of frames run.
pub fn run_headless<P>(
    frame_loop: &mut FrameLoop,
    presenter: &mut P,
    frames: u64,
    interval_ms: f64,
) -> Result<u64>
where
    P: Present + ?Sized,
{
    let mut ran = 0;
    for i in 0..frames {
        let timestamp_ms = i as f64 * interval_ms;
        ran += 1;
        if frame_loop.frame(timestamp_ms, presenter)? == LoopControl::Exit {
            log::info!("presenter requested exit after {ran} frames");
            break;
        }
    }
    Ok(ran)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{LoopConfig, NullPresenter};
    use crate::scene::SceneGraph;
    use crate::time::FrameTime;

    struct StopAfter(u64);

    impl Present for StopAfter {
        fn present(&mut self, _scene: &SceneGraph, time: &FrameTime) -> Result<LoopControl> {
            Ok(if time.frame_index + 1 >= self.0 {
                LoopControl::Exit
            } else {
                LoopControl::Continue
            })
        }
    }

    #[test]
    fn runs_requested_frame_count() {
        let mut frame_loop = FrameLoop::new(LoopConfig::default());
        let mut presenter = NullPresenter::new();
        let ran = run_headless(&mut frame_loop, &mut presenter, 10, 16.0).expect("headless run");
        assert_eq!(ran, 10);
        assert_eq!(presenter.presented(), 10);
        assert_eq!(frame_loop.stats().simulated_frames, 9);
    }

    #[test]
    fn exit_stops_early() {
        let mut frame_loop = FrameLoop::new(LoopConfig::default());
        let ran = run_headless(&mut frame_loop, &mut StopAfter(4), 100, 16.0).expect("headless run");
        assert_eq!(ran, 4);
    }
}
