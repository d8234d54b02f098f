use anyhow::Result;

use crate::scene::SceneGraph;
use crate::time::FrameTime;

/// Control directive returned after each frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Final stage of a frame: show the scene.
///
/// An `Err` is fatal to the loop. Presenters that can recover from a bad
/// frame should do so internally and return `Ok(LoopControl::Continue)`.
pub trait Present {
    fn present(&mut self, scene: &SceneGraph, time: &FrameTime) -> Result<LoopControl>;
}

/// Presenter that shows nothing. Used for headless runs.
#[derive(Debug, Default)]
pub struct NullPresenter {
    presented: u64,
}

impl NullPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Present for NullPresenter {
    fn present(&mut self, _scene: &SceneGraph, _time: &FrameTime) -> Result<LoopControl> {
        self.presented += 1;
        Ok(LoopControl::Continue)
    }
}
