//! Frame loop driver.
//!
//! This module defines the contract between a host that schedules frames
//! (the winit runtime, a headless driver, a test) and the scene it animates.

mod driver;
mod headless;
mod present;
mod stats;

pub use driver::{FrameLoop, LoopConfig};
pub use headless::run_headless;
pub use present::{LoopControl, NullPresenter, Present};
pub use stats::FrameStats;
