//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per render loop
//! - feed it the host's frame timestamp once per presented frame to obtain `FrameTime`
//! - use `HostClock` when the host has no timestamp of its own

mod frame_clock;
mod host_clock;

pub use frame_clock::{FrameClock, FrameTime};
pub use host_clock::HostClock;
