//! tickscape engine crate.
//!
//! A per-frame actor loop: a clock turns host timestamps into deltas, a
//! fixed-step physics world advances, actors mirror the results into scene
//! nodes, and a presenter shows the scene. The winit/wgpu host is one way to
//! drive it; `frame::run_headless` is another.

pub mod actor;
pub mod assets;
pub mod device;
pub mod frame;
pub mod physics;
pub mod registry;
pub mod scene;
pub mod time;
pub mod window;

pub mod logging;
