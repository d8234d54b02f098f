//! Actor registry.
//!
//! Responsibilities:
//! - own the actors of a scene
//! - provide deterministic update order (insertion order)
//! - hand out stable handles for later removal

mod list;

pub use list::{ActorHandle, ActorRegistry};
