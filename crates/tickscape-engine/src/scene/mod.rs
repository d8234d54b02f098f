//! Scene graph types.
//!
//! Responsibilities:
//! - hold the visual nodes that actors write transforms into
//! - carry frame-wide presentation state (background color)
//!
//! Nodes describe *what* is shown; building meshes and materials is the
//! presenter's business.

mod color;
mod graph;
mod node;

pub use color::Color;
pub use graph::SceneGraph;
pub use node::{NodeId, NodeKind, Transform, VisualNode};
