//! Asset loading.
//!
//! Loads run off the frame thread and are applied to the scene between frames.
//! Only Wavefront OBJ geometry is understood.

mod obj;
mod queue;

pub use obj::{load_obj, parse_obj, ModelData};
pub use queue::{spawn_model, LoadQueue};
