//! Actors: the things the frame loop advances.
//!
//! An actor is one tagged variant of [`Actor`]; the loop matches them
//! exhaustively. Builders in `spawn` create the body/node pair an actor
//! works on and return it without registering anything.

mod kind;
mod spawn;

pub use kind::{Actor, BoneDrive, Update, UpdateCtx};
pub use spawn::{
    spawn_ball, spawn_figure, spawn_ground, spawn_point_field, spawn_scenery, spawn_tentacle, Spawned,
};
