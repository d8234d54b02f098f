//! Rigid-body simulation.
//!
//! A deliberately small world: gravity, semi-implicit Euler integration, and
//! dynamic bodies resting on static planes. Everything the frame loop needs is
//! `PhysicsWorld::step` plus reading body poses back out.

mod body;
mod contact;
mod world;

pub use body::{BodyDesc, BodyHandle, PoseSample, RigidBody, Shape};
pub use world::{sub_step_count, PhysicsWorld, StepConfig, StepReport, WorldConfig};
