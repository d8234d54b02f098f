use core::fmt;

use glam::{EulerRot, Quat, Vec3};

use crate::physics::{BodyHandle, PhysicsWorld};
use crate::scene::{NodeId, SceneGraph};
use crate::time::FrameTime;

/// Per-update context handed to every actor.
///
/// The world is read-only here: actors mirror simulation results, they never drive them.
pub struct UpdateCtx<'a> {
    /// Seconds since the previous frame.
    pub dt: f32,
    pub time: FrameTime,
    pub world: &'a PhysicsWorld,
    pub scene: &'a mut SceneGraph,
}

/// Per-frame update contract.
pub trait Update {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>);
}

/// One oscillating joint of an [`Actor::BoneChain`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoneDrive {
    pub node: NodeId,
    /// Rotation axis, unit length.
    pub axis: Vec3,
    /// Radians per second.
    pub frequency: f32,
    /// Peak angle in radians.
    pub amplitude: f32,
}

impl BoneDrive {
    /// Joint angle after `seconds` of animation.
    #[inline]
    pub fn angle_at(&self, seconds: f32) -> f32 {
        (seconds * self.frequency).sin() * self.amplitude
    }
}

/// Unit participating in the frame loop.
///
/// Each variant touches only the node it owns.
pub enum Actor {
    /// Scenery that never changes after construction.
    Static { node: NodeId },

    /// Copies a body's pose into a node every frame.
    BodyMirror { body: BodyHandle, node: NodeId },

    /// Placeholder for content that arrives through an asset load.
    ///
    /// The load completion inserts the content once; the actor itself does nothing.
    Deferred { label: String },

    /// Rotates a node at a constant rate, in radians per second per axis.
    Spin { node: NodeId, rate: Vec3, elapsed: f32 },

    /// Swings each joint of a skeleton as `sin(t * frequency) * amplitude`
    /// about its axis, `t` being the animation time accumulated so far.
    BoneChain { drives: Vec<BoneDrive>, elapsed: f32 },

    /// Demo-specific behavior.
    Custom(Box<dyn Update>),
}

impl Actor {
    pub fn spin(node: NodeId, rate: Vec3) -> Self {
        Actor::Spin { node, rate, elapsed: 0.0 }
    }

    pub fn bone_chain(drives: Vec<BoneDrive>) -> Self {
        Actor::BoneChain { drives, elapsed: 0.0 }
    }

    pub fn custom(update: impl Update + 'static) -> Self {
        Actor::Custom(Box::new(update))
    }

    /// Short variant name, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Actor::Static { .. } => "static",
            Actor::BodyMirror { .. } => "body-mirror",
            Actor::Deferred { .. } => "deferred",
            Actor::Spin { .. } => "spin",
            Actor::BoneChain { .. } => "bone-chain",
            Actor::Custom(_) => "custom",
        }
    }
}

impl Update for Actor {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) {
        match self {
            Actor::Static { .. } | Actor::Deferred { .. } => {}

            Actor::BodyMirror { body, node } => {
                let Some(pose) = ctx.world.pose(*body) else {
                    log::trace!("mirror: body {:?} not in world", body);
                    return;
                };
                if let Some(t) = ctx.scene.transform_mut(*node) {
                    t.mirror(pose);
                }
            }

            Actor::Spin { node, rate, elapsed } => {
                *elapsed += ctx.dt.max(0.0);
                let angles = *rate * *elapsed;
                if let Some(t) = ctx.scene.transform_mut(*node) {
                    t.rotation = Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z);
                }
            }

            Actor::BoneChain { drives, elapsed } => {
                *elapsed += ctx.dt.max(0.0);
                for drive in drives.iter() {
                    if let Some(t) = ctx.scene.transform_mut(drive.node) {
                        t.rotation = Quat::from_axis_angle(drive.axis, drive.angle_at(*elapsed));
                    }
                }
            }

            Actor::Custom(inner) => inner.update(ctx),
        }
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Static { node } => f.debug_struct("Static").field("node", node).finish(),
            Actor::BodyMirror { body, node } => f
                .debug_struct("BodyMirror")
                .field("body", body)
                .field("node", node)
                .finish(),
            Actor::Deferred { label } => f.debug_struct("Deferred").field("label", label).finish(),
            Actor::Spin { node, rate, elapsed } => f
                .debug_struct("Spin")
                .field("node", node)
                .field("rate", rate)
                .field("elapsed", elapsed)
                .finish(),
            Actor::BoneChain { drives, elapsed } => f
                .debug_struct("BoneChain")
                .field("drives", drives)
                .field("elapsed", elapsed)
                .finish(),
            Actor::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
