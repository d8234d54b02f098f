use glam::{Quat, Vec3};

use crate::physics::PoseSample;

/// Handle to a node in a [`SceneGraph`](super::SceneGraph).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Local transform of a visual node.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    #[inline]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    #[inline]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Overwrites position and rotation from a physics pose. Scale is kept.
    #[inline]
    pub fn mirror(&mut self, pose: PoseSample) {
        self.position = pose.position;
        self.rotation = pose.orientation;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What a node stands for. Construction of the actual GPU resources lives elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh { label: String },
    Points { count: usize },
    Model { vertices: usize, faces: usize },
}

/// A node in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualNode {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    pub visible: bool,
}
