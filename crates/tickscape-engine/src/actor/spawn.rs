use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use crate::physics::{BodyDesc, BodyHandle, PhysicsWorld, Shape};
use crate::scene::{NodeId, NodeKind, SceneGraph, Transform};

use super::{Actor, BoneDrive};

/// Result of assembling one scene object.
///
/// Builders only create things; handing the actor to a registry is up to the caller.
#[derive(Debug)]
pub struct Spawned {
    pub actor: Actor,
    pub node: Option<NodeId>,
    pub body: Option<BodyHandle>,
}

/// Static ground plane facing `+Y`, mirrored into a mesh node.
pub fn spawn_ground(
    world: &mut PhysicsWorld,
    scene: &mut SceneGraph,
    position: Vec3,
    width: f32,
    depth: f32,
) -> Spawned {
    let facing_up = Quat::from_rotation_x(-FRAC_PI_2);

    let body = world.add_body(
        BodyDesc::new(0.0, Shape::Plane)
            .at(position)
            .oriented(facing_up),
    );

    let node = scene.spawn(
        "ground",
        NodeKind::Mesh { label: format!("plane {width}x{depth}") },
        Transform::from_position(position).with_rotation(facing_up),
    );

    Spawned {
        actor: Actor::BodyMirror { body, node },
        node: Some(node),
        body: Some(body),
    }
}

/// Dynamic figure: a 1m box collider (5kg) under a sphere-on-cone mesh.
pub fn spawn_figure(world: &mut PhysicsWorld, scene: &mut SceneGraph, position: Vec3) -> Spawned {
    const HALF_SIZE: f32 = 0.5;
    const MASS: f32 = 5.0;

    let body = world.add_body(
        BodyDesc::new(MASS, Shape::Box { half_extents: Vec3::splat(HALF_SIZE) }).at(position),
    );

    let node = scene.spawn(
        "figure",
        NodeKind::Mesh { label: "sphere+cone".to_string() },
        Transform::from_position(position),
    );

    Spawned {
        actor: Actor::BodyMirror { body, node },
        node: Some(node),
        body: Some(body),
    }
}

/// Dynamic sphere of the given radius and mass.
pub fn spawn_ball(
    world: &mut PhysicsWorld,
    scene: &mut SceneGraph,
    position: Vec3,
    radius: f32,
    mass: f32,
) -> Spawned {
    let body = world.add_body(BodyDesc::new(mass, Shape::Sphere { radius }).at(position));

    let node = scene.spawn(
        "ball",
        NodeKind::Mesh { label: format!("sphere r={radius}") },
        Transform::from_position(position),
    );

    Spawned {
        actor: Actor::BodyMirror { body, node },
        node: Some(node),
        body: Some(body),
    }
}

/// Point cloud rotating at `rate` radians per second per axis.
pub fn spawn_point_field(scene: &mut SceneGraph, count: usize, rate: Vec3) -> Spawned {
    let node = scene.spawn("points", NodeKind::Points { count }, Transform::IDENTITY);

    Spawned {
        actor: Actor::spin(node, rate),
        node: Some(node),
        body: None,
    }
}

/// Joint swings of the animated tentacle: `(axis, frequency, amplitude)` for
/// bones 1, 2 and 3. Bone 0 is the anchor and stays put.
const TENTACLE_SWINGS: [(Vec3, f32, f32); 3] = [
    (Vec3::Z, 1.0, 0.5),
    (Vec3::Y, 2.0, 1.0),
    (Vec3::X, 3.0, 0.5),
];

/// Skeleton of `segments + 1` bones stacked along `+Y`, `segment_length` apart,
/// under a `tentacle` group node. Bones past the third are carried but not driven.
pub fn spawn_tentacle(
    scene: &mut SceneGraph,
    position: Vec3,
    segments: usize,
    segment_length: f32,
) -> Spawned {
    let root = scene.spawn("tentacle", NodeKind::Group, Transform::from_position(position));

    let bones: Vec<NodeId> = (0..=segments)
        .map(|i| {
            let at = position + Vec3::Y * (i as f32 * segment_length);
            scene.spawn(format!("bone{i}"), NodeKind::Group, Transform::from_position(at))
        })
        .collect();

    let drives = bones
        .iter()
        .skip(1)
        .zip(TENTACLE_SWINGS)
        .map(|(&node, (axis, frequency, amplitude))| BoneDrive {
            node,
            axis,
            frequency,
            amplitude,
        })
        .collect();

    Spawned {
        actor: Actor::bone_chain(drives),
        node: Some(root),
        body: None,
    }
}

/// Fixed scenery with no simulation, e.g. a title label.
pub fn spawn_scenery(
    scene: &mut SceneGraph,
    name: &str,
    kind: NodeKind,
    transform: Transform,
) -> Spawned {
    let node = scene.spawn(name, kind, transform);

    Spawned {
        actor: Actor::Static { node },
        node: Some(node),
        body: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_is_static_and_faces_up() {
        let mut world = PhysicsWorld::default();
        let mut scene = SceneGraph::new();
        let spawned = spawn_ground(&mut world, &mut scene, Vec3::ZERO, 100.0, 100.0);

        let body = spawned.body.and_then(|b| world.body(b)).expect("ground body");
        assert!(body.is_static());
        assert!((body.plane_normal() - Vec3::Y).length() < 1e-6);
        assert!(matches!(spawned.actor, Actor::BodyMirror { .. }));
    }

    #[test]
    fn figure_node_starts_at_body_position() {
        let mut world = PhysicsWorld::default();
        let mut scene = SceneGraph::new();
        let at = Vec3::new(0.0, 4.0, 1.0);
        let spawned = spawn_figure(&mut world, &mut scene, at);

        let node = spawned.node.and_then(|n| scene.transform(n)).expect("figure node");
        assert_eq!(node.position, at);
        let pose = spawned.body.and_then(|b| world.pose(b)).expect("figure pose");
        assert_eq!(pose.position, at);
    }

    #[test]
    fn point_field_has_no_body() {
        let mut scene = SceneGraph::new();
        let spawned = spawn_point_field(&mut scene, 500, Vec3::Y);
        assert!(spawned.body.is_none());
        assert_eq!(spawned.actor.kind_name(), "spin");
    }

    #[test]
    fn tentacle_drives_the_first_three_joints() {
        let mut scene = SceneGraph::new();
        let spawned = spawn_tentacle(&mut scene, Vec3::new(0.0, 5.0, 0.0), 5, 1.0);

        // Group plus six bones.
        assert_eq!(scene.len(), 7);
        let top = scene.find("bone5").and_then(|id| scene.transform(id)).expect("bone5");
        assert_eq!(top.position, Vec3::new(0.0, 10.0, 0.0));

        let Actor::BoneChain { drives, .. } = &spawned.actor else {
            panic!("expected a bone chain, got {:?}", spawned.actor);
        };
        let driven: Vec<_> = drives.iter().map(|d| d.node).collect();
        let expected: Vec<_> = ["bone1", "bone2", "bone3"]
            .iter()
            .map(|name| scene.find(name).expect("bone"))
            .collect();
        assert_eq!(driven, expected);
        assert_eq!(drives[1].axis, Vec3::Y);
    }

    #[test]
    fn short_tentacle_drives_what_it_has() {
        let mut scene = SceneGraph::new();
        let spawned = spawn_tentacle(&mut scene, Vec3::ZERO, 1, 0.5);
        assert!(matches!(&spawned.actor, Actor::BoneChain { drives, .. } if drives.len() == 1));
    }
}
