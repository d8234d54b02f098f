use glam::Vec3;

use super::body::{RigidBody, Shape};

/// Static plane collider, captured once per sub-step.
#[derive(Debug, Copy, Clone)]
pub(crate) struct PlaneCollider {
    point: Vec3,
    normal: Vec3,
}

impl PlaneCollider {
    pub(crate) fn from_body(body: &RigidBody) -> Option<Self> {
        if body.is_static() && body.shape == Shape::Plane {
            Some(Self {
                point: body.position,
                normal: body.plane_normal(),
            })
        } else {
            None
        }
    }
}

/// Pushes a dynamic body out of `plane` and removes the inward normal velocity.
///
/// Returns `true` when a contact was resolved.
pub(crate) fn resolve_plane(body: &mut RigidBody, plane: &PlaneCollider) -> bool {
    if body.is_static() || body.shape == Shape::Plane {
        return false;
    }

    let extent = body.shape.support(body.orientation, plane.normal);
    let distance = (body.position - plane.point).dot(plane.normal);
    let penetration = extent - distance;
    if penetration <= 0.0 {
        return false;
    }

    body.position += plane.normal * penetration;

    let normal_speed = body.velocity.dot(plane.normal);
    if normal_speed < 0.0 {
        body.velocity -= plane.normal * normal_speed * (1.0 + body.restitution);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BodyDesc;

    fn floor() -> PlaneCollider {
        PlaneCollider { point: Vec3::ZERO, normal: Vec3::Y }
    }

    #[test]
    fn separated_body_is_untouched() {
        let mut ball = RigidBody::from_desc(
            BodyDesc::new(1.0, Shape::Sphere { radius: 0.5 }).at(Vec3::new(0.0, 2.0, 0.0)),
        );
        assert!(!resolve_plane(&mut ball, &floor()));
        assert_eq!(ball.position.y, 2.0);
    }

    #[test]
    fn penetrating_sphere_is_pushed_out_and_stopped() {
        let mut ball = RigidBody::from_desc(
            BodyDesc::new(1.0, Shape::Sphere { radius: 0.5 })
                .at(Vec3::new(0.0, 0.25, 0.0))
                .with_velocity(Vec3::new(1.0, -3.0, 0.0)),
        );
        assert!(resolve_plane(&mut ball, &floor()));
        assert!((ball.position.y - 0.5).abs() < 1e-6);
        assert_eq!(ball.velocity.y, 0.0);
        // Tangential velocity is preserved.
        assert_eq!(ball.velocity.x, 1.0);
    }

    #[test]
    fn restitution_reflects_normal_velocity() {
        let mut ball = RigidBody::from_desc(
            BodyDesc::new(1.0, Shape::Sphere { radius: 0.5 })
                .at(Vec3::new(0.0, 0.4, 0.0))
                .with_velocity(Vec3::new(0.0, -2.0, 0.0))
                .with_restitution(0.5),
        );
        resolve_plane(&mut ball, &floor());
        assert!((ball.velocity.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn plane_collider_requires_static_plane() {
        let dynamic = RigidBody::from_desc(BodyDesc::new(1.0, Shape::Plane));
        assert!(PlaneCollider::from_body(&dynamic).is_none());

        let ball = RigidBody::from_desc(BodyDesc::new(0.0, Shape::Sphere { radius: 1.0 }));
        assert!(PlaneCollider::from_body(&ball).is_none());
    }
}
