use glam::{Quat, Vec3};

/// Stable reference to a body inside a [`PhysicsWorld`](super::PhysicsWorld).
///
/// Bodies are never removed, so a handle stays valid for the world's lifetime.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Collision shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    /// Infinite plane. The local normal is `+Z`, rotated by the body orientation.
    Plane,
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
}

impl Shape {
    /// Distance from the body origin to the farthest surface point along `normal`.
    ///
    /// `Plane` has no extent and always reports zero.
    pub fn support(&self, orientation: Quat, normal: Vec3) -> f32 {
        match *self {
            Shape::Plane => 0.0,
            Shape::Sphere { radius } => radius,
            Shape::Box { half_extents } => {
                let x = orientation * Vec3::X * half_extents.x;
                let y = orientation * Vec3::Y * half_extents.y;
                let z = orientation * Vec3::Z * half_extents.z;
                x.dot(normal).abs() + y.dot(normal).abs() + z.dot(normal).abs()
            }
        }
    }
}

/// Position + orientation snapshot of a body.
///
/// Read-only copy; the world keeps the authoritative value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PoseSample {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for PoseSample {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

/// Construction parameters for a rigid body.
///
/// `mass == 0` makes the body static: it is never integrated and acts as
/// an immovable collider.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BodyDesc {
    pub mass: f32,
    pub shape: Shape,
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Fraction of normal velocity kept when bouncing off a plane.
    pub restitution: f32,
}

impl BodyDesc {
    pub fn new(mass: f32, shape: Shape) -> Self {
        Self {
            mass,
            shape,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            restitution: 0.0,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn oriented(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: Vec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }
}

/// Simulated rigid body.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub mass: f32,
    pub shape: Shape,
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub restitution: f32,
}

impl RigidBody {
    pub(crate) fn from_desc(desc: BodyDesc) -> Self {
        Self {
            mass: desc.mass.max(0.0),
            shape: desc.shape,
            position: desc.position,
            orientation: desc.orientation.normalize(),
            velocity: desc.velocity,
            angular_velocity: desc.angular_velocity,
            restitution: desc.restitution,
        }
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.mass <= 0.0
    }

    #[inline]
    pub fn pose(&self) -> PoseSample {
        PoseSample {
            position: self.position,
            orientation: self.orientation,
        }
    }

    /// World-space plane normal. Only meaningful for `Shape::Plane`.
    #[inline]
    pub fn plane_normal(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    /// Semi-implicit Euler step of size `h` under `gravity`.
    pub(crate) fn integrate(&mut self, gravity: Vec3, h: f32) {
        if self.is_static() {
            return;
        }

        self.velocity += gravity * h;
        self.position += self.velocity * h;

        if self.angular_velocity != Vec3::ZERO {
            let spin = Quat::from_scaled_axis(self.angular_velocity * h);
            self.orientation = (spin * self.orientation).normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn zero_mass_is_static() {
        let body = RigidBody::from_desc(BodyDesc::new(0.0, Shape::Plane));
        assert!(body.is_static());
    }

    #[test]
    fn negative_mass_is_treated_as_static() {
        let body = RigidBody::from_desc(BodyDesc::new(-3.0, Shape::Sphere { radius: 1.0 }));
        assert!(body.is_static());
    }

    #[test]
    fn static_body_does_not_integrate() {
        let mut body = RigidBody::from_desc(
            BodyDesc::new(0.0, Shape::Plane).with_velocity(Vec3::X),
        );
        body.integrate(Vec3::new(0.0, -9.82, 0.0), 1.0);
        assert_eq!(body.position, Vec3::ZERO);
    }

    #[test]
    fn ground_plane_rotated_to_face_up() {
        // A plane turned -90° about X faces +Y, which is how ground is laid out.
        let body = RigidBody::from_desc(
            BodyDesc::new(0.0, Shape::Plane).oriented(Quat::from_rotation_x(-FRAC_PI_2)),
        );
        let n = body.plane_normal();
        assert!((n - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn box_support_follows_orientation() {
        let shape = Shape::Box { half_extents: Vec3::new(2.0, 0.5, 1.0) };
        assert!((shape.support(Quat::IDENTITY, Vec3::Y) - 0.5).abs() < 1e-6);

        let turned = Quat::from_rotation_z(FRAC_PI_2);
        assert!((shape.support(turned, Vec3::Y) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn restitution_is_clamped() {
        let desc = BodyDesc::new(1.0, Shape::Sphere { radius: 1.0 }).with_restitution(4.0);
        assert_eq!(desc.restitution, 1.0);
    }
}
