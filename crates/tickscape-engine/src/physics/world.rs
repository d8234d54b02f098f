use glam::Vec3;

use super::body::{BodyDesc, BodyHandle, PoseSample, RigidBody};
use super::contact::{self, PlaneCollider};

/// Fixed-step parameters for [`PhysicsWorld::step`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StepConfig {
    /// Seconds covered by one internal sub-step.
    pub fixed_time_step: f32,
    /// Upper bound on sub-steps taken by a single `step` call.
    pub max_sub_steps: u32,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            fixed_time_step: 1.0 / 60.0,
            max_sub_steps: 3,
        }
    }
}

/// World construction parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WorldConfig {
    /// Gravity in m/s².
    pub gravity: Vec3,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.82, 0.0),
        }
    }
}

/// Outcome of one [`PhysicsWorld::step`] call.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct StepReport {
    pub sub_steps: u32,
    /// Simulated seconds covered, `sub_steps * fixed_time_step`.
    pub simulated: f32,
}

/// Absorbs float error so that `elapsed == n * fixed` maps to exactly `n` sub-steps.
const SUB_STEP_EPSILON: f64 = 1e-6;

/// Number of fixed sub-steps needed to cover `elapsed`, capped at `max_sub_steps`.
///
/// Non-positive, non-finite, or degenerate inputs yield zero.
pub fn sub_step_count(fixed_time_step: f32, elapsed: f32, max_sub_steps: u32) -> u32 {
    if !(fixed_time_step > 0.0) || !(elapsed > 0.0) || !elapsed.is_finite() {
        return 0;
    }

    let ratio = elapsed as f64 / fixed_time_step as f64;
    let needed = (ratio - SUB_STEP_EPSILON).ceil();
    if needed <= 0.0 {
        return 0;
    }

    if needed >= max_sub_steps as f64 {
        max_sub_steps
    } else {
        needed as u32
    }
}

/// Rigid-body world stepped with a fixed internal time step.
///
/// Large frame gaps are not fully caught up: at most `max_sub_steps` are run per call,
/// so simulated time falls behind wall time instead of the frame stalling.
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    gravity: Vec3,
    bodies: Vec<RigidBody>,
    time: f64,
    planes: Vec<PlaneCollider>,
}

impl PhysicsWorld {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            gravity: config.gravity,
            bodies: Vec::new(),
            time: 0.0,
            planes: Vec::new(),
        }
    }

    #[inline]
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Total simulated seconds.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(RigidBody::from_desc(desc));
        log::trace!("body {:?} added: {:?}", handle, desc.shape);
        handle
    }

    #[inline]
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.index())
    }

    /// Current pose of `handle`, or `None` for a handle from another world.
    #[inline]
    pub fn pose(&self, handle: BodyHandle) -> Option<PoseSample> {
        self.body(handle).map(RigidBody::pose)
    }

    /// Advances the simulation by `elapsed` seconds of wall time.
    ///
    /// Runs `min(max_sub_steps, ceil(elapsed / fixed_time_step))` sub-steps of
    /// `fixed_time_step` each.
    pub fn step(&mut self, fixed_time_step: f32, elapsed: f32, max_sub_steps: u32) -> StepReport {
        let sub_steps = sub_step_count(fixed_time_step, elapsed, max_sub_steps);
        if sub_steps == 0 {
            return StepReport::default();
        }

        self.collect_planes();

        for _ in 0..sub_steps {
            self.sub_step(fixed_time_step);
        }

        let simulated = sub_steps as f32 * fixed_time_step;
        self.time += sub_steps as f64 * fixed_time_step as f64;

        if sub_steps == max_sub_steps && elapsed > simulated {
            log::trace!(
                "physics fell behind: {:.4}s requested, {:.4}s simulated",
                elapsed,
                simulated
            );
        }

        StepReport { sub_steps, simulated }
    }

    /// Steps with the values from `config`.
    #[inline]
    pub fn step_with(&mut self, config: StepConfig, elapsed: f32) -> StepReport {
        self.step(config.fixed_time_step, elapsed, config.max_sub_steps)
    }

    fn collect_planes(&mut self) {
        self.planes.clear();
        self.planes
            .extend(self.bodies.iter().filter_map(PlaneCollider::from_body));
    }

    fn sub_step(&mut self, h: f32) {
        for body in self.bodies.iter_mut() {
            if body.is_static() {
                continue;
            }

            body.integrate(self.gravity, h);

            for plane in &self.planes {
                contact::resolve_plane(body, plane);
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}
