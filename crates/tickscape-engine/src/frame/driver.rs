use anyhow::Result;

use crate::actor::{Actor, Spawned, Update, UpdateCtx};
use crate::assets::LoadQueue;
use crate::physics::{PhysicsWorld, StepConfig, StepReport, WorldConfig};
use crate::registry::{ActorHandle, ActorRegistry};
use crate::scene::SceneGraph;
use crate::time::{FrameClock, FrameTime};

use super::present::{LoopControl, Present};
use super::stats::FrameStats;

/// Frame loop configuration.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LoopConfig {
    pub step: StepConfig,
    pub world: WorldConfig,
}

/// Owns one scene and drives it frame by frame.
///
/// Each call to [`frame`](Self::frame) runs, in order:
/// 1. apply asset loads completed since the previous frame
/// 2. tick the clock
/// 3. step the world and update every actor in registry order
///    (skipped on the first frame, which has no reference timestamp)
/// 4. present
///
/// The loop itself never schedules anything; the host decides when the next
/// frame happens and stops calling once it sees `LoopControl::Exit`.
pub struct FrameLoop {
    step: StepConfig,
    clock: FrameClock,
    world: PhysicsWorld,
    scene: SceneGraph,
    actors: ActorRegistry,
    loads: LoadQueue,
    stats: FrameStats,
}

impl FrameLoop {
    pub fn new(config: LoopConfig) -> Self {
        Self::with_scene(config, SceneGraph::new())
    }

    pub fn with_scene(config: LoopConfig, scene: SceneGraph) -> Self {
        Self {
            step: config.step,
            clock: FrameClock::new(),
            world: PhysicsWorld::new(config.world),
            scene,
            actors: ActorRegistry::new(),
            loads: LoadQueue::new(),
            stats: FrameStats::default(),
        }
    }

    /// Registers the actor of a freshly built object.
    pub fn add(&mut self, spawned: Spawned) -> ActorHandle {
        self.actors.add(spawned.actor)
    }

    pub fn add_actor(&mut self, actor: Actor) -> ActorHandle {
        self.actors.add(actor)
    }

    #[inline]
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    #[inline]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    #[inline]
    pub fn actors(&self) -> &ActorRegistry {
        &self.actors
    }

    #[inline]
    pub fn actors_mut(&mut self) -> &mut ActorRegistry {
        &mut self.actors
    }

    #[inline]
    pub fn loads_mut(&mut self) -> &mut LoadQueue {
        &mut self.loads
    }

    #[inline]
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Mutable access to the pieces scene builders need, borrowed together.
    pub fn build_parts(&mut self) -> (&mut PhysicsWorld, &mut SceneGraph, &mut LoadQueue) {
        (&mut self.world, &mut self.scene, &mut self.loads)
    }

    /// Forgets the last timestamp; the next frame simulates nothing.
    ///
    /// Call after the host was suspended so the gap isn't simulated.
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    /// Blocks until all pending asset loads are applied.
    pub fn finish_loads(&mut self) -> usize {
        self.loads.finish(&mut self.scene)
    }

    /// Runs everything for one frame except presenting.
    pub fn advance(&mut self, timestamp_ms: f64) -> FrameTime {
        self.loads.apply_completed(&mut self.scene);

        let time = self.clock.tick(timestamp_ms);
        let step = if time.is_first() {
            None
        } else {
            Some(self.simulate(&time))
        };

        self.stats.record(&time, step);
        time
    }

    /// Runs one full frame for host timestamp `timestamp_ms`.
    ///
    /// A presenter error is returned as-is and should end the loop.
    pub fn frame<P>(&mut self, timestamp_ms: f64, presenter: &mut P) -> Result<LoopControl>
    where
        P: Present + ?Sized,
    {
        let time = self.advance(timestamp_ms);
        presenter.present(&self.scene, &time)
    }

    fn simulate(&mut self, time: &FrameTime) -> StepReport {
        let report = self.world.step_with(self.step, time.dt);

        let mut ctx = UpdateCtx {
            dt: time.dt,
            time: *time,
            world: &self.world,
            scene: &mut self.scene,
        };
        self.actors
            .for_each_mut(|actor| actor.update(&mut ctx));

        log::trace!(
            "frame {}: dt {:.4}s, {} sub-steps, {} actors",
            time.frame_index,
            time.dt,
            report.sub_steps,
            self.actors.len()
        );

        report
    }
}
