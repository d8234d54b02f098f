mod scenes;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use tickscape_engine::device::GpuInit;
use tickscape_engine::frame::{run_headless, LoopConfig, NullPresenter};
use tickscape_engine::logging::{init_logging, LoggingConfig};
use tickscape_engine::physics::StepConfig;
use tickscape_engine::window::{Runtime, RuntimeConfig};

use scenes::{Demo, SceneOptions};

/// Runs one of the daily demo scenes.
#[derive(Debug, Parser)]
#[command(name = "tickscape", version, about)]
struct Cli {
    /// Scene to run.
    #[arg(long, value_enum, default_value_t = Demo::Ground)]
    demo: Demo,

    /// Run without a window, feeding synthetic frame timestamps.
    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Milliseconds between headless frames.
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    interval_ms: f64,

    /// Physics sub-steps per second.
    #[arg(long, default_value_t = 60)]
    physics_hz: u32,

    /// Maximum physics sub-steps per frame.
    #[arg(long, default_value_t = 3)]
    max_sub_steps: u32,

    /// OBJ file for the model scenes.
    #[arg(long, default_value = "models/cat.obj")]
    model: PathBuf,

    /// Figures dropped onto the ground, stacked in three columns.
    #[arg(long, default_value_t = 1)]
    figures: usize,

    /// Log filter in env_logger syntax; overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,
}

impl Cli {
    fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            step: StepConfig {
                fixed_time_step: 1.0 / self.physics_hz.max(1) as f32,
                max_sub_steps: self.max_sub_steps,
            },
            ..LoopConfig::default()
        }
    }

    fn scene_options(&self) -> SceneOptions<'_> {
        SceneOptions {
            model_path: &self.model,
            figures: self.figures,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let mut frame_loop = scenes::build(cli.demo, cli.loop_config(), cli.scene_options());

    if cli.headless {
        let mut presenter = NullPresenter::new();
        let ran = run_headless(&mut frame_loop, &mut presenter, cli.frames, cli.interval_ms)?;
        frame_loop.finish_loads();

        let stats = frame_loop.stats();
        log::info!(
            "{ran} frames, {} simulated, {} physics sub-steps, {:.3}s simulated",
            stats.simulated_frames,
            stats.sub_steps,
            frame_loop.world().time()
        );
        for (_, node) in frame_loop.scene().iter() {
            log::info!("{:>8}  {:?}", node.name, node.transform.position);
        }
        return Ok(());
    }

    let config = RuntimeConfig {
        title: cli.demo.title().to_string(),
        ..RuntimeConfig::default()
    };
    Runtime::run(config, GpuInit::default(), frame_loop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["tickscape"]);
        assert_eq!(cli.demo, Demo::Ground);
        assert!(!cli.headless);
        assert_eq!(cli.loop_config().step, StepConfig::default());
        assert_eq!(cli.scene_options().figures, 1);
    }

    #[test]
    fn cli_headless_points() {
        let cli = Cli::parse_from([
            "tickscape", "--demo", "points", "--headless", "--frames", "10", "--physics-hz", "120",
        ]);
        assert_eq!(cli.demo, Demo::Points);
        assert!(cli.headless);
        assert_eq!(cli.frames, 10);
        assert_eq!(cli.loop_config().step.fixed_time_step, 1.0 / 120.0);
    }

    #[test]
    fn cli_figure_stack() {
        let cli = Cli::parse_from(["tickscape", "--demo", "tentacle", "--figures", "60"]);
        assert_eq!(cli.demo, Demo::Tentacle);
        assert_eq!(cli.scene_options().figures, 60);
    }
}
