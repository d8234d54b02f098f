use std::path::Path;

use clap::ValueEnum;
use glam::Vec3;

use tickscape_engine::actor::{
    spawn_figure, spawn_ground, spawn_point_field, spawn_scenery, spawn_tentacle,
};
use tickscape_engine::assets::spawn_model;
use tickscape_engine::frame::{FrameLoop, LoopConfig};
use tickscape_engine::scene::{Color, NodeKind, SceneGraph, Transform};

/// Demo scenes, one per practice day they come from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum Demo {
    /// Figure dropped onto a ground plane.
    Ground,
    /// Half a million points turning slowly.
    Points,
    /// OBJ model streamed in after start-up.
    Model,
    /// Swaying bone chain.
    Tentacle,
    /// Everything at once.
    Combined,
}

impl Demo {
    pub fn title(self) -> &'static str {
        match self {
            Demo::Ground => "tickscape: ground",
            Demo::Points => "tickscape: points",
            Demo::Model => "tickscape: model",
            Demo::Tentacle => "tickscape: tentacle",
            Demo::Combined => "tickscape: combined",
        }
    }

    fn background(self) -> Color {
        match self {
            Demo::Points => Color::from_hex(0x050505),
            _ => Color::from_hex(0x707070),
        }
    }
}

const POINT_COUNT: usize = 500_000;
const TENTACLE_SEGMENTS: usize = 5;

/// Scene contents that can be chosen on the command line.
#[derive(Debug, Clone, Copy)]
pub struct SceneOptions<'a> {
    /// OBJ file for the model scenes.
    pub model_path: &'a Path,
    /// Figures dropped in the ground scenes.
    pub figures: usize,
}

/// Builds the frame loop for `demo`.
pub fn build(demo: Demo, config: LoopConfig, options: SceneOptions<'_>) -> FrameLoop {
    let scene = SceneGraph::new().with_background(demo.background());
    let mut frame_loop = FrameLoop::with_scene(config, scene);

    add_title(&mut frame_loop, demo.title());

    match demo {
        Demo::Ground => add_ground_and_figures(&mut frame_loop, options.figures),
        Demo::Points => add_points(&mut frame_loop),
        Demo::Model => add_model(&mut frame_loop, options.model_path),
        Demo::Tentacle => add_tentacle(&mut frame_loop),
        Demo::Combined => {
            add_ground_and_figures(&mut frame_loop, options.figures);
            add_points(&mut frame_loop);
            add_model(&mut frame_loop, options.model_path);
            add_tentacle(&mut frame_loop);
        }
    }

    log::info!(
        "{:?}: {} actors, {} nodes, {} bodies",
        demo,
        frame_loop.actors().len(),
        frame_loop.scene().len(),
        frame_loop.world().body_count()
    );

    frame_loop
}

fn add_title(frame_loop: &mut FrameLoop, title: &str) {
    let (_, scene, _) = frame_loop.build_parts();
    let label = spawn_scenery(
        scene,
        "title",
        NodeKind::Mesh { label: title.to_string() },
        Transform::from_position(Vec3::new(0.0, 0.0, -1.0)).with_scale(Vec3::splat(0.01)),
    );
    frame_loop.add(label);
}

/// Drop point of figure `i`: three staggered columns, one row higher every three figures.
fn figure_position(i: usize) -> Vec3 {
    const COLUMNS: [Vec3; 3] = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, -2.0),
        Vec3::new(-2.0, 2.0, 0.0),
    ];
    let row = (i / COLUMNS.len()) as f32;
    Vec3::new(0.0, 5.0 + row, 0.0) + COLUMNS[i % COLUMNS.len()]
}

fn add_ground_and_figures(frame_loop: &mut FrameLoop, figures: usize) {
    let (world, scene, _) = frame_loop.build_parts();
    let ground = spawn_ground(world, scene, Vec3::ZERO, 100.0, 100.0);
    let figures: Vec<_> = (0..figures)
        .map(|i| spawn_figure(world, scene, figure_position(i)))
        .collect();

    frame_loop.add(ground);
    for figure in figures {
        frame_loop.add(figure);
    }
}

fn add_tentacle(frame_loop: &mut FrameLoop) {
    let (_, scene, _) = frame_loop.build_parts();
    let tentacle = spawn_tentacle(scene, Vec3::new(0.0, 5.0, 0.0), TENTACLE_SEGMENTS, 1.25);
    frame_loop.add(tentacle);
}

fn add_points(frame_loop: &mut FrameLoop) {
    let (_, scene, _) = frame_loop.build_parts();
    let points = spawn_point_field(scene, POINT_COUNT, Vec3::new(0.25, 0.5, 0.0));
    frame_loop.add(points);
}

fn add_model(frame_loop: &mut FrameLoop, path: &Path) {
    let (_, _, loads) = frame_loop.build_parts();
    let model = spawn_model(loads, path, Transform::IDENTITY);
    frame_loop.add(model);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickscape_engine::frame::{run_headless, NullPresenter};

    fn options(figures: usize) -> SceneOptions<'static> {
        SceneOptions {
            model_path: Path::new("unused.obj"),
            figures,
        }
    }

    #[test]
    fn ground_scene_has_two_bodies() {
        let frame_loop = build(Demo::Ground, LoopConfig::default(), options(1));
        assert_eq!(frame_loop.world().body_count(), 2);
        assert_eq!(frame_loop.actors().len(), 3);
        assert!(frame_loop.scene().find("figure").is_some());
    }

    #[test]
    fn points_scene_has_no_physics() {
        let frame_loop = build(Demo::Points, LoopConfig::default(), options(1));
        assert_eq!(frame_loop.world().body_count(), 0);
        assert_eq!(frame_loop.scene().background, Color::from_hex(0x050505));
    }

    #[test]
    fn bundled_model_parses() {
        let model = tickscape_engine::assets::parse_obj(include_str!("../../../models/cat.obj"))
            .expect("bundled model");
        assert_eq!(model.vertices.len(), 4);
        assert_eq!(model.faces.len(), 4);
    }

    #[test]
    fn missing_model_is_skipped() {
        let options = SceneOptions {
            model_path: Path::new("/nowhere/cat.obj"),
            figures: 1,
        };
        let mut frame_loop = build(Demo::Model, LoopConfig::default(), options);
        let nodes_before = frame_loop.scene().len();
        assert_eq!(frame_loop.finish_loads(), 1);
        assert_eq!(frame_loop.scene().len(), nodes_before);
    }

    #[test]
    fn figure_stack_uses_three_columns() {
        let frame_loop = build(Demo::Ground, LoopConfig::default(), options(60));
        // Ground plus sixty figures, plus the title.
        assert_eq!(frame_loop.world().body_count(), 61);
        assert_eq!(frame_loop.actors().len(), 62);

        assert_eq!(figure_position(0), Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(figure_position(4), Vec3::new(0.0, 7.0, -2.0));
        assert_eq!(figure_position(59), Vec3::new(-2.0, 26.0, 0.0));
    }

    #[test]
    fn no_figures_leaves_only_ground() {
        let frame_loop = build(Demo::Ground, LoopConfig::default(), options(0));
        assert_eq!(frame_loop.world().body_count(), 1);
    }

    #[test]
    fn tentacle_sways_over_time() {
        let mut frame_loop = build(Demo::Tentacle, LoopConfig::default(), options(1));
        let bone = frame_loop.scene().find("bone2").expect("bone2");
        assert_eq!(frame_loop.world().body_count(), 0);

        let mut presenter = NullPresenter::new();
        run_headless(&mut frame_loop, &mut presenter, 31, 1000.0 / 60.0).expect("run");

        let rotation = frame_loop.scene().transform(bone).map(|t| t.rotation).expect("bone");
        assert!(!rotation.abs_diff_eq(glam::Quat::IDENTITY, 1e-3));
    }
}
