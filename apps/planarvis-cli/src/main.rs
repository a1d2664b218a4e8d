use anyhow::Context;
use clap::{Parser, Subcommand};
use planarvis_common::{Trajectory, load_trajectory, parse_pose};
use planarvis_render::{DEFAULT_FPS, FrameLogRenderer, VisualizeArgs, visualize};
use planarvis_scene::{ObstacleFile, PlanarRobot, PositionedBody, RobotError, Scene};
use planarvis_tools::SceneInspector;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "planarvis", about = "Render a planar robot among box obstacles")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Build the scene and print its joints and obstacle placements
    Inspect {
        /// Obstacle file (JSON, or YAML by extension)
        #[arg(short, long)]
        obstacles: PathBuf,
    },
    /// Render a single pose
    Show {
        #[arg(short, long)]
        obstacles: PathBuf,
        /// Joint values, comma or space separated
        #[arg(short, long, allow_hyphen_values = true)]
        pose: String,
        /// Write the frame log here instead of stdout
        #[arg(short, long)]
        image_file: Option<PathBuf>,
    },
    /// Play back a precomputed trajectory
    Animate {
        #[arg(short, long)]
        obstacles: PathBuf,
        /// Trajectory file: JSON array of poses, or one pose per line
        #[arg(short, long)]
        trajectory: PathBuf,
        #[arg(long, default_value_t = DEFAULT_FPS)]
        fps: f32,
        #[arg(short, long)]
        image_file: Option<PathBuf>,
    },
    /// Play back a simulation started from a pose
    Simulate {
        #[arg(short, long)]
        obstacles: PathBuf,
        /// Initial joint values, comma or space separated
        #[arg(short, long, allow_hyphen_values = true)]
        pose: String,
        #[arg(long, default_value_t = DEFAULT_FPS)]
        fps: f32,
        #[arg(short, long)]
        image_file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("planarvis v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", planarvis_common::crate_info());
            println!("geometry: {}", planarvis_geometry::crate_info());
            println!("scene: {}", planarvis_scene::crate_info());
            println!("render: {}", planarvis_render::crate_info());
            println!("tools: {}", planarvis_tools::crate_info());
        }
        Commands::Inspect { obstacles } => {
            let file = load_obstacles(&obstacles)?;
            let scene = Scene::build(&file.records(), |bodies: &[PositionedBody]| {
                PlanarRobot::new(config.robot, bodies)
            })?;
            println!("{}", SceneInspector::summary(&scene));
            for body in SceneInspector::list_bodies(&scene) {
                println!("  {body}");
            }
        }
        Commands::Show {
            obstacles,
            pose,
            image_file,
        } => {
            let pose = parse_pose(&pose).context("parsing --pose")?;
            let args = VisualizeArgs {
                image_file,
                ..VisualizeArgs::new(pose)
            };
            run(&config, &obstacles, args)?;
        }
        Commands::Animate {
            obstacles,
            trajectory,
            fps,
            image_file,
        } => {
            let poses: Trajectory = load_trajectory(&trajectory)
                .with_context(|| format!("loading trajectory {}", trajectory.display()))?;
            let args = VisualizeArgs {
                image_file,
                is_trajectory: true,
                fps,
                ..VisualizeArgs::new(poses)
            };
            run(&config, &obstacles, args)?;
        }
        Commands::Simulate {
            obstacles,
            pose,
            fps,
            image_file,
        } => {
            let pose = parse_pose(&pose).context("parsing --pose")?;
            let args = VisualizeArgs {
                image_file,
                is_dynamic: true,
                fps,
                ..VisualizeArgs::new(pose)
            };
            run(&config, &obstacles, args)?;
        }
    }

    Ok(())
}

fn load_obstacles(path: &Path) -> anyhow::Result<ObstacleFile> {
    ObstacleFile::load(path).with_context(|| format!("loading obstacles {}", path.display()))
}

/// Run the visualization pipeline with the configured backend. The frame log
/// goes to stdout unless an output file was requested.
fn run(config: &AppConfig, obstacles: &Path, args: VisualizeArgs) -> anyhow::Result<()> {
    let file = load_obstacles(obstacles)?;
    let to_stdout = args.image_file.is_none();
    let mut renderer = FrameLogRenderer::with_simulator(config.render, config.simulator);
    let robot = config.robot;
    let log = visualize(
        args,
        &file,
        |bodies: &[PositionedBody]| -> Result<PlanarRobot, RobotError> {
            PlanarRobot::new(robot, bodies)
        },
        &mut renderer,
    )?;
    if to_stdout {
        print!("{log}");
    }
    Ok(())
}
