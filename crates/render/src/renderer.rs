use planarvis_common::Pose;
use planarvis_scene::{PositionedBody, RelaxationSimulator, RobotModel, Simulator};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Errors raised by renderer entry points.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame {frame}: pose has {found} joint values, robot has {expected} joints")]
    PoseDimension {
        frame: usize,
        expected: usize,
        found: usize,
    },
    #[error("frame rate must be positive and finite, got {0}")]
    InvalidFps(f32),
    #[error("trajectory has no poses")]
    EmptyTrajectory,
    #[error("dynamic playback duration must be positive and finite, got {0}")]
    InvalidDuration(f32),
    #[error("dynamic playback needs {requested} frames, limit is {max}")]
    TooManyFrames { requested: f64, max: usize },
}

/// Upper bound on frames produced by one dynamic playback.
pub const MAX_DYNAMIC_FRAMES: usize = 100_000;

/// Renderer-agnostic playback interface. All backends implement this trait.
///
/// Entry points read the robot model and obstacles and never mutate them.
/// Timing, windows and file output belong to the backend; callers only
/// forward a frame rate and an optional output path.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Display a single pose.
    fn show(
        &mut self,
        robot: &dyn RobotModel,
        pose: &Pose,
        obstacles: &[PositionedBody],
        output: Option<&Path>,
    ) -> Result<Self::Output, RenderError>;

    /// Play back a precomputed pose sequence at `fps`.
    fn animate(
        &mut self,
        robot: &dyn RobotModel,
        poses: &[Pose],
        obstacles: &[PositionedBody],
        fps: f32,
        output: Option<&Path>,
    ) -> Result<Self::Output, RenderError>;

    /// Play back poses produced on the fly by a simulator, starting from `initial_pose`.
    fn animate_dynamic(
        &mut self,
        robot: &dyn RobotModel,
        initial_pose: &Pose,
        obstacles: &[PositionedBody],
        fps: f32,
        output: Option<&Path>,
    ) -> Result<Self::Output, RenderError>;
}

/// Frame encoding of the [`FrameLogRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Backend configuration, passed explicitly at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub format: FrameFormat,
    /// Length of a dynamic playback in seconds.
    pub dynamic_duration_secs: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: FrameFormat::Text,
            dynamic_duration_secs: 5.0,
        }
    }
}

/// One rendered frame.
#[derive(Debug, Serialize)]
struct FrameRecord<'a> {
    frame: usize,
    time: f32,
    joints: &'a [f32],
}

/// Headless renderer that writes a frame log.
///
/// Each frame records its index, timestamp and joint values. The log is
/// returned as a `String` and also written to the output path when one is
/// given. Dynamic playback pulls poses from a [`Simulator`].
#[derive(Debug)]
pub struct FrameLogRenderer<S = RelaxationSimulator> {
    config: RenderConfig,
    simulator: S,
}

impl FrameLogRenderer<RelaxationSimulator> {
    pub fn new(config: RenderConfig) -> Self {
        Self::with_simulator(config, RelaxationSimulator::default())
    }
}

impl Default for FrameLogRenderer<RelaxationSimulator> {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl<S: Simulator> FrameLogRenderer<S> {
    pub fn with_simulator(config: RenderConfig, simulator: S) -> Self {
        Self { config, simulator }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Frames produced by a dynamic playback at `fps`, at least one and at
    /// most [`MAX_DYNAMIC_FRAMES`].
    pub fn dynamic_frame_count(&self, fps: f32) -> Result<usize, RenderError> {
        check_fps(fps)?;
        let duration = self.config.dynamic_duration_secs;
        if !(duration.is_finite() && duration > 0.0) {
            return Err(RenderError::InvalidDuration(duration));
        }
        let requested = (f64::from(duration) * f64::from(fps)).ceil();
        if requested > MAX_DYNAMIC_FRAMES as f64 {
            return Err(RenderError::TooManyFrames {
                requested,
                max: MAX_DYNAMIC_FRAMES,
            });
        }
        Ok((requested as usize).max(1))
    }

    fn header(
        &self,
        out: &mut String,
        mode: &str,
        robot: &dyn RobotModel,
        obstacles: &[PositionedBody],
        fps: Option<f32>,
    ) -> Result<(), RenderError> {
        match self.config.format {
            FrameFormat::Text => {
                out.push_str(&format!(
                    "=== {mode} (model={}, joints={}, obstacles={}",
                    robot.name(),
                    robot.actuated_joints().len(),
                    obstacles.len()
                ));
                if let Some(fps) = fps {
                    out.push_str(&format!(", fps={fps:.1}"));
                }
                out.push_str(") ===\n");
                for (i, body) in obstacles.iter().enumerate() {
                    let c = body.center();
                    let d = body.dimensions;
                    out.push_str(&format!(
                        "  obstacle {i}: center=({:.2}, {:.2}, {:.2}) dim=({:.2}, {:.2}, {:.2})\n",
                        c.x, c.y, c.z, d.x, d.y, d.z
                    ));
                }
            }
            FrameFormat::Json => {
                let header = serde_json::json!({
                    "mode": mode,
                    "model": robot.name(),
                    "joints": robot.actuated_joints().iter().map(|j| j.name.as_str()).collect::<Vec<_>>(),
                    "obstacles": obstacles.len(),
                    "fps": fps,
                });
                out.push_str(&serde_json::to_string(&header)?);
                out.push('\n');
            }
        }
        Ok(())
    }

    fn frame(
        &self,
        out: &mut String,
        robot: &dyn RobotModel,
        frame: usize,
        time: f32,
        pose: &Pose,
    ) -> Result<(), RenderError> {
        let expected = robot.actuated_joints().len();
        if pose.dof() != expected {
            return Err(RenderError::PoseDimension {
                frame,
                expected,
                found: pose.dof(),
            });
        }
        match self.config.format {
            FrameFormat::Text => {
                let joints: Vec<String> = pose.iter().map(|q| format!("{q:.3}")).collect();
                out.push_str(&format!(
                    "  [frame {frame:04} t={time:.3}s] q=({})\n",
                    joints.join(", ")
                ));
            }
            FrameFormat::Json => {
                let record = FrameRecord {
                    frame,
                    time,
                    joints: pose.values(),
                };
                out.push_str(&serde_json::to_string(&record)?);
                out.push('\n');
            }
        }
        Ok(())
    }

    fn finish(&self, out: String, output: Option<&Path>) -> Result<String, RenderError> {
        if let Some(path) = output {
            std::fs::write(path, &out)?;
            info!(path = %path.display(), bytes = out.len(), "frame log written");
        }
        Ok(out)
    }
}

fn check_fps(fps: f32) -> Result<(), RenderError> {
    if fps.is_finite() && fps > 0.0 {
        Ok(())
    } else {
        Err(RenderError::InvalidFps(fps))
    }
}

impl<S: Simulator> Renderer for FrameLogRenderer<S> {
    type Output = String;

    fn show(
        &mut self,
        robot: &dyn RobotModel,
        pose: &Pose,
        obstacles: &[PositionedBody],
        output: Option<&Path>,
    ) -> Result<String, RenderError> {
        let mut out = String::new();
        self.header(&mut out, "static", robot, obstacles, None)?;
        self.frame(&mut out, robot, 0, 0.0, pose)?;
        self.finish(out, output)
    }

    fn animate(
        &mut self,
        robot: &dyn RobotModel,
        poses: &[Pose],
        obstacles: &[PositionedBody],
        fps: f32,
        output: Option<&Path>,
    ) -> Result<String, RenderError> {
        check_fps(fps)?;
        if poses.is_empty() {
            return Err(RenderError::EmptyTrajectory);
        }
        let mut out = String::new();
        self.header(&mut out, "trajectory", robot, obstacles, Some(fps))?;
        for (i, pose) in poses.iter().enumerate() {
            self.frame(&mut out, robot, i, i as f32 / fps, pose)?;
        }
        debug!(frames = poses.len(), fps, "trajectory rendered");
        self.finish(out, output)
    }

    fn animate_dynamic(
        &mut self,
        robot: &dyn RobotModel,
        initial_pose: &Pose,
        obstacles: &[PositionedBody],
        fps: f32,
        output: Option<&Path>,
    ) -> Result<String, RenderError> {
        let frames = self.dynamic_frame_count(fps)?;
        let dt = 1.0 / fps;
        let mut out = String::new();
        self.header(&mut out, "dynamic", robot, obstacles, Some(fps))?;

        let mut pose = initial_pose.clone();
        for i in 0..frames {
            if i > 0 {
                pose = self.simulator.step(&pose, dt);
            }
            self.frame(&mut out, robot, i, i as f32 * dt, &pose)?;
        }
        debug!(frames, fps, "dynamic playback rendered");
        self.finish(out, output)
    }
}
