use planarvis_common::{Pose, Trajectory};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Frame rate used when the caller does not pick one.
pub const DEFAULT_FPS: f32 = 10.0;

/// Playback mode of a [`RenderRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Static,
    Trajectory,
    Dynamic,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Static => "static",
            Self::Trajectory => "trajectory",
            Self::Dynamic => "dynamic",
        };
        f.write_str(s)
    }
}

/// What to render. Exactly one mode per request.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderRequest {
    /// A single pose.
    Static {
        pose: Pose,
        output_path: Option<PathBuf>,
    },
    /// A precomputed pose sequence played back at `fps`.
    Trajectory {
        poses: Vec<Pose>,
        fps: f32,
        output_path: Option<PathBuf>,
    },
    /// Simulation-driven playback starting from `initial_pose`.
    Dynamic {
        initial_pose: Pose,
        fps: f32,
        output_path: Option<PathBuf>,
    },
}

impl RenderRequest {
    pub fn show(pose: Pose) -> Self {
        Self::Static {
            pose,
            output_path: None,
        }
    }

    pub fn trajectory(poses: Vec<Pose>, fps: f32) -> Self {
        Self::Trajectory {
            poses,
            fps,
            output_path: None,
        }
    }

    pub fn dynamic(initial_pose: Pose, fps: f32) -> Self {
        Self::Dynamic {
            initial_pose,
            fps,
            output_path: None,
        }
    }

    /// Direct output to a file instead of the renderer's default sink.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        let path = Some(path.into());
        match &mut self {
            Self::Static { output_path, .. }
            | Self::Trajectory { output_path, .. }
            | Self::Dynamic { output_path, .. } => *output_path = path,
        }
        self
    }

    pub fn mode(&self) -> RenderMode {
        match self {
            Self::Static { .. } => RenderMode::Static,
            Self::Trajectory { .. } => RenderMode::Trajectory,
            Self::Dynamic { .. } => RenderMode::Dynamic,
        }
    }

    pub fn output_path(&self) -> Option<&Path> {
        match self {
            Self::Static { output_path, .. }
            | Self::Trajectory { output_path, .. }
            | Self::Dynamic { output_path, .. } => output_path.as_deref(),
        }
    }

    /// Build a request from the flag-based invocation surface.
    ///
    /// `is_dynamic` is checked first, then `is_trajectory`, otherwise the
    /// request is static. Setting both flags logs a warning and selects
    /// dynamic playback.
    pub fn from_flags(args: VisualizeArgs) -> Result<Self, RequestError> {
        let VisualizeArgs {
            q,
            image_file,
            is_trajectory,
            is_dynamic,
            fps,
        } = args;

        if is_dynamic && is_trajectory {
            warn!("both dynamic and trajectory playback requested, using dynamic");
        }

        let request = if is_dynamic {
            check_fps(fps)?;
            let initial_pose = match q {
                PoseInput::Single(p) => p,
                PoseInput::Sequence(poses) => {
                    let len = poses.len();
                    let first = poses.into_iter().next().ok_or(RequestError::EmptyTrajectory)?;
                    if len > 1 {
                        warn!(poses = len, "dynamic playback uses only the first pose");
                    }
                    first
                }
            };
            Self::Dynamic {
                initial_pose,
                fps,
                output_path: image_file,
            }
        } else if is_trajectory {
            check_fps(fps)?;
            let poses = match q {
                PoseInput::Single(p) => vec![p],
                PoseInput::Sequence(poses) => poses,
            };
            if poses.is_empty() {
                return Err(RequestError::EmptyTrajectory);
            }
            Self::Trajectory {
                poses,
                fps,
                output_path: image_file,
            }
        } else {
            let pose = match q {
                PoseInput::Single(p) => p,
                PoseInput::Sequence(mut poses) if poses.len() == 1 => poses.remove(0),
                PoseInput::Sequence(poses) => {
                    return Err(RequestError::ExpectedSinglePose { found: poses.len() });
                }
            };
            Self::Static {
                pose,
                output_path: image_file,
            }
        };
        Ok(request)
    }
}

fn check_fps(fps: f32) -> Result<(), RequestError> {
    if fps.is_finite() && fps > 0.0 {
        Ok(())
    } else {
        Err(RequestError::InvalidFps(fps))
    }
}

/// Errors from building a request out of flags.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("frame rate must be positive and finite, got {0}")]
    InvalidFps(f32),
    #[error("trajectory has no poses")]
    EmptyTrajectory,
    #[error("static rendering takes a single pose, got a sequence of {found}")]
    ExpectedSinglePose { found: usize },
}

/// `q` as handed to the flag-based surface: one pose or a pose sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PoseInput {
    Single(Pose),
    Sequence(Vec<Pose>),
}

impl From<Pose> for PoseInput {
    fn from(p: Pose) -> Self {
        Self::Single(p)
    }
}

impl From<Trajectory> for PoseInput {
    fn from(t: Trajectory) -> Self {
        Self::Sequence(t.into_poses())
    }
}

/// Flag-based visualization parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizeArgs {
    pub q: PoseInput,
    pub image_file: Option<PathBuf>,
    pub is_trajectory: bool,
    pub is_dynamic: bool,
    pub fps: f32,
}

impl VisualizeArgs {
    /// Static rendering of `q` at the default frame rate, no output file.
    pub fn new(q: impl Into<PoseInput>) -> Self {
        Self {
            q: q.into(),
            image_file: None,
            is_trajectory: false,
            is_dynamic: false,
            fps: DEFAULT_FPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(v: f32) -> Pose {
        Pose::new(vec![v, v])
    }

    #[test]
    fn default_args_are_static() {
        let args = VisualizeArgs::new(pose(0.1));
        assert_eq!(args.fps, 10.0);
        let req = RenderRequest::from_flags(args).unwrap();
        assert_eq!(req, RenderRequest::show(pose(0.1)));
    }

    #[test]
    fn dynamic_flag_wins_over_trajectory() {
        for is_trajectory in [false, true] {
            let args = VisualizeArgs {
                is_dynamic: true,
                is_trajectory,
                ..VisualizeArgs::new(pose(0.3))
            };
            let req = RenderRequest::from_flags(args).unwrap();
            assert_eq!(req.mode(), RenderMode::Dynamic);
        }
    }

    #[test]
    fn dynamic_takes_first_pose_of_sequence() {
        let args = VisualizeArgs {
            is_dynamic: true,
            fps: 30.0,
            ..VisualizeArgs::new(Trajectory::new(vec![pose(1.0), pose(2.0)]))
        };
        assert_eq!(
            RenderRequest::from_flags(args).unwrap(),
            RenderRequest::dynamic(pose(1.0), 30.0)
        );
    }

    #[test]
    fn trajectory_keeps_output_and_fps() {
        let args = VisualizeArgs {
            is_trajectory: true,
            fps: 24.0,
            image_file: Some("out.mp4".into()),
            ..VisualizeArgs::new(Trajectory::new(vec![pose(1.0), pose(2.0), pose(3.0)]))
        };
        let req = RenderRequest::from_flags(args).unwrap();
        assert_eq!(
            req,
            RenderRequest::trajectory(vec![pose(1.0), pose(2.0), pose(3.0)], 24.0)
                .with_output("out.mp4")
        );
        assert_eq!(req.output_path(), Some(Path::new("out.mp4")));
    }

    #[test]
    fn single_pose_trajectory_has_one_frame() {
        let args = VisualizeArgs {
            is_trajectory: true,
            ..VisualizeArgs::new(pose(0.5))
        };
        match RenderRequest::from_flags(args).unwrap() {
            RenderRequest::Trajectory { poses, .. } => assert_eq!(poses.len(), 1),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn static_rejects_sequences() {
        let args = VisualizeArgs::new(Trajectory::new(vec![pose(1.0), pose(2.0)]));
        assert!(matches!(
            RenderRequest::from_flags(args),
            Err(RequestError::ExpectedSinglePose { found: 2 })
        ));
    }

    #[test]
    fn empty_trajectory_rejected() {
        let args = VisualizeArgs {
            is_trajectory: true,
            ..VisualizeArgs::new(Trajectory::default())
        };
        assert!(matches!(
            RenderRequest::from_flags(args),
            Err(RequestError::EmptyTrajectory)
        ));
    }

    #[test]
    fn bad_fps_rejected() {
        for fps in [0.0, -5.0, f32::NAN] {
            let args = VisualizeArgs {
                is_dynamic: true,
                fps,
                ..VisualizeArgs::new(pose(0.0))
            };
            assert!(matches!(
                RenderRequest::from_flags(args),
                Err(RequestError::InvalidFps(_))
            ));
        }
    }

    #[test]
    fn pose_input_untagged_json() {
        let single: PoseInput = serde_json::from_str("[0.1, 0.2]").unwrap();
        assert!(matches!(single, PoseInput::Single(_)));
        let seq: PoseInput = serde_json::from_str("[[0.1, 0.2], [0.3, 0.4]]").unwrap();
        assert!(matches!(seq, PoseInput::Sequence(ref p) if p.len() == 2));
    }
}
