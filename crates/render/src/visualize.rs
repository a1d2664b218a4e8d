use crate::dispatch::{DispatchError, dispatch};
use crate::renderer::Renderer;
use crate::request::{RenderRequest, RequestError, VisualizeArgs};
use planarvis_scene::{ObstacleFile, PositionedBody, RobotModel, Scene, SceneError};

/// Errors from the end-to-end visualization pipeline.
#[derive(Debug, thiserror::Error)]
pub enum VisualizeError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Build the scene from `obstacles`, select the mode from `args` and render it.
///
/// The request is validated before any obstacle is placed, so a failure at
/// any stage leaves nothing rendered.
pub fn visualize<M, F, E, R>(
    args: VisualizeArgs,
    obstacles: &ObstacleFile,
    construct: F,
    renderer: &mut R,
) -> Result<R::Output, VisualizeError>
where
    M: RobotModel,
    F: FnOnce(&[PositionedBody]) -> Result<M, E>,
    E: std::error::Error + Send + Sync + 'static,
    R: Renderer + ?Sized,
{
    let request = RenderRequest::from_flags(args)?;
    let scene = Scene::build(&obstacles.records(), construct)?;
    Ok(dispatch(renderer, &scene, &request)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameLogRenderer;
    use planarvis_common::{Pose, Trajectory};
    use planarvis_scene::{ObstacleError, ObstacleRecord, PlanarRobot, RobotConfig, RobotError};

    fn planar(bodies: &[PositionedBody]) -> Result<PlanarRobot, RobotError> {
        PlanarRobot::new(RobotConfig::default(), bodies)
    }

    fn obstacles() -> ObstacleFile {
        ObstacleFile::from_json_str(
            r#"{ "obstacles": [
                { "box": { "dim": [0.2, 1.2, 0.1], "trans": [1.55, 0, 0], "rot": [1, 0, 0, 0] } }
            ] }"#,
        )
        .unwrap()
    }

    #[test]
    fn static_pipeline_renders_one_frame() {
        let mut renderer = FrameLogRenderer::default();
        let out = visualize(
            VisualizeArgs::new(Pose::zeros(10)),
            &obstacles(),
            planar,
            &mut renderer,
        )
        .unwrap();
        assert!(out.starts_with("=== static"));
        assert_eq!(out.matches("[frame").count(), 1);
    }

    #[test]
    fn trajectory_pipeline_renders_every_pose() {
        let poses = Trajectory::new(vec![Pose::zeros(10); 4]);
        let args = VisualizeArgs {
            is_trajectory: true,
            ..VisualizeArgs::new(poses)
        };
        let mut renderer = FrameLogRenderer::default();
        let out = visualize(args, &obstacles(), planar, &mut renderer).unwrap();
        assert_eq!(out.matches("[frame").count(), 4);
    }

    #[test]
    fn invalid_obstacle_aborts_before_rendering() {
        let bad = ObstacleFile::from_records([ObstacleRecord::new(
            [1.0, 1.0, 1.0],
            [3.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
        )]);
        let mut renderer = FrameLogRenderer::default();
        let err = visualize(
            VisualizeArgs::new(Pose::zeros(10)),
            &bad,
            planar,
            &mut renderer,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            VisualizeError::Scene(SceneError::Obstacle(ObstacleError::InvalidRotation { .. }))
        ));
    }

    #[test]
    fn wrong_pose_size_surfaces_as_dispatch_error() {
        let mut renderer = FrameLogRenderer::default();
        let err = visualize(
            VisualizeArgs::new(Pose::zeros(3)),
            &obstacles(),
            planar,
            &mut renderer,
        )
        .unwrap_err();
        assert!(matches!(err, VisualizeError::Dispatch(_)));
    }

    #[test]
    fn bad_request_is_rejected_first() {
        let args = VisualizeArgs {
            is_trajectory: true,
            fps: 0.0,
            ..VisualizeArgs::new(Pose::zeros(10))
        };
        let mut constructed = false;
        let mut renderer = FrameLogRenderer::default();
        let err = visualize(
            args,
            &obstacles(),
            |bodies: &[PositionedBody]| {
                constructed = true;
                planar(bodies)
            },
            &mut renderer,
        )
        .unwrap_err();
        assert!(matches!(err, VisualizeError::Request(RequestError::InvalidFps(_))));
        assert!(!constructed);
    }
}
