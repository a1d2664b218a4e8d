use crate::renderer::{RenderError, Renderer};
use crate::request::{RenderMode, RenderRequest};
use planarvis_scene::{RobotModel, Scene};
use tracing::info;

/// Errors from dispatching a request to a renderer.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{mode} rendering failed: {source}")]
    RenderDispatchFailed {
        mode: RenderMode,
        #[source]
        source: RenderError,
    },
}

/// Invoke exactly one renderer entry point, selected by the request's mode.
///
/// Only the parameters of the active mode are forwarded. Renderer errors are
/// wrapped with the mode and returned without retry.
pub fn dispatch<M, R>(
    renderer: &mut R,
    scene: &Scene<M>,
    request: &RenderRequest,
) -> Result<R::Output, DispatchError>
where
    M: RobotModel,
    R: Renderer + ?Sized,
{
    let mode = request.mode();
    let robot: &dyn RobotModel = scene.robot();
    let obstacles = scene.obstacles();
    info!(%mode, obstacles = obstacles.len(), "dispatching render request");

    let result = match request {
        RenderRequest::Static { pose, output_path } => {
            renderer.show(robot, pose, obstacles, output_path.as_deref())
        }
        RenderRequest::Trajectory {
            poses,
            fps,
            output_path,
        } => renderer.animate(robot, poses, obstacles, *fps, output_path.as_deref()),
        RenderRequest::Dynamic {
            initial_pose,
            fps,
            output_path,
        } => renderer.animate_dynamic(robot, initial_pose, obstacles, *fps, output_path.as_deref()),
    };

    result.map_err(|source| DispatchError::RenderDispatchFailed { mode, source })
}
