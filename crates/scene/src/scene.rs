use crate::obstacle::{ObstacleError, ObstacleRecord, PositionedBody, deserialize_obstacles};
use crate::robot::RobotModel;
use tracing::info;

/// Errors from scene assembly.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Obstacle(#[from] ObstacleError),
    #[error("robot model construction failed")]
    ModelConstructionFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Obstacles plus the robot model built against them.
///
/// A scene is assembled for one visualization request and dropped afterwards.
/// Obstacle order matches the input records.
#[derive(Debug)]
pub struct Scene<M> {
    obstacles: Vec<PositionedBody>,
    robot: M,
}

impl<M: RobotModel> Scene<M> {
    /// Deserialize `records`, then build the robot model from the placed bodies.
    ///
    /// Errors returned by `construct` are wrapped, not interpreted.
    pub fn build<F, E>(records: &[ObstacleRecord], construct: F) -> Result<Self, SceneError>
    where
        F: FnOnce(&[PositionedBody]) -> Result<M, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let obstacles = deserialize_obstacles(records)?;
        let robot =
            construct(&obstacles).map_err(|e| SceneError::ModelConstructionFailed(Box::new(e)))?;
        let scene = Self { obstacles, robot };
        scene.log_joints();
        Ok(scene)
    }

    /// Assemble from already placed bodies and model.
    pub fn from_parts(obstacles: Vec<PositionedBody>, robot: M) -> Self {
        Self { obstacles, robot }
    }

    /// Placed obstacles, in input order.
    pub fn obstacles(&self) -> &[PositionedBody] {
        &self.obstacles
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn robot(&self) -> &M {
        &self.robot
    }

    /// Names of actuated joints in model order.
    pub fn joint_names(&self) -> Vec<&str> {
        self.robot
            .actuated_joints()
            .iter()
            .map(|j| j.name.as_str())
            .collect()
    }

    pub fn joint_count(&self) -> usize {
        self.robot.actuated_joints().len()
    }

    fn log_joints(&self) {
        for name in self.joint_names() {
            info!(joint = name, "actuated joint");
        }
        info!(
            model = self.robot.name(),
            joints = self.joint_count(),
            obstacles = self.obstacle_count(),
            "scene assembled"
        );
    }
}
