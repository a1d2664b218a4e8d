use crate::obstacle::PositionedBody;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// An actuated joint as exposed for introspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub name: String,
    /// Lower and upper position limits in radians.
    pub limits: (f32, f32),
}

/// Robot model seam.
///
/// Scenes hold a model built from their obstacles and only ever query it.
pub trait RobotModel {
    /// Actuated joints in model-defined order.
    fn actuated_joints(&self) -> &[Joint];

    /// Human-readable model name for logs.
    fn name(&self) -> &str {
        "robot"
    }
}

/// Errors from robot model construction.
#[derive(Debug, thiserror::Error)]
pub enum RobotError {
    #[error("invalid robot configuration: {0}")]
    InvalidConfig(String),
    #[error("obstacle {index} contains the robot base")]
    BaseObstructed { index: usize },
}

/// Parameters of the planar serial arm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Number of revolute joints.
    pub dof: usize,
    /// Length of every link in meters.
    pub link_length: f32,
    /// Symmetric joint limit in radians.
    pub joint_limit: f32,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            dof: 10,
            link_length: 0.25,
            joint_limit: PI,
        }
    }
}

/// Planar serial arm with revolute joints about the world z axis, based at the origin.
#[derive(Debug, Clone)]
pub struct PlanarRobot {
    config: RobotConfig,
    joints: Vec<Joint>,
    obstacle_count: usize,
}

impl PlanarRobot {
    /// Build the arm for a given obstacle set.
    ///
    /// Rejects configurations with no joints or non-positive link lengths, and
    /// obstacle sets where a box encloses the base.
    pub fn new(config: RobotConfig, obstacles: &[PositionedBody]) -> Result<Self, RobotError> {
        if config.dof == 0 {
            return Err(RobotError::InvalidConfig("dof must be at least 1".into()));
        }
        if !(config.link_length.is_finite() && config.link_length > 0.0) {
            return Err(RobotError::InvalidConfig(format!(
                "link_length must be positive, got {}",
                config.link_length
            )));
        }
        if !(config.joint_limit.is_finite() && config.joint_limit > 0.0) {
            return Err(RobotError::InvalidConfig(format!(
                "joint_limit must be positive, got {}",
                config.joint_limit
            )));
        }
        if let Some(index) = obstacles.iter().position(|b| b.contains_point(Vec3::ZERO)) {
            return Err(RobotError::BaseObstructed { index });
        }

        let joints = (1..=config.dof)
            .map(|i| Joint {
                name: format!("joint_{i}"),
                limits: (-config.joint_limit, config.joint_limit),
            })
            .collect();

        Ok(Self {
            config,
            joints,
            obstacle_count: obstacles.len(),
        })
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Number of obstacles the model was built against.
    pub fn obstacle_count(&self) -> usize {
        self.obstacle_count
    }

    /// Maximum distance from the base the arm can reach.
    pub fn reach(&self) -> f32 {
        self.config.dof as f32 * self.config.link_length
    }
}

impl RobotModel for PlanarRobot {
    fn actuated_joints(&self) -> &[Joint] {
        &self.joints
    }

    fn name(&self) -> &str {
        "planar-arm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::{ObstacleRecord, deserialize_obstacles};

    #[test]
    fn default_arm_has_ten_named_joints() {
        let robot = PlanarRobot::new(RobotConfig::default(), &[]).unwrap();
        let joints = robot.actuated_joints();
        assert_eq!(joints.len(), 10);
        assert_eq!(joints[0].name, "joint_1");
        assert_eq!(joints[9].name, "joint_10");
        assert!((robot.reach() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn zero_dof_rejected() {
        let config = RobotConfig {
            dof: 0,
            ..RobotConfig::default()
        };
        assert!(matches!(
            PlanarRobot::new(config, &[]),
            Err(RobotError::InvalidConfig(_))
        ));
    }

    #[test]
    fn negative_link_length_rejected() {
        let config = RobotConfig {
            link_length: -1.0,
            ..RobotConfig::default()
        };
        assert!(PlanarRobot::new(config, &[]).is_err());
    }

    #[test]
    fn obstacle_over_base_rejected() {
        let bodies = deserialize_obstacles(&[
            ObstacleRecord::new([0.2, 1.2, 0.1], [1.55, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]),
            ObstacleRecord::new([0.5, 0.5, 0.5], [0.1, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]),
        ])
        .unwrap();
        assert!(matches!(
            PlanarRobot::new(RobotConfig::default(), &bodies),
            Err(RobotError::BaseObstructed { index: 1 })
        ));
    }

    #[test]
    fn config_fills_missing_keys_from_default() {
        let config: RobotConfig = serde_json::from_str(r#"{ "dof": 4 }"#).unwrap();
        assert_eq!(config.dof, 4);
        assert_eq!(config.link_length, 0.25);
    }
}
