//! Scene assembly: obstacle deserialization, robot model seam, simulator seam.
//!
//! # Invariants
//! - Obstacle `i` in the input becomes body `i` in the scene.
//! - Input records are never mutated; bodies are freshly owned.
//! - The robot model is queried, never mutated, by the scene.

pub mod obstacle;
pub mod robot;
pub mod scene;
pub mod simulator;

pub use obstacle::{
    ObstacleEntry, ObstacleError, ObstacleFile, ObstacleRecord, PositionedBody,
    deserialize_obstacle, deserialize_obstacles,
};
pub use robot::{Joint, PlanarRobot, RobotConfig, RobotError, RobotModel};
pub use scene::{Scene, SceneError};
pub use simulator::{RelaxationSimulator, Simulator};

pub fn crate_info() -> &'static str {
    "planarvis-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
