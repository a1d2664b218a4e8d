use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Joint configuration of the robot: one value per actuated joint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pose(pub Vec<f32>);

impl Pose {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// A pose with every joint at zero.
    pub fn zeros(dof: usize) -> Self {
        Self(vec![0.0; dof])
    }

    /// Number of joint values.
    pub fn dof(&self) -> usize {
        self.0.len()
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.0.iter()
    }
}

impl From<Vec<f32>> for Pose {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl Index<usize> for Pose {
    type Output = f32;

    fn index(&self, joint: usize) -> &f32 {
        &self.0[joint]
    }
}

/// Ordered sequence of poses intended for playback at a fixed frame rate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory(pub Vec<Pose>);

impl Trajectory {
    pub fn new(poses: Vec<Pose>) -> Self {
        Self(poses)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn poses(&self) -> &[Pose] {
        &self.0
    }

    pub fn into_poses(self) -> Vec<Pose> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_zeros_has_requested_dof() {
        let p = Pose::zeros(10);
        assert_eq!(p.dof(), 10);
        assert!(p.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn pose_serializes_as_plain_array() {
        let p = Pose::new(vec![0.5, -1.0]);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[0.5,-1.0]");
    }

    #[test]
    fn trajectory_deserializes_from_nested_arrays() {
        let t: Trajectory = serde_json::from_str("[[0.0, 1.0], [2.0, 3.0]]").unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.poses()[1][0], 2.0);
    }
}
