use planarvis_common::Pose;
use serde::{Deserialize, Serialize};

/// Source of poses for dynamic playback.
///
/// Implementations advance the robot state by `dt` seconds and return the
/// new pose. Physics lives entirely behind this trait.
pub trait Simulator {
    fn step(&mut self, pose: &Pose, dt: f32) -> Pose;
}

/// Stand-in dynamics: every joint relaxes exponentially toward zero with the
/// configured time constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxationSimulator {
    pub time_constant: f32,
}

impl Default for RelaxationSimulator {
    fn default() -> Self {
        Self { time_constant: 1.0 }
    }
}

impl RelaxationSimulator {
    pub fn new(time_constant: f32) -> Self {
        Self { time_constant }
    }
}

impl Simulator for RelaxationSimulator {
    fn step(&mut self, pose: &Pose, dt: f32) -> Pose {
        if self.time_constant <= 0.0 {
            return Pose::zeros(pose.dof());
        }
        let decay = (-dt / self.time_constant).exp();
        Pose::new(pose.iter().map(|q| q * decay).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relaxation_decays_toward_zero() {
        let mut sim = RelaxationSimulator::new(0.5);
        let p0 = Pose::new(vec![1.0, -2.0]);
        let p1 = sim.step(&p0, 0.1);
        assert!(p1[0] > 0.0 && p1[0] < 1.0);
        assert!(p1[1] < 0.0 && p1[1] > -2.0);
    }

    #[test]
    fn zero_dt_is_identity() {
        let mut sim = RelaxationSimulator::default();
        let p = Pose::new(vec![0.3, 0.4]);
        assert_eq!(sim.step(&p, 0.0), p);
    }

    #[test]
    fn non_positive_time_constant_snaps_to_rest() {
        let mut sim = RelaxationSimulator::new(0.0);
        assert_eq!(sim.step(&Pose::new(vec![1.0]), 0.1), Pose::zeros(1));
    }
}
