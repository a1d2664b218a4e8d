//! Shared types: joint poses, trajectories and their parsers.

mod parse;
mod types;

pub use parse::{ParseError, load_trajectory, parse_pose, parse_trajectory_text};
pub use types::{Pose, Trajectory};

pub fn crate_info() -> &'static str {
    "planarvis-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
