//! Pose and trajectory parsing for command-line and file input.
//!
//! Text trajectories hold one pose per line. Values are separated by
//! whitespace or commas; blank lines and lines starting with `#` are skipped.

use crate::types::{Pose, Trajectory};
use std::path::Path;

/// Errors from pose and trajectory parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: invalid joint value {token:?}")]
    InvalidValue { line: usize, token: String },
    #[error("line {line}: expected {expected} joint values, found {found}")]
    RaggedTrajectory {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("pose is empty")]
    EmptyPose,
}

/// Parse a single pose such as `"0.1, 0.2, -0.3"` or `"0.1 0.2 -0.3"`.
pub fn parse_pose(input: &str) -> Result<Pose, ParseError> {
    let values = parse_line(input, 1)?;
    if values.is_empty() {
        return Err(ParseError::EmptyPose);
    }
    Ok(Pose::new(values))
}

/// Parse a text trajectory. Every pose must have the same number of joints.
pub fn parse_trajectory_text(input: &str) -> Result<Trajectory, ParseError> {
    let mut poses: Vec<Pose> = Vec::new();
    for (i, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let values = parse_line(line, i + 1)?;
        if let Some(first) = poses.first() {
            if first.dof() != values.len() {
                return Err(ParseError::RaggedTrajectory {
                    line: i + 1,
                    expected: first.dof(),
                    found: values.len(),
                });
            }
        }
        poses.push(Pose::new(values));
    }
    Ok(Trajectory::new(poses))
}

/// Load a trajectory from disk. `.json` files hold an array of arrays;
/// anything else is read as text.
pub fn load_trajectory(path: impl AsRef<Path>) -> Result<Trajectory, ParseError> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&data)?)
    } else {
        parse_trajectory_text(&data)
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<Vec<f32>, ParseError> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<f32>().map_err(|_| ParseError::InvalidValue {
                line: line_no,
                token: t.to_string(),
            })
        })
        .collect()
}
