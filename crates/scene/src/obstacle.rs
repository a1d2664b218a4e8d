//! Obstacle records and their conversion into positioned rigid bodies.
//!
//! Input layout (JSON or YAML):
//! ```text
//! { "obstacles": [ { "box": { "dim": [w, d, h], "trans": [x, y, z], "rot": [w, x, y, z] } } ] }
//! ```

use glam::{Mat4, Vec3};
use planarvis_geometry::{BoxMesh, quat_from_wxyz, rigid_transform};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Errors from obstacle loading and deserialization.
#[derive(Debug, thiserror::Error)]
pub enum ObstacleError {
    #[error("obstacle {index}: invalid box dimensions {dimensions:?}, every side must be positive")]
    InvalidObstacleGeometry { index: usize, dimensions: [f32; 3] },
    #[error("obstacle {index}: rotation {rotation:?} cannot be normalized to a unit quaternion")]
    InvalidRotation { index: usize, rotation: [f32; 4] },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("obstacle file parse error: {0}")]
    Parse(String),
}

/// A box obstacle as supplied by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleRecord {
    /// Full side lengths (width, depth, height) before the transform.
    #[serde(rename = "dim")]
    pub dimensions: [f32; 3],
    /// Box center in the world frame.
    #[serde(rename = "trans")]
    pub translation: [f32; 3],
    /// Orientation as a quaternion in `[w, x, y, z]` order.
    #[serde(rename = "rot")]
    pub rotation: [f32; 4],
}

impl ObstacleRecord {
    pub fn new(dimensions: [f32; 3], translation: [f32; 3], rotation: [f32; 4]) -> Self {
        Self {
            dimensions,
            translation,
            rotation,
        }
    }
}

/// One entry of the `obstacles` list. Only boxes are supported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleEntry {
    Box(ObstacleRecord),
}

impl ObstacleEntry {
    pub fn record(&self) -> &ObstacleRecord {
        match self {
            Self::Box(r) => r,
        }
    }
}

/// Top-level obstacle document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleFile {
    #[serde(default)]
    pub obstacles: Vec<ObstacleEntry>,
}

impl ObstacleFile {
    pub fn from_records(records: impl IntoIterator<Item = ObstacleRecord>) -> Self {
        Self {
            obstacles: records.into_iter().map(ObstacleEntry::Box).collect(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ObstacleError> {
        serde_json::from_str(s).map_err(|e| ObstacleError::Parse(e.to_string()))
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ObstacleError> {
        serde_yaml::from_str(s).map_err(|e| ObstacleError::Parse(e.to_string()))
    }

    /// Load from disk. `.yaml`/`.yml` files are read as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ObstacleError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml_str(&data)
        } else {
            Self::from_json_str(&data)
        }
    }

    /// The box records in file order.
    pub fn records(&self) -> Vec<ObstacleRecord> {
        self.obstacles.iter().map(|e| *e.record()).collect()
    }
}

/// A box obstacle placed in the world.
///
/// The mesh vertices already have `transform` applied; `transform` is kept
/// alongside for inspection and collision queries.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedBody {
    pub mesh: BoxMesh,
    pub transform: Mat4,
    pub dimensions: Vec3,
}

impl PositionedBody {
    /// Box center in world coordinates.
    pub fn center(&self) -> Vec3 {
        self.transform.transform_point3(Vec3::ZERO)
    }

    /// Whether the world-space point lies inside the box (boundary included).
    pub fn contains_point(&self, p: Vec3) -> bool {
        let local = self.transform.inverse().transform_point3(p);
        let half = self.dimensions * 0.5;
        local.abs().cmple(half + Vec3::splat(1e-6)).all()
    }
}

/// Convert a single record into a positioned body. `index` is used for error reporting.
pub fn deserialize_obstacle(
    index: usize,
    record: &ObstacleRecord,
) -> Result<PositionedBody, ObstacleError> {
    let dims = Vec3::from_array(record.dimensions);
    if !dims.is_finite() || dims.cmple(Vec3::ZERO).any() {
        return Err(ObstacleError::InvalidObstacleGeometry {
            index,
            dimensions: record.dimensions,
        });
    }
    let rotation = quat_from_wxyz(record.rotation).ok_or(ObstacleError::InvalidRotation {
        index,
        rotation: record.rotation,
    })?;
    let transform = rigid_transform(rotation, Vec3::from_array(record.translation));

    let mut mesh = BoxMesh::new(dims);
    mesh.apply_transform(&transform);
    debug!(
        index,
        dim = ?record.dimensions,
        trans = ?record.translation,
        "placed obstacle"
    );

    Ok(PositionedBody {
        mesh,
        transform,
        dimensions: dims,
    })
}

/// Convert records into positioned bodies, preserving order: body `i`
/// corresponds to record `i`. Fails on the first invalid record.
pub fn deserialize_obstacles(
    records: &[ObstacleRecord],
) -> Result<Vec<PositionedBody>, ObstacleError> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| deserialize_obstacle(i, r))
        .collect()
}
