//! Geometry: box primitives, quaternion conversion, rigid transforms.
//!
//! # Invariants
//! - Quaternions are accepted in `[w, x, y, z]` order and normalized.
//! - Transforms built here are rigid: orthonormal rotation, no scale or shear.

mod primitive;
mod transform;

pub use primitive::BoxMesh;
pub use transform::{
    is_rigid, quat_from_wxyz, rigid_transform, rotation_block, translation_of,
};

pub fn crate_info() -> &'static str {
    "planarvis-geometry v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("geometry"));
    }
}
