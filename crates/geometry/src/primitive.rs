use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Triangle indices of a box, two triangles per face, counter-clockwise
/// when viewed from outside.
const BOX_FACES: [[u32; 3]; 12] = [
    [0, 2, 1],
    [0, 3, 2], // -z
    [4, 5, 6],
    [4, 6, 7], // +z
    [0, 1, 5],
    [0, 5, 4], // -y
    [3, 7, 6],
    [3, 6, 2], // +y
    [0, 4, 7],
    [0, 7, 3], // -x
    [1, 2, 6],
    [1, 6, 5], // +x
];

/// A triangle mesh of a box.
///
/// Created axis-aligned and centered at the origin. Transforms are applied to
/// the vertices in place, so after [`BoxMesh::apply_transform`] the geometry
/// is expressed directly in the target frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxMesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl BoxMesh {
    /// Axis-aligned box with full side lengths `extents`, centered at the origin.
    pub fn new(extents: Vec3) -> Self {
        let h = extents * 0.5;
        let vertices = vec![
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];
        Self {
            vertices,
            faces: BOX_FACES.to_vec(),
        }
    }

    /// Transform every vertex by the homogeneous matrix `m`.
    pub fn apply_transform(&mut self, m: &Mat4) {
        for v in &mut self.vertices {
            *v = m.transform_point3(*v);
        }
    }

    /// Mean of the vertices. For a box this is its center.
    pub fn centroid(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        let sum: Vec3 = self.vertices.iter().copied().sum();
        sum / self.vertices.len() as f32
    }

    /// World-space axis-aligned bounds `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), v| (lo.min(*v), hi.max(*v)),
        )
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }
}
