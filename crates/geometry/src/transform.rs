use glam::{Mat3, Mat4, Quat, Vec3, Vec4};

/// Build a unit quaternion from `[w, x, y, z]` components.
///
/// The input is normalized. Returns `None` when a component is not finite or
/// every component is zero.
pub fn quat_from_wxyz(wxyz: [f32; 4]) -> Option<Quat> {
    let [w, x, y, z] = wxyz;
    let v = Vec4::new(x, y, z, w);
    if !v.is_finite() {
        return None;
    }
    // Rescale by the largest component so the length neither overflows nor underflows.
    let scale = v.abs().max_element();
    if scale == 0.0 {
        return None;
    }
    let n = (v / scale).try_normalize()?;
    Some(Quat::from_xyzw(n.x, n.y, n.z, n.w))
}

/// Compose a 4×4 homogeneous rigid transform: rotation in the upper-left
/// 3×3 block, translation in the last column, bottom row `[0, 0, 0, 1]`.
pub fn rigid_transform(rotation: Quat, translation: Vec3) -> Mat4 {
    Mat4::from_rotation_translation(rotation, translation)
}

/// Translation column of a homogeneous transform.
pub fn translation_of(m: &Mat4) -> Vec3 {
    m.w_axis.truncate()
}

/// Upper-left 3×3 rotation block of a homogeneous transform.
pub fn rotation_block(m: &Mat4) -> Mat3 {
    Mat3::from_mat4(*m)
}

/// Whether `m` is a rigid transform within `eps`: orthonormal rotation block
/// with determinant +1 and bottom row `[0, 0, 0, 1]`.
pub fn is_rigid(m: &Mat4, eps: f32) -> bool {
    let bottom = m.row(3);
    if !bottom.abs_diff_eq(Vec4::W, eps) {
        return false;
    }
    let r = rotation_block(m);
    let rtr = r.transpose() * r;
    rtr.abs_diff_eq(Mat3::IDENTITY, eps) && (r.determinant() - 1.0).abs() <= eps
}
