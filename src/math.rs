use cgmath::{Deg, InnerSpace, Matrix3, Vector3};

/// Position/direction vector shared by the game world and the GUI.
pub type Vector3f = Vector3<f32>;

/// 3x3 transform. The 3D entities use it as a rotation, the GUI uses it as a
/// homogeneous 2D placement with the translation stored in column `z`.
pub type Matrix3f = Matrix3<f32>;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Re-centres one coordinate difference onto the unit torus, giving a value
/// in [-0.5, 0.5). The second modulo keeps the intermediate non-negative.
pub fn wrap_coordinate(d: f32) -> f32 {
    ((d + 0.5) % 1.0 + 1.0) % 1.0 - 0.5
}

/// Shortest displacement on the torus, per axis.
pub fn wrap_delta(v: Vector3f) -> Vector3f {
    Vector3::new(
        wrap_coordinate(v.x),
        wrap_coordinate(v.y),
        wrap_coordinate(v.z),
    )
}

/// Maps any point into the play cube [-0.5, 0.5)^3.
pub fn wrap_position(p: Vector3f) -> Vector3f {
    wrap_delta(p)
}

pub fn toroidal_distance(a: Vector3f, b: Vector3f) -> f32 {
    wrap_delta(b - a).magnitude()
}

/// Rotates `m` in place by the given angles in degrees, x first.
pub fn rotate(m: &mut Matrix3f, x: f32, y: f32, z: f32) {
    *m = *m
        * Matrix3::from_angle_x(Deg(x))
        * Matrix3::from_angle_y(Deg(y))
        * Matrix3::from_angle_z(Deg(z));
}

/// Copy of `m` whose 2D translation is replaced by `(x, y)`.
pub fn with_translation(m: &Matrix3f, x: f32, y: f32) -> Matrix3f {
    let mut out = *m;
    out.z.x = x;
    out.z.y = y;
    out
}

/// Translation part of a 2D placement.
pub fn translation(m: &Matrix3f) -> (f32, f32) {
    (m.z.x, m.z.y)
}

/// Gram-Schmidt on the columns, keeping `z` (forward) as the anchor.
pub fn orthonormalize(m: &mut Matrix3f) {
    let z = m.z.normalize();
    let x = (m.x - z * m.x.dot(z)).normalize();
    let y = z.cross(x);
    *m = Matrix3::from_cols(x, y, z);
}
