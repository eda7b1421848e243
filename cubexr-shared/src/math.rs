use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// Right-handed perspective projection with a `[0, 1]` depth range.
/// `fov_degrees` is the vertical field of view.
pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_degrees.to_radians(), aspect, near, far)
}

/// Rotation matrix for Euler angles applied in X, Y, Z order (`Rx * Ry * Rz`).
pub fn euler_xyz(rotation: Vec3) -> Mat4 {
    Mat4::from_rotation_x(rotation.x) * Mat4::from_rotation_y(rotation.y) * Mat4::from_rotation_z(rotation.z)
}

/// Compose a local transform from position and Euler rotation.
pub fn model_matrix(position: Vec3, rotation: Vec3) -> Mat4 {
    Mat4::from_translation(position) * euler_xyz(rotation)
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Inverse-transpose of the model-view matrix, for transforming normals.
pub fn normal_matrix(model_view: Mat4) -> Mat4 {
    model_view.inverse().transpose()
}
