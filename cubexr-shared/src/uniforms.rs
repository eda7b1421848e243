use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::math::normal_matrix;

/// Per-object uniform block, matches `ObjectUniforms` in `normal_material.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PerObjectUniforms {
    pub model_view_proj: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
}

impl PerObjectUniforms {
    pub fn new(projection: Mat4, view: Mat4, model: Mat4) -> Self {
        let model_view = view * model;
        Self {
            model_view_proj: (projection * model_view).to_cols_array_2d(),
            normal_matrix: normal_matrix(model_view).to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_uniform_size_matches_wgsl_layout() {
        // two mat4x4<f32>
        assert_eq!(std::mem::size_of::<PerObjectUniforms>(), 128);
    }

    #[test]
    fn test_identity_camera_passes_model_through() {
        let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let u = PerObjectUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, model);
        assert_eq!(u.model_view_proj, model.to_cols_array_2d());
        let n = Mat4::from_cols_array_2d(&u.normal_matrix).transform_vector3(Vec3::Y);
        assert!(n.abs_diff_eq(Vec3::Y, 1e-6), "got {n}");
    }
}
