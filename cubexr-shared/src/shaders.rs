/// Embedded WGSL shader source strings for the WebGPU rendering pipeline.

/// Normal-visualising material: vertex entry `vs_main`, fragment entry `fs_main`.
pub const NORMAL_MATERIAL: &str = include_str!("../shaders/normal_material.wgsl");
