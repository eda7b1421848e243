//! CubeXR shared GPU types.
//!
//! Geometry, uniform layouts, math helpers, and the embedded WGSL shader used by
//! both the scene model and the WebGPU renderer in `cubexr-web`.

pub mod geometry;
pub mod math;
pub mod shaders;
pub mod uniforms;
