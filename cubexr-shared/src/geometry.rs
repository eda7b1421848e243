use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Interleaved vertex: position followed by normal.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle mesh ready for GPU upload.
#[derive(Clone, Debug)]
pub struct MeshGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshGeometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Face normal plus the two in-plane axes, chosen so that `u × v = normal`.
/// That keeps every face counter-clockwise when seen from outside.
const BOX_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

/// Build an axis-aligned box centred on the origin.
///
/// Each face has its own four vertices so normals stay flat (24 vertices,
/// 36 indices).
pub fn box_geometry(width: f32, height: f32, depth: f32) -> MeshGeometry {
    let half = Vec3::new(width, height, depth) * 0.5;
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in BOX_FACES {
        let base = vertices.len() as u16;
        let center = normal * half;
        let du = u * half;
        let dv = v * half;

        for corner in [center - du - dv, center + du - dv, center + du + dv, center - du + dv] {
            vertices.push(Vertex {
                position: corner.to_array(),
                normal: normal.to_array(),
            });
        }

        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshGeometry { vertices, indices }
}

/// The 1×1×1 cube rendered by the demo.
pub fn unit_cube() -> MeshGeometry {
    box_geometry(1.0, 1.0, 1.0)
}
