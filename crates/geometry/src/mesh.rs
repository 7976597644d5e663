use glam::Vec4;
use serde::{Deserialize, Serialize};

/// CPU-side mesh data produced by the generators.
///
/// Positions are homogeneous (`w = 1`), normals are directions (`w = 0`).
/// The two vertex lists are parallel: `normals[i]` belongs to `positions[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffers {
    pub(crate) positions: Vec<Vec4>,
    pub(crate) normals: Vec<Vec4>,
    pub(crate) indices: Vec<u32>,
}

impl MeshBuffers {
    pub(crate) fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub(crate) fn push_vertex(&mut self, position: Vec4, normal: Vec4) {
        self.positions.push(position);
        self.normals.push(normal);
    }

    pub fn positions(&self) -> &[Vec4] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec4] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Positions as a flat `x, y, z, w` scalar list, ready for a vertex buffer.
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as a flat `x, y, z, w` scalar list, ready for a vertex buffer.
    pub fn normal_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of indices to draw.
    pub fn count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

/// Something that can take finished mesh buffers and expose them to a renderer.
///
/// Implementations read the index list first, then normals, then positions.
/// The sink owns whatever it creates; the generator keeps nothing.
pub trait MeshSink {
    /// Handle the renderer draws with.
    type Drawable;

    fn upload(&mut self, mesh: &MeshBuffers) -> Self::Drawable;
}

/// Sink that keeps the buffers on the CPU. Useful for headless tools and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuSink;

impl MeshSink for CpuSink {
    type Drawable = MeshBuffers;

    fn upload(&mut self, mesh: &MeshBuffers) -> MeshBuffers {
        mesh.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> MeshBuffers {
        let mut mesh = MeshBuffers::with_capacity(3, 3);
        mesh.push_vertex(Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::Z);
        mesh.push_vertex(Vec4::new(1.0, 0.0, 0.0, 1.0), Vec4::Z);
        mesh.push_vertex(Vec4::new(0.0, 1.0, 0.0, 1.0), Vec4::Z);
        mesh.indices.extend_from_slice(&[0, 1, 2]);
        mesh
    }

    #[test]
    fn flat_views_match_structured_data() {
        let mesh = tiny();
        assert_eq!(mesh.position_floats().len(), 12);
        assert_eq!(&mesh.position_floats()[4..8], &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(&mesh.normal_floats()[..4], &[0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn counts() {
        let mesh = tiny();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }

    #[test]
    fn cpu_sink_copies() {
        let mesh = tiny();
        let uploaded = CpuSink.upload(&mesh);
        assert_eq!(uploaded, mesh);
    }
}
