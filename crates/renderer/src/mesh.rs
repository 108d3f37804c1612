//! Meshes uploaded to a backend.

use arbor_resources::Mesh;

use crate::backend::{MeshId, RenderBackend};
use crate::error::RenderResult;

/// A mesh whose buffers live in a backend.
///
/// Nodes share these through `Rc`, so one upload can be instanced by any
/// number of nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GpuMesh {
    id: MeshId,
    index_count: u32,
    label: String,
}

impl GpuMesh {
    /// Upload `mesh` in the interleaved [`Vertex`](arbor_resources::Vertex) layout.
    pub fn upload(backend: &mut dyn RenderBackend, mesh: &Mesh) -> Self {
        let vertices = mesh.interleaved();
        let id = backend.upload_mesh(&mesh.name, bytemuck::cast_slice(&vertices), &mesh.indices);
        Self {
            id,
            index_count: mesh.indices.len() as u32,
            label: mesh.name.clone(),
        }
    }

    /// Issue the draw call for this mesh with whatever state is bound.
    pub fn draw_primitive(&self, backend: &mut dyn RenderBackend) -> RenderResult<()> {
        backend.draw_indexed(self.id, self.index_count)
    }

    pub fn id(&self) -> MeshId {
        self.id
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingBackend;
    use arbor_resources::Vertex;

    #[test]
    fn test_upload_and_draw() {
        let mut backend = RecordingBackend::new();
        let cube = Mesh::cube(1.0).unwrap();
        let mesh = GpuMesh::upload(&mut backend, &cube);

        assert_eq!(mesh.index_count(), 36);
        let record = backend.mesh(mesh.id()).unwrap();
        assert_eq!(record.label, "cube");
        assert_eq!(record.vertex_bytes, 24 * Vertex::SIZE);

        mesh.draw_primitive(&mut backend).unwrap();
        assert_eq!(backend.draw_calls().collect::<Vec<_>>(), vec![(mesh.id(), 36)]);
    }
}
