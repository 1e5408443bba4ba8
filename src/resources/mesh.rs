use bytemuck::{Pod, Zeroable};

use crate::resources::buffer::BufferRef;

/// Interleaved vertex layout shared by all mesh primitives.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// One drawable unit of a mesh: a vertex buffer, an optional index buffer
/// and the counts the renderer needs to issue the draw call.
#[derive(Debug, Clone)]
pub struct MeshPrimitive {
    pub vertex_buffer: BufferRef,
    pub index_buffer: Option<BufferRef>,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl MeshPrimitive {
    pub fn new(label: &str, vertices: &[Vertex], indices: Option<&[u32]>) -> Self {
        let vertex_buffer = BufferRef::new(
            vertices,
            wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            Some(label),
        );
        let index_buffer = indices.map(|data| {
            BufferRef::new(
                data,
                wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                Some(label),
            )
        });
        Self {
            vertex_buffer,
            index_buffer,
            vertex_count: vertices.len() as u32,
            index_count: indices.map_or(0, |data| data.len() as u32),
        }
    }
}

/// An ordered list of primitives loaded from a model file.
///
/// Meshes are immutable once built and shared between mesh instance nodes
/// via `Arc<Mesh>`; no instance may mutate a shared mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: String,
    primitives: Vec<MeshPrimitive>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primitives: Vec::new(),
        }
    }

    pub fn add_primitive(&mut self, primitive: MeshPrimitive) {
        self.primitives.push(primitive);
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    #[must_use]
    pub fn primitive(&self, index: usize) -> Option<&MeshPrimitive> {
        self.primitives.get(index)
    }

    #[must_use]
    pub fn primitives(&self) -> &[MeshPrimitive] {
        &self.primitives
    }
}
