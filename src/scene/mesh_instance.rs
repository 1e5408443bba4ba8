use std::sync::Arc;

use glam::{Affine3A, Mat4};

use crate::resources::buffer::BufferRef;
use crate::resources::mesh::Mesh;
use crate::resources::uniforms::ObjectUniforms;

/// A drawable instance of a shared, immutable [`Mesh`].
///
/// Carries one uniform buffer per frame in flight so the frame being
/// recorded can be refreshed while earlier frames are still in use by the
/// GPU.
#[derive(Debug)]
pub struct MeshInstance {
    mesh: Arc<Mesh>,
    uniform_buffers: Vec<BufferRef>,
}

impl MeshInstance {
    #[must_use]
    pub fn new(mesh: Arc<Mesh>, frames_in_flight: usize, label: &str) -> Self {
        let uniform_buffers = (0..frames_in_flight)
            .map(|frame| {
                BufferRef::new(
                    &[ObjectUniforms::default()],
                    wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    Some(&format!("{label}.ObjectUniforms[{frame}]")),
                )
            })
            .collect();
        Self {
            mesh,
            uniform_buffers,
        }
    }

    #[must_use]
    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    #[must_use]
    pub fn uniform_buffer(&self, frame_index: usize) -> Option<&BufferRef> {
        self.uniform_buffers.get(frame_index)
    }

    /// Refreshes the uniform block for one frame in flight.
    ///
    /// An out-of-range frame index is logged and ignored.
    pub fn update_uniforms(&self, frame_index: usize, world: &Affine3A) {
        let Some(buffer) = self.uniform_buffers.get(frame_index) else {
            log::warn!(
                "update_uniforms: frame index {frame_index} out of range ({} frames in flight)",
                self.uniform_buffers.len()
            );
            return;
        };

        let model = Mat4::from(*world);
        buffer.update(&[ObjectUniforms {
            model,
            normal: model.inverse().transpose(),
        }]);
    }
}
