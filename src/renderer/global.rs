use crate::resources::buffer::BufferRef;
use crate::resources::uniforms::{CameraUniforms, PointLightData};

/// Number of frames the renderer records ahead of the GPU by default.
pub const DEFAULT_FRAMES_IN_FLIGHT: usize = 2;

/// Global per-frame GPU state shared by the whole scene.
///
/// Holds one camera uniform buffer and one point light storage buffer per
/// frame in flight. [`Scene::update_buffers`](crate::scene::Scene::update_buffers)
/// writes the slot for the frame being recorded; the render loop guarantees
/// the write completes before that frame's submission reads it, so no
/// further synchronization happens here.
#[derive(Debug)]
pub struct GlobalFrameState {
    frames_in_flight: usize,
    camera_buffers: Vec<BufferRef>,
    light_buffers: Vec<BufferRef>,
}

impl GlobalFrameState {
    #[must_use]
    pub fn new(frames_in_flight: usize) -> Self {
        let camera_buffers = (0..frames_in_flight)
            .map(|frame| {
                BufferRef::new(
                    &[CameraUniforms::default()],
                    wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    Some(&format!("GlobalCameraUniforms[{frame}]")),
                )
            })
            .collect();
        let light_buffers = (0..frames_in_flight)
            .map(|frame| {
                BufferRef::empty(
                    wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
                    Some(&format!("GlobalPointLights[{frame}]")),
                )
            })
            .collect();
        Self {
            frames_in_flight,
            camera_buffers,
            light_buffers,
        }
    }

    #[must_use]
    pub fn frames_in_flight(&self) -> usize {
        self.frames_in_flight
    }

    /// Writes the camera uniform block for one frame in flight.
    ///
    /// An out-of-range frame index is logged and ignored.
    pub fn update_camera(&self, frame_index: usize, uniforms: CameraUniforms) {
        if let Some(buffer) = self.camera_buffers.get(frame_index) {
            buffer.update(&[uniforms]);
        } else {
            log::warn!(
                "update_camera: frame index {frame_index} out of range ({} frames in flight)",
                self.frames_in_flight
            );
        }
    }

    /// Replaces the point light batch for one frame in flight.
    ///
    /// An out-of-range frame index is logged and ignored.
    pub fn update_point_lights(&self, frame_index: usize, lights: &[PointLightData]) {
        if let Some(buffer) = self.light_buffers.get(frame_index) {
            buffer.update(lights);
        } else {
            log::warn!(
                "update_point_lights: frame index {frame_index} out of range ({} frames in flight)",
                self.frames_in_flight
            );
        }
    }

    /// Number of lights currently stored for a frame.
    #[must_use]
    pub fn light_count(&self, frame_index: usize) -> usize {
        self.light_buffers
            .get(frame_index)
            .map_or(0, |buffer| buffer.len() / std::mem::size_of::<PointLightData>())
    }

    #[must_use]
    pub fn camera_buffer(&self, frame_index: usize) -> Option<&BufferRef> {
        self.camera_buffers.get(frame_index)
    }

    #[must_use]
    pub fn light_buffer(&self, frame_index: usize) -> Option<&BufferRef> {
        self.light_buffers.get(frame_index)
    }
}

impl Default for GlobalFrameState {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMES_IN_FLIGHT)
    }
}
