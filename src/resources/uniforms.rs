//! GPU-visible uniform block layouts.
//!
//! All structs here are `#[repr(C)]` with explicit padding so the byte
//! layout matches the shader side exactly. They are written into
//! [`BufferRef`](crate::resources::BufferRef)s by the per-frame scene
//! traversal and uploaded verbatim by the renderer.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Per-camera uniform block, refreshed once per frame per camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_projection: Mat4,
    /// Camera world position (w unused).
    pub position: Vec4,
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
            position: Vec4::ZERO,
        }
    }
}

/// Per-object uniform block for mesh instances.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: Mat4,
    /// Inverse transpose of the model matrix, for normal transformation.
    pub normal: Mat4,
}

impl Default for ObjectUniforms {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            normal: Mat4::IDENTITY,
        }
    }
}

/// Packed point light record, one entry per light in the per-frame
/// light storage buffer. 32 bytes, no implicit padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct PointLightData {
    pub position: Vec3,
    pub range: f32,
    pub color: Vec3,
    pub intensity: f32,
}
