use glam::{Affine3A, Mat4, UVec2};
use serde::{Deserialize, Serialize};

use crate::resources::uniforms::CameraUniforms;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionType {
    Perspective,
    Orthographic,
}

/// Camera projection state.
///
/// Only projection parameters live here; the view matrix is derived from
/// the owning node's world transform during the per-frame traversal, and
/// the aspect ratio comes from the viewport extent of the frame being
/// recorded, so neither can go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub projection_type: ProjectionType,
    /// Vertical field of view in radians (perspective).
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Half-height of the view volume (orthographic).
    pub ortho_size: f32,
}

impl Camera {
    #[must_use]
    pub fn new_perspective(fov_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            projection_type: ProjectionType::Perspective,
            fov: fov_degrees.to_radians(),
            near,
            far,
            ortho_size: 10.0,
        }
    }

    #[must_use]
    pub fn new_orthographic(size: f32, near: f32, far: f32) -> Self {
        Self {
            projection_type: ProjectionType::Orthographic,
            fov: 60.0_f32.to_radians(),
            near,
            far,
            ortho_size: size,
        }
    }

    /// Projection matrix for the given aspect ratio (width / height).
    ///
    /// Depth range is [0, 1] (`perspective_rh` / `orthographic_rh`).
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection_type {
            ProjectionType::Perspective => {
                Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
            }
            ProjectionType::Orthographic => {
                let w = self.ortho_size * aspect;
                let h = self.ortho_size;
                Mat4::orthographic_rh(-w, w, -h, h, self.near, self.far)
            }
        }
    }

    /// Computes the per-frame uniform block for this camera.
    ///
    /// `world` is the camera node's world transform; view = world inverse.
    #[must_use]
    pub fn uniforms(&self, extent: UVec2, world: &Affine3A) -> CameraUniforms {
        let aspect = if extent.y == 0 {
            1.0
        } else {
            extent.x as f32 / extent.y as f32
        };

        let view = Mat4::from(*world).inverse();
        let projection = self.projection_matrix(aspect);

        CameraUniforms {
            view,
            projection,
            view_projection: projection * view,
            position: world.translation.extend(1.0),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new_perspective(60.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn view_matrix_is_world_inverse() {
        let camera = Camera::new_perspective(60.0, 0.1, 100.0);
        let world = Affine3A::from_translation(Vec3::new(0.0, 0.0, 5.0));

        let ubo = camera.uniforms(UVec2::new(800, 600), &world);

        // A point at the camera position maps to the view-space origin
        let origin = ubo.view.transform_point3(Vec3::new(0.0, 0.0, 5.0));
        assert!(origin.length() < 1e-5);
        assert_eq!(ubo.position, Vec4::new(0.0, 0.0, 5.0, 1.0));
    }

    #[test]
    fn zero_height_extent_does_not_divide_by_zero() {
        let camera = Camera::default();
        let ubo = camera.uniforms(UVec2::ZERO, &Affine3A::IDENTITY);
        assert!(ubo.projection.is_finite());
    }
}
