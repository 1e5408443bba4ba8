use glam::{Affine3A, Vec3};

use crate::resources::uniforms::PointLightData;

/// Point light component.
///
/// Intensity is in arbitrary linear units; `range` bounds the light's
/// influence for culling and attenuation on the shader side.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
    pub range: f32,
}

impl PointLight {
    #[must_use]
    pub fn new(color: Vec3, intensity: f32, range: f32) -> Self {
        Self {
            color,
            intensity,
            range,
        }
    }

    /// Packs this light for the per-frame light buffer.
    ///
    /// The position is taken from the owning node's world transform.
    #[must_use]
    pub fn data(&self, world: &Affine3A) -> PointLightData {
        PointLightData {
            position: world.translation.into(),
            range: self.range,
            color: self.color,
            intensity: self.intensity,
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vec3::ONE, 1.0, 10.0)
    }
}
