use glam::{Affine3A, EulerRot, Mat3, Quat, Vec3};

/// Local-space transform of a scene node.
///
/// Holds position, rotation and scale relative to the parent node. World
/// placement is derived by the owning [`Scene`](crate::scene::Scene) by
/// composing local matrices root-to-leaf; nothing is cached here, so a
/// transform can never go stale after a reparent.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    #[must_use]
    pub fn from_trs(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Builds a transform from an affine matrix by decomposition.
    ///
    /// Shear is lost in the process; model files that bake shear into node
    /// matrices will instantiate slightly off.
    #[must_use]
    pub fn from_matrix(matrix: Affine3A) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Local matrix: scale first, then rotation, then translation.
    #[must_use]
    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    // ========================================================================
    // Rotation helpers
    // ========================================================================

    /// Sets the rotation from XYZ euler angles (radians).
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    /// Current rotation as XYZ euler angles (radians).
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    /// Rotates to face `target`. Both `target` and `up` are in the parent's
    /// coordinate space.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize();

        // Degenerate when looking along the up axis
        if forward.cross(up).length_squared() < 1e-4 {
            return;
        }

        let right = forward.cross(up).normalize();
        let new_up = right.cross(forward).normalize();

        let rot_mat = Mat3::from_cols(right, new_up, -forward);
        self.rotation = Quat::from_mat3(&rot_mat);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
