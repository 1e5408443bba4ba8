use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use crate::resources::mesh::Mesh;

/// A node transform as stored in the source asset.
///
/// Model files carry either a full 4x4 matrix or separate TRS fields;
/// [`decompose`](Self::decompose) normalizes both into local TRS.
#[derive(Debug, Clone, Copy)]
pub enum ModelTransform {
    Matrix(Mat4),
    Decomposed {
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    },
}

impl ModelTransform {
    /// Returns the transform as `(translation, rotation, scale)`.
    #[must_use]
    pub fn decompose(&self) -> (Vec3, Quat, Vec3) {
        match *self {
            ModelTransform::Matrix(matrix) => {
                let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
                (translation, rotation, scale)
            }
            ModelTransform::Decomposed {
                translation,
                rotation,
                scale,
            } => (translation, rotation, scale),
        }
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        ModelTransform::Decomposed {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// One node of the asset graph, referencing children and meshes by index.
#[derive(Debug, Clone, Default)]
pub struct ModelNode {
    pub name: String,
    pub transform: ModelTransform,
    /// Index into [`Model::meshes`], if this node is drawable.
    pub mesh: Option<usize>,
    /// Indices into [`Model::nodes`].
    pub children: Vec<usize>,
}

/// A scene entry of the asset: an ordered list of root node indices.
#[derive(Debug, Clone, Default)]
pub struct ModelScene {
    pub name: String,
    pub nodes: Vec<usize>,
}

/// An externally loaded model, immutable once registered.
///
/// The first entry of `scenes` is the designated root scene used by
/// [`Scene::instantiate_model`](crate::scene::Scene::instantiate_model).
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<Arc<Mesh>>,
    pub nodes: Vec<ModelNode>,
    pub scenes: Vec<ModelScene>,
}

impl Model {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The scene instantiation expands by default.
    #[must_use]
    pub fn root_scene(&self) -> Option<&ModelScene> {
        self.scenes.first()
    }

    #[must_use]
    pub fn node(&self, index: usize) -> Option<&ModelNode> {
        self.nodes.get(index)
    }

    #[must_use]
    pub fn mesh(&self, index: usize) -> Option<&Arc<Mesh>> {
        self.meshes.get(index)
    }
}
