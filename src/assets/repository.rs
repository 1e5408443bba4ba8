use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::assets::loaders::GltfLoader;
use crate::assets::model::Model;
use crate::errors::Result;
use crate::resources::mesh::Mesh;

/// Repository of loaded models, keyed by their source path.
///
/// Models are registered once and handed out as `Arc<Model>`; the scene
/// instantiation layer looks them up by the path recorded on prefab
/// instance nodes.
#[derive(Default)]
pub struct ModelRepository {
    models: RwLock<FxHashMap<String, Arc<Model>>>,
}

impl ModelRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            models: RwLock::new(FxHashMap::default()),
        }
    }

    /// Registers a model under a path key, returning the shared handle.
    ///
    /// Re-registering a path replaces the previous entry; scenes keep any
    /// `Arc<Mesh>` they already instantiated from the old model alive.
    pub fn insert(&self, path: impl Into<String>, model: Model) -> Arc<Model> {
        let model = Arc::new(model);
        self.models.write().insert(path.into(), model.clone());
        model
    }

    /// Looks up a previously loaded model.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Arc<Model>> {
        self.models.read().get(path).cloned()
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.models.read().contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }

    /// Parses a glTF file and registers it under its path string.
    pub fn load_gltf(&self, path: impl AsRef<Path>) -> Result<Arc<Model>> {
        let path = path.as_ref();
        let model = GltfLoader::load(path)?;
        Ok(self.insert(path.to_string_lossy(), model))
    }

    /// Finds a mesh by name across all loaded models.
    ///
    /// Used by persistence restore to re-resolve mesh instance nodes; the
    /// first match in an unspecified model order wins, which is fine because
    /// mesh names are only expected to be unique within their model.
    #[must_use]
    pub fn find_mesh(&self, name: &str) -> Option<Arc<Mesh>> {
        let models = self.models.read();
        models
            .values()
            .flat_map(|model| model.meshes.iter())
            .find(|mesh| mesh.name == name)
            .cloned()
    }
}
