//! Model instantiation.
//!
//! Expands a loaded [`Model`](crate::assets::Model)'s node graph into a
//! scene subtree. Two entry points exist:
//! - [`Scene::instantiate_model`] creates a prefab instance node tracking
//!   the source path and expands the model under it immediately;
//! - [`Scene::expand_prefab`] populates an existing, still-empty prefab
//!   instance node from its recorded source (deferred expansion).
//!
//! Import errors are local: a malformed asset node is logged and its whole
//! subtree skipped, the rest of the import continues.

use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::assets::model::Model;
use crate::errors::{Error, Result};
use crate::scene::NodeHandle;
use crate::scene::scene::Scene;

impl Scene {
    /// Instantiates a previously loaded model under `parent`.
    ///
    /// Creates a prefab instance node carrying the given local transform
    /// and the source path, then expands the model's root scene under it.
    /// Fails with [`Error::ModelNotFound`] when `path` was never loaded;
    /// nothing is inserted in that case.
    pub fn instantiate_model(
        &mut self,
        path: &str,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        parent: Option<NodeHandle>,
    ) -> Result<NodeHandle> {
        let Some(model) = self.models.get(path) else {
            log::warn!("Model \"{path}\" not found. Make sure the model is loaded first.");
            return Err(Error::ModelNotFound(path.to_string()));
        };

        let name = model.name.clone();
        let handle =
            self.create_prefab_instance(&name, position, rotation, scale, parent, path);
        let created = self.expand_model_under(&model, handle);
        log::debug!("Instantiated model \"{path}\": {created} nodes");
        Ok(handle)
    }

    /// Populates a prefab instance node from its recorded source path.
    ///
    /// Returns the number of nodes created. A prefab that already has
    /// children is left untouched (returns 0); a non-prefab node is an
    /// error.
    pub fn expand_prefab(&mut self, handle: NodeHandle) -> Result<usize> {
        let node = self.get_node(handle).ok_or(Error::NodeNotFound)?;
        let Some(prefab) = node.as_prefab() else {
            return Err(Error::NotAPrefab(node.name.clone()));
        };
        if !node.children().is_empty() {
            return Ok(0);
        }
        let source = prefab.source.clone();

        let Some(model) = self.models.get(&source) else {
            log::warn!("Model \"{source}\" not found. Make sure the model is loaded first.");
            return Err(Error::ModelNotFound(source));
        };

        Ok(self.expand_model_under(&model, handle))
    }

    /// Expands the model's designated root scene (its first scene entry)
    /// under `parent`, returning the number of nodes created.
    fn expand_model_under(&mut self, model: &Arc<Model>, parent: NodeHandle) -> usize {
        let Some(root_scene) = model.root_scene() else {
            log::warn!("Model \"{}\" has no scenes, nothing to instantiate", model.name);
            return 0;
        };

        let root_indices = root_scene.nodes.clone();
        let mut created = 0;
        for node_index in root_indices {
            created += self.instantiate_model_node(model, node_index, parent);
        }
        created
    }

    /// Recursively creates the engine node for one asset node.
    ///
    /// A node with an out-of-bounds mesh or node reference produces nothing
    /// and its subtree is skipped entirely.
    fn instantiate_model_node(
        &mut self,
        model: &Arc<Model>,
        node_index: usize,
        parent: NodeHandle,
    ) -> usize {
        let Some(asset_node) = model.node(node_index) else {
            log::warn!(
                "Model \"{}\" references node index {node_index} out of bounds, skipping",
                model.name
            );
            return 0;
        };

        let name = asset_node.name.clone();
        let children = asset_node.children.clone();
        let (position, rotation, scale) = asset_node.transform.decompose();

        let handle = match asset_node.mesh {
            Some(mesh_index) => {
                let Some(mesh) = model.mesh(mesh_index) else {
                    let err = Error::MeshIndexOutOfBounds {
                        model: model.name.clone(),
                        index: mesh_index,
                        count: model.meshes.len(),
                    };
                    log::warn!("{err}; skipping node \"{name}\" and its subtree");
                    return 0;
                };
                let mesh = mesh.clone();
                self.create_mesh_instance(&name, position, rotation, scale, Some(parent), mesh)
            }
            // Still worth creating: it acts as a transform pivot for descendants
            None => self.create_object(&name, position, rotation, scale, Some(parent)),
        };

        let mut created = 1;
        for child_index in children {
            created += self.instantiate_model_node(model, child_index, handle);
        }
        created
    }
}
