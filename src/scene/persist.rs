//! Scene persistence document model.
//!
//! [`SceneDocument`] is a plain serde tree mirroring the scene hierarchy:
//! per node a type tag, the name, the local transform and the
//! kind-specific fields needed to rebuild an isomorphic tree. The document
//! is codec-agnostic; JSON helpers are provided here and a binary codec can
//! serialize the same structures without touching the scene core.
//!
//! Mesh instances are persisted by mesh name and re-resolved through the
//! model repository on load; an unresolvable mesh degrades to a plain group
//! node with a warning instead of failing the whole load.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::scene::NodeHandle;
use crate::scene::camera::{Camera, ProjectionType};
use crate::scene::light::PointLight;
use crate::scene::node::{NodeKind, SceneNode};
use crate::scene::scene::Scene;

/// Kind-specific fields of a persisted node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKindDocument {
    Group,
    Camera {
        projection: ProjectionType,
        fov: f32,
        near: f32,
        far: f32,
        ortho_size: f32,
    },
    PointLight {
        color: [f32; 3],
        intensity: f32,
        range: f32,
    },
    MeshInstance {
        mesh: String,
    },
    Prefab {
        source: String,
    },
}

/// One persisted node: tag, name, local transform, children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub name: String,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    #[serde(flatten)]
    pub kind: NodeKindDocument,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDocument>,
}

/// A full persisted scene tree, root included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub root: NodeDocument,
}

impl Scene {
    // ========================================================================
    // Save
    // ========================================================================

    /// Snapshots the whole tree into a document.
    #[must_use]
    pub fn to_document(&self) -> SceneDocument {
        let root = self
            .get_node(self.root())
            .expect("scene root is always live");
        SceneDocument {
            root: self.document_node(root),
        }
    }

    /// Serializes the tree to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    fn document_node(&self, node: &SceneNode) -> NodeDocument {

        let kind = match &node.kind {
            NodeKind::Group => NodeKindDocument::Group,
            NodeKind::Camera(camera) => NodeKindDocument::Camera {
                projection: camera.projection_type,
                fov: camera.fov,
                near: camera.near,
                far: camera.far,
                ortho_size: camera.ortho_size,
            },
            NodeKind::PointLight(light) => NodeKindDocument::PointLight {
                color: light.color.to_array(),
                intensity: light.intensity,
                range: light.range,
            },
            NodeKind::MeshInstance(instance) => NodeKindDocument::MeshInstance {
                mesh: instance.mesh().name.clone(),
            },
            NodeKind::Prefab(prefab) => NodeKindDocument::Prefab {
                source: prefab.source.clone(),
            },
        };

        NodeDocument {
            name: node.name.clone(),
            position: node.transform.position.to_array(),
            rotation: node.transform.rotation.to_array(),
            scale: node.transform.scale.to_array(),
            kind,
            children: node
                .children()
                .iter()
                .filter_map(|&child| self.get_node(child))
                .map(|child| self.document_node(child))
                .collect(),
        }
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// Rebuilds the tree from a document, replacing the current contents.
    ///
    /// The root node itself is kept (its transform is taken from the
    /// document); everything below it is recreated through the regular
    /// factories, so name registration and main-camera selection behave
    /// exactly as if the tree had been built by hand.
    pub fn load_document(&mut self, doc: &SceneDocument) {
        let root = self.root();
        let children: Vec<NodeHandle> = self
            .get_node(root)
            .map(|node| node.children().to_vec())
            .unwrap_or_default();
        for child in children {
            let _ = self.remove_object(child);
        }

        if let Some(node) = self.get_node_mut(root) {
            node.transform.position = Vec3::from_array(doc.root.position);
            node.transform.rotation = Quat::from_array(doc.root.rotation);
            node.transform.scale = Vec3::from_array(doc.root.scale);
        }

        for child_doc in &doc.root.children {
            self.load_node(child_doc, root);
        }
    }

    /// Deserializes a JSON document produced by [`to_json`](Self::to_json).
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let doc: SceneDocument = serde_json::from_str(json)?;
        self.load_document(&doc);
        Ok(())
    }

    fn load_node(&mut self, doc: &NodeDocument, parent: NodeHandle) {
        let position = Vec3::from_array(doc.position);
        let rotation = Quat::from_array(doc.rotation);
        let scale = Vec3::from_array(doc.scale);
        let parent = Some(parent);

        let handle = match &doc.kind {
            NodeKindDocument::Group => {
                self.create_object(&doc.name, position, rotation, scale, parent)
            }
            NodeKindDocument::Camera {
                projection,
                fov,
                near,
                far,
                ortho_size,
            } => {
                let camera = Camera {
                    projection_type: *projection,
                    fov: *fov,
                    near: *near,
                    far: *far,
                    ortho_size: *ortho_size,
                };
                self.create_camera(&doc.name, position, rotation, scale, parent, camera)
            }
            NodeKindDocument::PointLight {
                color,
                intensity,
                range,
            } => {
                let light = PointLight::new(Vec3::from_array(*color), *intensity, *range);
                self.create_point_light(&doc.name, position, rotation, scale, parent, light)
            }
            NodeKindDocument::MeshInstance { mesh } => {
                let resolved = self.models.find_mesh(mesh);
                match resolved {
                    Some(mesh) => self
                        .create_mesh_instance(&doc.name, position, rotation, scale, parent, mesh),
                    None => {
                        log::warn!(
                            "Mesh \"{mesh}\" for node \"{}\" not found in any loaded model, \
                             restoring as plain node",
                            doc.name
                        );
                        self.create_object(&doc.name, position, rotation, scale, parent)
                    }
                }
            }
            NodeKindDocument::Prefab { source } => {
                self.create_prefab_instance(&doc.name, position, rotation, scale, parent, source)
            }
        };

        for child_doc in &doc.children {
            self.load_node(child_doc, handle);
        }
    }
}
