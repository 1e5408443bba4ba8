//! glTF 2.0 model loading.
//!
//! Parses a glTF file into the engine's own [`Model`] structures: meshes
//! become [`Mesh`] resources, the node graph is copied index-for-index so
//! instantiation never has to touch glTF types again. Materials, skins and
//! animations are handled by other subsystems and ignored here.

use std::path::Path;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use crate::assets::model::{Model, ModelNode, ModelScene, ModelTransform};
use crate::errors::Result;
use crate::resources::mesh::{Mesh, MeshPrimitive, Vertex};

/// Loader for glTF 2.0 files (`.gltf` / `.glb`).
pub struct GltfLoader;

impl GltfLoader {
    /// Parses the file at `path` into a [`Model`].
    pub fn load(path: impl AsRef<Path>) -> Result<Model> {
        let path = path.as_ref();
        let (document, buffers, _images) = gltf::import(path)?;

        let name = path
            .file_stem()
            .map_or_else(|| "Model".to_string(), |s| s.to_string_lossy().into_owned());
        let mut model = Model::new(name);

        for mesh in document.meshes() {
            model.meshes.push(Arc::new(Self::load_mesh(&mesh, &buffers)));
        }

        // The asset graph is copied verbatim: node and mesh references stay
        // index-based so they can be validated at instantiation time.
        for node in document.nodes() {
            model.nodes.push(Self::convert_node(&node));
        }

        for scene in document.scenes() {
            model.scenes.push(ModelScene {
                name: scene
                    .name()
                    .map_or_else(|| format!("Scene_{}", scene.index()), str::to_string),
                nodes: scene.nodes().map(|node| node.index()).collect(),
            });
        }

        log::info!(
            "Loaded glTF model \"{}\": {} meshes, {} nodes, {} scenes",
            model.name,
            model.meshes.len(),
            model.nodes.len(),
            model.scenes.len()
        );

        Ok(model)
    }

    fn load_mesh(mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data]) -> Mesh {
        let name = mesh
            .name()
            .map_or_else(|| format!("Mesh_{}", mesh.index()), str::to_string);
        let mut out = Mesh::new(&name);

        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .map(Iterator::collect)
                .unwrap_or_default();
            if positions.is_empty() {
                log::warn!(
                    "Mesh \"{name}\" primitive {} has no positions, skipping",
                    primitive.index()
                );
                continue;
            }

            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(Iterator::collect)
                .unwrap_or_default();
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|coords| coords.into_f32().collect())
                .unwrap_or_default();

            let vertices: Vec<Vertex> = positions
                .iter()
                .enumerate()
                .map(|(i, &position)| Vertex {
                    position,
                    normal: normals.get(i).copied().unwrap_or([0.0, 0.0, 1.0]),
                    uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
                })
                .collect();

            let indices: Option<Vec<u32>> = reader
                .read_indices()
                .map(|indices| indices.into_u32().collect());

            let label = format!("{}/{}", name, primitive.index());
            out.add_primitive(MeshPrimitive::new(&label, &vertices, indices.as_deref()));
        }

        out
    }

    fn convert_node(node: &gltf::Node) -> ModelNode {
        let transform = match node.transform() {
            gltf::scene::Transform::Matrix { matrix } => {
                ModelTransform::Matrix(Mat4::from_cols_array_2d(&matrix))
            }
            gltf::scene::Transform::Decomposed {
                translation,
                rotation,
                scale,
            } => ModelTransform::Decomposed {
                translation: Vec3::from_array(translation),
                rotation: Quat::from_array(rotation),
                scale: Vec3::from_array(scale),
            },
        };

        ModelNode {
            name: node
                .name()
                .map_or_else(|| format!("Node_{}", node.index()), str::to_string),
            transform,
            mesh: node.mesh().map(|mesh| mesh.index()),
            children: node.children().map(|child| child.index()).collect(),
        }
    }
}
