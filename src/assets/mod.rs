//! Externally loaded model assets.
//!
//! A [`Model`] is the engine-side mirror of a 3D model file: its meshes plus
//! the node graph needed to instantiate it into a scene. Models are parsed
//! once (see [`loaders`]), registered in the [`ModelRepository`] under their
//! source path, and shared read-only from then on.

pub mod loaders;
pub mod model;
pub mod repository;

pub use loaders::GltfLoader;
pub use model::{Model, ModelNode, ModelScene, ModelTransform};
pub use repository::ModelRepository;
