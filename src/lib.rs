#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod assets;
pub mod errors;
pub mod renderer;
pub mod resources;
pub mod scene;

pub use assets::{GltfLoader, Model, ModelNode, ModelRepository, ModelScene, ModelTransform};
pub use errors::{Error, Result};
pub use renderer::GlobalFrameState;
pub use resources::{BufferRef, Mesh, MeshPrimitive, Vertex};
pub use scene::{
    Camera, MeshInstance, NodeHandle, NodeKind, PointLight, PrefabInstance, Scene, SceneNode,
    Transform,
};
