//! Scene graph system.
//!
//! Manages the scene hierarchy and its node kinds:
//! - [`SceneNode`]: a named tree node owning a [`Transform`] and a [`NodeKind`]
//! - [`Transform`]: local position, rotation and scale
//! - [`Scene`]: the node arena, creation factories, path lookup and the
//!   per-frame buffer update traversal
//! - [`Camera`], [`PointLight`], [`MeshInstance`], [`PrefabInstance`]:
//!   kind payloads
//!
//! Nodes are owned exclusively by the scene's slotmap arena and addressed
//! through generation-checked [`NodeHandle`]s: a handle kept across a
//! removal resolves to `None` instead of dangling.

pub mod camera;
pub mod instantiate;
pub mod light;
pub mod mesh_instance;
pub mod node;
pub mod persist;
pub mod scene;
pub mod transform;
pub mod wrapper;

pub use camera::{Camera, ProjectionType};
pub use light::PointLight;
pub use mesh_instance::MeshInstance;
pub use node::{NodeKind, PrefabInstance, SceneNode};
pub use persist::{NodeDocument, NodeKindDocument, SceneDocument};
pub use scene::Scene;
pub use transform::Transform;
pub use wrapper::NodeRef;

use slotmap::new_key_type;

new_key_type! {
    /// Generation-checked handle to a node in a [`Scene`].
    pub struct NodeHandle;
}
