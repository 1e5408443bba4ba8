use crate::scene::NodeHandle;
use crate::scene::camera::Camera;
use crate::scene::light::PointLight;
use crate::scene::mesh_instance::MeshInstance;
use crate::scene::transform::Transform;

/// A node tagged with the model path it was (or will be) expanded from.
///
/// The recorded source lets the subtree be re-expanded after a model
/// reload, or populated lazily via
/// [`Scene::expand_prefab`](crate::scene::Scene::expand_prefab).
#[derive(Debug, Clone)]
pub struct PrefabInstance {
    pub source: String,
}

/// Closed set of node kinds.
///
/// The per-frame traversal dispatches on this tag in a single exhaustive
/// match; adding a variant forces every dispatch site to handle it.
#[derive(Debug)]
pub enum NodeKind {
    /// Plain node, useful as a grouping or transform pivot.
    Group,
    Camera(Camera),
    PointLight(PointLight),
    MeshInstance(MeshInstance),
    Prefab(PrefabInstance),
}

impl NodeKind {
    /// Stable tag name for diagnostics and persistence.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeKind::Group => "Group",
            NodeKind::Camera(_) => "Camera",
            NodeKind::PointLight(_) => "PointLight",
            NodeKind::MeshInstance(_) => "MeshInstance",
            NodeKind::Prefab(_) => "Prefab",
        }
    }
}

/// An entry in the scene hierarchy.
///
/// Owns its transform and kind payload; parent/child links are handles into
/// the owning scene's arena and are only ever mutated through
/// [`Scene`](crate::scene::Scene) so both sides stay in sync.
#[derive(Debug)]
pub struct SceneNode {
    /// Unique-at-creation name (see `Scene` name registry).
    pub name: String,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,
    pub transform: Transform,
    pub kind: NodeKind,
}

impl SceneNode {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            kind,
        }
    }

    /// Parent handle, `None` only for the scene root.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Read-only ordered view of the children.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    // ========================================================================
    // Kind accessors
    // ========================================================================

    #[must_use]
    pub fn as_camera(&self) -> Option<&Camera> {
        match &self.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    pub fn as_camera_mut(&mut self) -> Option<&mut Camera> {
        match &mut self.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_point_light(&self) -> Option<&PointLight> {
        match &self.kind {
            NodeKind::PointLight(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_point_light_mut(&mut self) -> Option<&mut PointLight> {
        match &mut self.kind {
            NodeKind::PointLight(light) => Some(light),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_mesh_instance(&self) -> Option<&MeshInstance> {
        match &self.kind {
            NodeKind::MeshInstance(instance) => Some(instance),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_prefab(&self) -> Option<&PrefabInstance> {
        match &self.kind {
            NodeKind::Prefab(prefab) => Some(prefab),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_camera(&self) -> bool {
        matches!(self.kind, NodeKind::Camera(_))
    }
}
