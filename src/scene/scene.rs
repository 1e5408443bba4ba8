use std::sync::Arc;

use glam::{Affine3A, Quat, UVec2, Vec3};
use rustc_hash::FxHashSet;
use slotmap::SlotMap;

use crate::assets::repository::ModelRepository;
use crate::errors::{Error, Result};
use crate::renderer::global::GlobalFrameState;
use crate::resources::mesh::Mesh;
use crate::resources::uniforms::PointLightData;
use crate::scene::NodeHandle;
use crate::scene::camera::Camera;
use crate::scene::light::PointLight;
use crate::scene::mesh_instance::MeshInstance;
use crate::scene::node::{NodeKind, PrefabInstance, SceneNode};
use crate::scene::wrapper::NodeRef;

/// The scene graph container.
///
/// Owns every node in a slotmap arena under a permanent root node named
/// "Root". Nodes are created exclusively through the factory methods, which
/// link the new node under its parent and hand back a generation-checked
/// handle for the caller to keep.
///
/// All mutation and traversal runs on the frame thread; the only shared
/// state are the versioned buffers written during
/// [`update_buffers`](Self::update_buffers), whose upload ordering the
/// render loop enforces externally.
pub struct Scene {
    nodes: SlotMap<NodeHandle, SceneNode>,
    root: NodeHandle,
    main_camera: Option<NodeHandle>,
    /// Names claimed by live nodes; factories suffix collisions.
    names: FxHashSet<String>,

    // === Collaborators ===
    pub(crate) models: Arc<ModelRepository>,
    globals: Arc<GlobalFrameState>,
}

impl Scene {
    #[must_use]
    pub fn new(models: Arc<ModelRepository>, globals: Arc<GlobalFrameState>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new("Root", NodeKind::Group));

        let mut names = FxHashSet::default();
        names.insert("Root".to_string());

        Self {
            nodes,
            root,
            main_camera: None,
            names,
            models,
            globals,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut SceneNode> {
        self.nodes.get_mut(handle)
    }

    /// Chainable mutation wrapper for a node.
    pub fn node(&mut self, handle: NodeHandle) -> NodeRef<'_> {
        NodeRef::new(self, handle)
    }

    /// Total number of live nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn main_camera(&self) -> Option<NodeHandle> {
        self.main_camera
    }

    /// Designates a camera node as the active viewpoint.
    pub fn set_main_camera(&mut self, handle: NodeHandle) -> Result<()> {
        let node = self.nodes.get(handle).ok_or(Error::NodeNotFound)?;
        if !node.is_camera() {
            return Err(Error::NotACamera(node.name.clone()));
        }
        self.main_camera = Some(handle);
        Ok(())
    }

    #[must_use]
    pub fn models(&self) -> &Arc<ModelRepository> {
        &self.models
    }

    #[must_use]
    pub fn globals(&self) -> &Arc<GlobalFrameState> {
        &self.globals
    }

    // ========================================================================
    // Creation factories
    // ========================================================================

    /// Creates a plain group node.
    pub fn create_object(
        &mut self,
        name: &str,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        parent: Option<NodeHandle>,
    ) -> NodeHandle {
        self.insert_node(name, NodeKind::Group, position, rotation, scale, parent)
    }

    /// Creates a camera node. The first camera created becomes the main
    /// camera; later ones do not steal it.
    pub fn create_camera(
        &mut self,
        name: &str,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        parent: Option<NodeHandle>,
        camera: Camera,
    ) -> NodeHandle {
        let handle = self.insert_node(
            name,
            NodeKind::Camera(camera),
            position,
            rotation,
            scale,
            parent,
        );
        if self.main_camera.is_none() {
            self.main_camera = Some(handle);
        }
        handle
    }

    /// Creates a point light node.
    pub fn create_point_light(
        &mut self,
        name: &str,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        parent: Option<NodeHandle>,
        light: PointLight,
    ) -> NodeHandle {
        self.insert_node(
            name,
            NodeKind::PointLight(light),
            position,
            rotation,
            scale,
            parent,
        )
    }

    /// Creates a mesh instance node sharing `mesh` read-only.
    pub fn create_mesh_instance(
        &mut self,
        name: &str,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        parent: Option<NodeHandle>,
        mesh: Arc<Mesh>,
    ) -> NodeHandle {
        let instance = MeshInstance::new(mesh, self.globals.frames_in_flight(), name);
        self.insert_node(
            name,
            NodeKind::MeshInstance(instance),
            position,
            rotation,
            scale,
            parent,
        )
    }

    /// Creates a prefab instance node without expanding it.
    ///
    /// Use [`expand_prefab`](Self::expand_prefab) to populate it later, or
    /// [`instantiate_model`](Self::instantiate_model) to create and expand
    /// in one step.
    pub fn create_prefab_instance(
        &mut self,
        name: &str,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        parent: Option<NodeHandle>,
        source: &str,
    ) -> NodeHandle {
        self.insert_node(
            name,
            NodeKind::Prefab(PrefabInstance {
                source: source.to_string(),
            }),
            position,
            rotation,
            scale,
            parent,
        )
    }

    /// Shared factory tail: claim a unique name, build the node, link it
    /// under the resolved parent. The node is either fully linked or not
    /// inserted at all.
    fn insert_node(
        &mut self,
        name: &str,
        kind: NodeKind,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        parent: Option<NodeHandle>,
    ) -> NodeHandle {
        let parent = match parent {
            Some(handle) if self.nodes.contains_key(handle) => handle,
            Some(_) => {
                log::warn!("Factory parent handle is stale, attaching \"{name}\" to root");
                self.root
            }
            None => self.root,
        };

        let mut node = SceneNode::new(self.claim_name(name), kind);
        node.transform.position = position;
        node.transform.rotation = rotation;
        node.transform.scale = scale;
        node.parent = Some(parent);

        let handle = self.nodes.insert(node);
        self.nodes[parent].children.push(handle);
        handle
    }

    /// Resolves name collisions by appending a numeric suffix, matching the
    /// order names were claimed ("Lamp", "Lamp1", "Lamp2", ...).
    fn claim_name(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut counter = 1;
        while self.names.contains(&candidate) {
            candidate = format!("{base}{counter}");
            counter += 1;
        }
        self.names.insert(candidate.clone());
        candidate
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Moves a node under a new parent (`None` = scene root).
    ///
    /// The node's local transform fields are untouched, so its world
    /// placement changes with the new parent chain. Fails without modifying
    /// the tree when the move would make the node its own ancestor.
    pub fn set_parent(&mut self, handle: NodeHandle, new_parent: Option<NodeHandle>) -> Result<()> {
        if handle == self.root {
            return Err(Error::RootNode);
        }
        if !self.nodes.contains_key(handle) {
            return Err(Error::NodeNotFound);
        }

        let target = new_parent.unwrap_or(self.root);
        if !self.nodes.contains_key(target) {
            return Err(Error::NodeNotFound);
        }

        let old_parent = self.nodes[handle].parent;
        if old_parent == Some(target) {
            return Ok(());
        }

        // Walk up from the target: finding the moved node means the move
        // would close a cycle.
        let mut cursor = Some(target);
        while let Some(current) = cursor {
            if current == handle {
                let err = Error::CyclicHierarchy {
                    node: self.nodes[handle].name.clone(),
                    new_parent: self.nodes[target].name.clone(),
                };
                log::error!("{err}");
                return Err(err);
            }
            cursor = self.nodes[current].parent;
        }

        if let Some(old) = old_parent {
            let children = &mut self.nodes[old].children;
            if let Some(pos) = children.iter().position(|&c| c == handle) {
                children.remove(pos);
            }
        }

        self.nodes[target].children.push(handle);
        self.nodes[handle].parent = Some(target);
        Ok(())
    }

    /// Removes a node and its entire subtree.
    ///
    /// Handles kept by callers go stale and resolve to `None` afterwards.
    /// If the main camera was in the removed subtree, the first remaining
    /// camera in traversal order takes over.
    pub fn remove_object(&mut self, handle: NodeHandle) -> Result<()> {
        if handle == self.root {
            return Err(Error::RootNode);
        }
        if !self.nodes.contains_key(handle) {
            return Err(Error::NodeNotFound);
        }

        if let Some(parent) = self.nodes[handle].parent {
            let children = &mut self.nodes[parent].children;
            if let Some(pos) = children.iter().position(|&c| c == handle) {
                children.remove(pos);
            }
        }

        let mut removed_main_camera = false;
        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                self.names.remove(&node.name);
                stack.extend(node.children);
                if self.main_camera == Some(current) {
                    removed_main_camera = true;
                }
            }
        }

        if removed_main_camera {
            self.main_camera = self.find_first_camera();
        }
        Ok(())
    }

    fn find_first_camera(&self) -> Option<NodeHandle> {
        self.all_objects()
            .into_iter()
            .find(|&handle| self.nodes[handle].is_camera())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Flattens the tree in pre-order depth-first order, root first.
    #[must_use]
    pub fn all_objects(&self) -> Vec<NodeHandle> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            out.push(handle);
            // Reverse push keeps sibling visit order
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Resolves a slash-separated path of child names starting at the root.
    ///
    /// Matching is case-sensitive and exact per segment; among duplicate
    /// sibling names the first in insertion order wins. Returns `None` as
    /// soon as a segment has no match. The empty path resolves to the
    /// starting node.
    #[must_use]
    pub fn find_object(&self, path: &str) -> Option<NodeHandle> {
        self.find_object_from(self.root, path)
    }

    /// [`find_object`](Self::find_object) relative to an arbitrary node.
    #[must_use]
    pub fn find_object_from(&self, from: NodeHandle, path: &str) -> Option<NodeHandle> {
        if path.is_empty() {
            return self.nodes.contains_key(from).then_some(from);
        }

        let mut current = from;
        for segment in path.split('/') {
            let node = self.nodes.get(current)?;
            current = node
                .children
                .iter()
                .copied()
                .find(|&child| self.nodes.get(child).is_some_and(|c| c.name == segment))?;
        }
        Some(current)
    }

    /// Builds the root-relative path of a node: the inverse of
    /// [`find_object`](Self::find_object). Returns the empty string for the
    /// root itself.
    #[must_use]
    pub fn object_path(&self, handle: NodeHandle) -> Option<String> {
        if !self.nodes.contains_key(handle) {
            return None;
        }

        let mut segments = Vec::new();
        let mut cursor = handle;
        while cursor != self.root {
            let node = self.nodes.get(cursor)?;
            segments.push(node.name.as_str());
            cursor = node.parent?;
        }
        segments.reverse();
        Some(segments.join("/"))
    }

    /// World matrix of a node: the composition of all ancestor local
    /// matrices, root to leaf. Recomputed per call; renders happen at
    /// bounded frequency and trees stay shallow, so nothing is cached.
    #[must_use]
    pub fn world_matrix(&self, handle: NodeHandle) -> Option<Affine3A> {
        let node = self.nodes.get(handle)?;
        let local = node.transform.local_matrix();
        match node.parent {
            Some(parent) => Some(self.world_matrix(parent)? * local),
            None => Some(local),
        }
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Walks the whole tree once and refreshes all per-frame GPU state for
    /// `frame_index`:
    /// - mesh instances rewrite their object uniforms,
    /// - every camera pushes its view/projection bundle for `viewport`,
    /// - point lights are collected in traversal order and pushed as one
    ///   batch to the global light buffer.
    ///
    /// Group and prefab nodes contribute nothing themselves but their
    /// children are still visited.
    pub fn update_buffers(&self, frame_index: usize, viewport: UVec2) {
        let mut lights: Vec<PointLightData> = Vec::new();

        let mut stack: Vec<(NodeHandle, Affine3A)> = vec![(self.root, Affine3A::IDENTITY)];
        while let Some((handle, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            let world = parent_world * node.transform.local_matrix();

            match &node.kind {
                NodeKind::MeshInstance(instance) => {
                    instance.update_uniforms(frame_index, &world);
                }
                NodeKind::Camera(camera) => {
                    self.globals
                        .update_camera(frame_index, camera.uniforms(viewport, &world));
                }
                NodeKind::PointLight(light) => {
                    lights.push(light.data(&world));
                }
                NodeKind::Group | NodeKind::Prefab(_) => {}
            }

            for &child in node.children.iter().rev() {
                stack.push((child, world));
            }
        }

        self.globals.update_point_lights(frame_index, &lights);
    }
}
