//! Chainable node operation wrapper.
//!
//! [`NodeRef`] borrows a [`Scene`] mutably and provides a fluent API for
//! adjusting a node's transform without `get_node_mut().unwrap()` noise.
//!
//! All methods silently no-op when the handle is stale, so callers never
//! panic on dangling handles.
//!
//! # Example
//!
//! ```rust,ignore
//! scene.node(handle)
//!     .set_position(0.0, 3.0, 0.0)
//!     .set_scale(2.0)
//!     .look_at(Vec3::ZERO);
//! ```
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::must_use_candidate)]

use glam::{Quat, Vec3};

use crate::scene::NodeHandle;
use crate::scene::scene::Scene;

/// Temporary mutable borrow of a scene node for chainable operations.
pub struct NodeRef<'a> {
    scene: &'a mut Scene,
    handle: NodeHandle,
}

impl<'a> NodeRef<'a> {
    #[inline]
    pub fn new(scene: &'a mut Scene, handle: NodeHandle) -> Self {
        Self { scene, handle }
    }

    /// Returns the underlying handle.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    // -- Transform setters (chainable) --

    /// Sets the node's local position.
    #[inline]
    pub fn set_position(self, x: f32, y: f32, z: f32) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.transform.position = Vec3::new(x, y, z);
        }
        self
    }

    /// Sets the node's local rotation.
    #[inline]
    pub fn set_rotation(self, rotation: Quat) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.transform.rotation = rotation;
        }
        self
    }

    /// Sets uniform scale.
    #[inline]
    pub fn set_scale(self, s: f32) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.transform.scale = Vec3::splat(s);
        }
        self
    }

    /// Sets non-uniform scale.
    #[inline]
    pub fn set_scale_xyz(self, x: f32, y: f32, z: f32) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.transform.scale = Vec3::new(x, y, z);
        }
        self
    }

    /// Rotates the node to face `target` (parent space, +Y up).
    #[inline]
    pub fn look_at(self, target: Vec3) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.transform.look_at(target, Vec3::Y);
        }
        self
    }
}
