//! Error Types
//!
//! This module defines the error types used throughout the scene core.
//!
//! # Overview
//!
//! The main error type [`Error`] covers all failure modes including:
//! - Scene hierarchy violations (cycles, stale handles)
//! - Asset lookup and instantiation errors
//! - Model file loading and decoding errors
//! - Persistence (de)serialization errors
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, Error>`.
//!
//! Recoverable conditions inside a larger operation (a malformed asset node
//! during model instantiation, an unresolvable mesh during persistence
//! restore) are logged and skipped rather than propagated; an `Err` means
//! the operation as a whole could not proceed.

use thiserror::Error;

/// The main error type for the Nightbird scene core.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Scene & Hierarchy Errors
    // ========================================================================
    /// A node handle did not resolve to a live node.
    #[error("Node not found (handle is stale or from another scene)")]
    NodeNotFound,

    /// Reparenting would make a node its own ancestor.
    #[error("Cannot parent \"{node}\" under \"{new_parent}\": it is an ancestor of the target")]
    CyclicHierarchy {
        /// The node being moved
        node: String,
        /// The intended new parent
        new_parent: String,
    },

    /// The root node cannot be reparented or removed.
    #[error("Operation not permitted on the scene root")]
    RootNode,

    /// A prefab operation was invoked on a node of a different kind.
    #[error("Node \"{0}\" is not a prefab instance")]
    NotAPrefab(String),

    /// A handle did not refer to a camera node.
    #[error("Node \"{0}\" is not a camera")]
    NotACamera(String),

    // ========================================================================
    // Asset Errors
    // ========================================================================
    /// The requested model was never loaded into the repository.
    #[error("Model not found: {0} (make sure the model is loaded first)")]
    ModelNotFound(String),

    /// An asset node referenced a mesh index beyond the model's mesh list.
    #[error("Mesh index {index} out of bounds in model \"{model}\" ({count} meshes)")]
    MeshIndexOutOfBounds {
        /// Model the reference came from
        model: String,
        /// The invalid index
        index: usize,
        /// Number of meshes in the model
        count: usize,
    },

    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    Gltf(String),

    // ========================================================================
    // I/O & Serialization Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<gltf::Error> for Error {
    fn from(err: gltf::Error) -> Self {
        Error::Gltf(err.to_string())
    }
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
