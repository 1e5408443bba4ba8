//! Renderer-facing frame state.
//!
//! The scene core never talks to a GPU device directly. It fills the
//! versioned buffers owned by [`GlobalFrameState`]; the render backend
//! uploads whatever changed before recording the frame's commands.

pub mod global;

pub use global::{DEFAULT_FRAMES_IN_FLIGHT, GlobalFrameState};
