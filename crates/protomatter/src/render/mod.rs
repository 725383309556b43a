//! Rendering collaborators
//!
//! - [`window`]: the windowing library seam and its GLFW implementation
//! - [`vulkan`]: the graphics API seam, its ash implementation and device selection

pub mod vulkan;
pub mod window;
