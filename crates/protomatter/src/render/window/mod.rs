//! Window management
//!
//! [`Windowing`] is everything the application needs from a windowing
//! library: a window without an implicit rendering context, the instance
//! extensions Vulkan needs to present to it, event polling and teardown.
//! [`GlfwWindowing`] implements it on GLFW.

mod glfw_backend;

pub use glfw_backend::{GlfwWindow, GlfwWindowing};

use thiserror::Error;

use crate::foundation::thread::MainThread;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing library could not be initialized
    #[error("Windowing initialization failed: {0}")]
    InitializationFailed(String),

    /// The window could not be created
    #[error("Window creation failed ({width}x{height} \"{title}\")")]
    CreationFailed {
        /// Requested title
        title: String,
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// The library cannot report which Vulkan extensions it needs
    #[error("Required Vulkan instance extensions unavailable")]
    ExtensionsUnavailable,

    /// Operation on a library that is not initialized
    #[error("Windowing library is not initialized")]
    NotInitialized,
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Hints applied before the window is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHints {
    /// Let the library create its own rendering context (OpenGL for GLFW)
    pub client_api: bool,
    /// Allow the user to resize the window
    pub resizable: bool,
}

impl WindowHints {
    /// Hints for a window whose presentation is managed by Vulkan
    pub const VULKAN: Self = Self {
        client_api: false,
        resizable: false,
    };
}

impl Default for WindowHints {
    fn default() -> Self {
        Self::VULKAN
    }
}

/// Windowing library seam
///
/// Every call takes the main-thread token. `destroy_window` and `terminate`
/// are called at most once per window and per initialization.
pub trait Windowing {
    /// Window handle owned by the caller
    type Window;

    /// Initialize the library
    fn init(&mut self, thread: &MainThread) -> WindowResult<()>;

    /// Apply hints to windows created afterwards
    fn apply_hints(&mut self, thread: &MainThread, hints: WindowHints);

    /// Create a window with the given size and title
    fn create_window(
        &mut self,
        thread: &MainThread,
        width: u32,
        height: u32,
        title: &str,
    ) -> WindowResult<Self::Window>;

    /// Instance extensions Vulkan needs to present to this library's windows
    fn required_instance_extensions(&self, thread: &MainThread) -> WindowResult<Vec<String>>;

    /// Process pending events without blocking
    fn poll_events(&mut self, thread: &MainThread);

    /// Whether the window's close flag is set
    fn should_close(&self, thread: &MainThread, window: &Self::Window) -> bool;

    /// Destroy a window
    fn destroy_window(&mut self, thread: &MainThread, window: Self::Window);

    /// Release all library-wide state
    fn terminate(&mut self, thread: &MainThread);
}
