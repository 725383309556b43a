//! GLFW-based window management for Vulkan
//!
//! GLFW creates the window without an OpenGL context; presentation is left to
//! Vulkan. No event polling callbacks are enabled, so the per-window event
//! receiver stays empty and polling only updates the close flag.

use super::{WindowError, WindowHints, WindowResult, Windowing};
use crate::foundation::thread::MainThread;

/// GLFW window together with its event receiver
pub struct GlfwWindow {
    window: glfw::PWindow,
    _events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwWindow {
    /// Current window size in screen coordinates
    pub fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width.unsigned_abs(), height.unsigned_abs())
    }
}

/// GLFW implementation of [`Windowing`]
///
/// The library stays initialized while the `Glfw` handle (and any window,
/// which holds its own clone) is alive; `terminate` releases our handle after
/// the window is gone.
#[derive(Default)]
pub struct GlfwWindowing {
    glfw: Option<glfw::Glfw>,
}

impl GlfwWindowing {
    /// Create an uninitialized GLFW backend
    pub const fn new() -> Self {
        Self { glfw: None }
    }

    fn glfw(&self) -> WindowResult<&glfw::Glfw> {
        self.glfw.as_ref().ok_or(WindowError::NotInitialized)
    }

    fn glfw_mut(&mut self) -> WindowResult<&mut glfw::Glfw> {
        self.glfw.as_mut().ok_or(WindowError::NotInitialized)
    }
}

impl Windowing for GlfwWindowing {
    type Window = GlfwWindow;

    fn init(&mut self, _thread: &MainThread) -> WindowResult<()> {
        let glfw = glfw::init(glfw::log_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        log::debug!("GLFW {} initialized, vulkan supported: {}", glfw::get_version_string(), glfw.vulkan_supported());

        self.glfw = Some(glfw);
        Ok(())
    }

    fn apply_hints(&mut self, _thread: &MainThread, hints: WindowHints) {
        let Ok(glfw) = self.glfw_mut() else {
            log::warn!("Window hints ignored, GLFW is not initialized");
            return;
        };

        let client_api = if hints.client_api {
            glfw::ClientApiHint::OpenGl
        } else {
            glfw::ClientApiHint::NoApi
        };
        glfw.window_hint(glfw::WindowHint::ClientApi(client_api));
        glfw.window_hint(glfw::WindowHint::Resizable(hints.resizable));
    }

    fn create_window(
        &mut self,
        _thread: &MainThread,
        width: u32,
        height: u32,
        title: &str,
    ) -> WindowResult<GlfwWindow> {
        let (window, events) = self
            .glfw_mut()?
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or_else(|| WindowError::CreationFailed {
                title: title.to_string(),
                width,
                height,
            })?;

        Ok(GlfwWindow {
            window,
            _events: events,
        })
    }

    fn required_instance_extensions(&self, _thread: &MainThread) -> WindowResult<Vec<String>> {
        self.glfw()?
            .get_required_instance_extensions()
            .ok_or(WindowError::ExtensionsUnavailable)
    }

    fn poll_events(&mut self, _thread: &MainThread) {
        if let Some(glfw) = self.glfw.as_mut() {
            glfw.poll_events();
        }
    }

    fn should_close(&self, _thread: &MainThread, window: &GlfwWindow) -> bool {
        window.window.should_close()
    }

    fn destroy_window(&mut self, _thread: &MainThread, window: GlfwWindow) {
        // PWindow destroys the native window on drop
        drop(window);
    }

    fn terminate(&mut self, _thread: &MainThread) {
        if self.glfw.take().is_none() {
            log::warn!("GLFW terminate called without a live library handle");
        }
    }
}
