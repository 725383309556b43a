//! Application lifecycle
//!
//! Construction initializes the window, then the Vulkan instance, then picks
//! a physical device. [`Application::run`] polls events until the window asks
//! to close, and [`Application::close`] tears everything down in dependency
//! order: instance, window, windowing library.

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::config::AppConfig;
use crate::foundation::logging::{DefaultLogger, Logger};
use crate::foundation::thread::{MainThread, ThreadError};
use crate::logln;
use crate::render::vulkan::{
    select_physical_device, AcceptAny, AshGraphics, DeviceSelectionError, DeviceSuitability, GraphicsApi,
    GraphicsError,
};
use crate::render::window::{GlfwWindowing, WindowError, WindowHints, Windowing};

/// Application on GLFW and ash
pub type VulkanApplication = Application<GlfwWindowing, AshGraphics>;

/// Fatal initialization errors
///
/// Either a collaborator failed, or an invariant of the bootstrap itself does
/// not hold (see [`InitError::is_invariant_violation`]). None of them is
/// recoverable; the caller decides how to exit.
#[derive(Error, Debug)]
pub enum InitError {
    /// The calling thread cannot drive the windowing library
    #[error(transparent)]
    Thread(#[from] ThreadError),

    /// The configuration cannot be used
    #[error("invalid application configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The windowing library failed
    #[error("window initialization failed: {0}")]
    Window(#[from] WindowError),

    /// A Vulkan call failed
    #[error("vulkan initialization failed: {0}")]
    Graphics(#[from] GraphicsError),

    /// The instance exposes no physical device
    #[error("no vulkan gpu found")]
    NoPhysicalDevices,

    /// The suitability policy rejected every physical device
    #[error("no suitable vulkan gpu among {considered} devices")]
    NoSuitableDevice {
        /// Number of devices considered
        considered: usize,
    },
}

impl InitError {
    /// Whether the bootstrap's own requirements failed rather than a collaborator
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::Thread(_) | Self::InvalidConfig(_) | Self::NoPhysicalDevices | Self::NoSuitableDevice { .. }
        )
    }
}

impl From<DeviceSelectionError> for InitError {
    fn from(error: DeviceSelectionError) -> Self {
        match error {
            DeviceSelectionError::Graphics(error) => Self::Graphics(error),
            DeviceSelectionError::NoDevices => Self::NoPhysicalDevices,
            DeviceSelectionError::NoneSuitable { considered } => Self::NoSuitableDevice { considered },
        }
    }
}

/// Window, Vulkan instance and selected physical device
///
/// Owns its collaborators and the main-thread token, so it never leaves the
/// thread it was built on. Dropping it without calling [`close`](Self::close)
/// performs the same teardown.
pub struct Application<W: Windowing, G: GraphicsApi> {
    thread: MainThread,
    logger: Box<dyn Logger>,
    config: AppConfig,
    suitability: Box<dyn DeviceSuitability>,
    windowing: W,
    graphics: G,
    windowing_live: bool,
    window: Option<W::Window>,
    instance: Option<G::Instance>,
    physical_device: Option<G::PhysicalDevice>,
}

impl VulkanApplication {
    /// Pin the calling thread and build a GLFW window with a Vulkan instance
    ///
    /// The first enumerated physical device is selected.
    pub fn new(logger: Box<dyn Logger>, name: &str, width: u32, height: u32) -> Result<Self, InitError> {
        ApplicationBuilder::new(AppConfig::new(name, width, height))
            .logger(logger)
            .build_vulkan()
    }
}

impl<W: Windowing, G: GraphicsApi> Application<W, G> {
    fn init_window(&mut self) -> Result<(), InitError> {
        self.windowing.init(&self.thread)?;
        self.windowing_live = true;

        self.windowing.apply_hints(&self.thread, WindowHints::VULKAN);
        let window = self.windowing.create_window(
            &self.thread,
            self.config.width,
            self.config.height,
            &self.config.name,
        )?;
        self.window = Some(window);

        logln!(self.logger, "glfw init done");
        Ok(())
    }

    fn init_graphics(&mut self) -> Result<(), InitError> {
        self.graphics.load(&self.thread)?;

        let instance = self.create_instance()?;
        let instance = &*self.instance.insert(instance);
        log_instance_extensions(&self.graphics, &self.thread, &*self.logger)?;

        let device = select_physical_device(
            &self.graphics,
            &self.thread,
            instance,
            &*self.logger,
            &*self.suitability,
        )?;
        self.physical_device = Some(device);
        Ok(())
    }

    fn create_instance(&mut self) -> Result<G::Instance, InitError> {
        let info = self.config.application_info();

        // Enabled verbatim: no filtering against what the driver supports
        let extensions = self.windowing.required_instance_extensions(&self.thread)?;
        logln!(self.logger, "vulkan extensions:");
        for extension in &extensions {
            logln!(self.logger, "{extension}");
        }

        let instance = self.graphics.create_instance(&self.thread, &info, &extensions)?;
        logln!(self.logger, "vk instance created");
        Ok(instance)
    }

    /// Poll window events until the window's close flag is set
    ///
    /// Each iteration polls once and then checks the flag. Nothing is drawn.
    pub fn run(&mut self) {
        logln!(self.logger, "entering main loop");

        if let Some(window) = self.window.as_ref() {
            let mut iterations: u64 = 0;
            loop {
                self.windowing.poll_events(&self.thread);
                iterations += 1;
                if self.windowing.should_close(&self.thread, window) {
                    break;
                }
            }
            log::debug!("Main loop ran {iterations} iterations");
        }

        logln!(self.logger, "main loop done");
    }

    /// Destroy the instance, then the window, then terminate the windowing library
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.instance.is_none() && self.window.is_none() && !self.windowing_live {
            return;
        }

        self.physical_device = None;
        if let Some(instance) = self.instance.take() {
            self.graphics.destroy_instance(&self.thread, instance);
        }
        if let Some(window) = self.window.take() {
            self.windowing.destroy_window(&self.thread, window);
        }
        if std::mem::take(&mut self.windowing_live) {
            self.windowing.terminate(&self.thread);
        }

        logln!(self.logger, "glfw closed");
    }

    /// Configuration the application was built with
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The selected physical device
    pub fn physical_device(&self) -> Option<G::PhysicalDevice> {
        self.physical_device
    }

    /// The live instance
    pub fn instance(&self) -> Option<&G::Instance> {
        self.instance.as_ref()
    }

    /// The live window
    pub fn window(&self) -> Option<&W::Window> {
        self.window.as_ref()
    }

    /// The main-thread token
    pub fn main_thread(&self) -> &MainThread {
        &self.thread
    }
}

/// Diagnostic only: the enabled set is already fixed
fn log_instance_extensions<G: GraphicsApi>(
    graphics: &G,
    thread: &MainThread,
    logger: &dyn Logger,
) -> Result<(), GraphicsError> {
    let properties = graphics.instance_extension_properties(thread)?;
    logln!(logger, "extension properties {}", properties.len());
    for property in &properties {
        logln!(logger, "{}", property.name);
    }
    Ok(())
}

impl<W: Windowing, G: GraphicsApi> Drop for Application<W, G> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Builds an [`Application`] over any windowing and graphics implementation
///
/// ```rust,no_run
/// use protomatter::prelude::*;
/// use protomatter::render::vulkan::DeviceType;
///
/// # fn main() -> Result<(), InitError> {
/// let discrete_only = |candidate: &DeviceCandidate| candidate.properties.device_type == DeviceType::DiscreteGpu;
///
/// let app = ApplicationBuilder::new(AppConfig::new("demo", 1280, 720))
///     .suitability(discrete_only)
///     .build_vulkan()?;
/// app.close();
/// # Ok(())
/// # }
/// ```
pub struct ApplicationBuilder {
    config: AppConfig,
    logger: Box<dyn Logger>,
    suitability: Box<dyn DeviceSuitability>,
}

impl ApplicationBuilder {
    /// Builder with the default logger and the accept-any device policy
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            logger: Box::new(DefaultLogger),
            suitability: Box::new(AcceptAny),
        }
    }

    /// Logger receiving the lifecycle lines
    #[must_use]
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    /// Policy deciding which physical device may be selected
    #[must_use]
    pub fn suitability(mut self, policy: impl DeviceSuitability + 'static) -> Self {
        self.suitability = Box::new(policy);
        self
    }

    /// Pin the calling thread and build on GLFW and ash
    pub fn build_vulkan(self) -> Result<VulkanApplication, InitError> {
        let thread = MainThread::pin()?;
        self.build(thread, GlfwWindowing::new(), AshGraphics::new())
    }

    /// Initialize the window, then the instance, then pick a physical device
    ///
    /// Whatever was created before a failing step is released before the
    /// error is returned.
    pub fn build<W: Windowing, G: GraphicsApi>(
        self,
        thread: MainThread,
        windowing: W,
        graphics: G,
    ) -> Result<Application<W, G>, InitError> {
        self.config.validate()?;

        let mut app = Application {
            thread,
            logger: self.logger,
            config: self.config,
            suitability: self.suitability,
            windowing,
            graphics,
            windowing_live: false,
            window: None,
            instance: None,
            physical_device: None,
        };

        app.init_window()?;
        app.init_graphics()?;
        Ok(app)
    }
}
