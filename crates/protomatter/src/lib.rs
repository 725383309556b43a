//! # Protomatter
//!
//! Bootstrap for a Vulkan application: opens a GLFW window, creates a Vulkan
//! instance, picks a physical device and polls window events until the window
//! is closed. Nothing is drawn.
//!
//! ## Lifecycle
//!
//! 1. [`MainThread::pin`] claims the calling thread for the windowing library
//! 2. [`Application::new`] initializes the window, then the instance, then
//!    selects a physical device
//! 3. [`Application::run`] blocks until the window's close flag is set
//! 4. [`Application::close`] destroys the instance, the window and finally
//!    terminates the windowing library
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use protomatter::prelude::*;
//!
//! fn main() -> Result<(), InitError> {
//!     protomatter::foundation::logging::init();
//!
//!     let mut app = VulkanApplication::new(Box::new(DefaultLogger), "example", 800, 600)?;
//!     app.run();
//!     app.close();
//!     Ok(())
//! }
//! ```
//!
//! The windowing and graphics libraries sit behind the [`Windowing`] and
//! [`GraphicsApi`] traits, so [`ApplicationBuilder`] can drive the same
//! lifecycle over other implementations.
//!
//! [`Windowing`]: render::window::Windowing
//! [`GraphicsApi`]: render::vulkan::GraphicsApi

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod render;

mod application;

#[cfg(test)]
pub(crate) mod testing;

pub use application::{Application, ApplicationBuilder, InitError, VulkanApplication};
pub use foundation::thread::MainThread;

/// Common imports for protomatter users
pub mod prelude {
    pub use crate::{
        core::config::{AppConfig, ApplicationInfo, Version},
        foundation::logging::{DefaultLogger, Logger},
        render::vulkan::{AcceptAny, DeviceCandidate, DeviceSuitability},
        Application, ApplicationBuilder, InitError, MainThread, VulkanApplication,
    };
}
