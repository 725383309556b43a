//! Foundation module - low-level utilities shared by the rest of the crate
//!
//! - Logging: the injected line logger and `env_logger` setup
//! - Thread: the main-thread token that gates every windowing and Vulkan call

pub mod logging;
pub mod thread;
