//! # Core Module
//!
//! Application configuration and the metadata handed to the Vulkan driver.

pub mod config;

pub use config::{AppConfig, ApplicationInfo, Version, ENGINE_NAME};
